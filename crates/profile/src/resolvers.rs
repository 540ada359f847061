//! Fallback source-value providers.
//!
//! When no source member matches a destination member, the plan builder may
//! consult named resolver functions taking the source object as their only
//! argument. Callers register them explicitly in a [`SourceResolvers`] set;
//! nothing is discovered by scanning types.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

/// Type-erased value produced by a resolver.
pub type ErasedValue = Box<dyn Any + Send>;

type ResolveFn = dyn Fn(&dyn Any) -> Option<ErasedValue> + Send + Sync;

/// A named, single-argument function from a source type to a value.
#[derive(Clone)]
pub struct SourceResolver {
	name: Arc<str>,
	source_type: TypeId,
	source_type_name: &'static str,
	value_type_name: &'static str,
	func: Arc<ResolveFn>,
}

impl SourceResolver {
	/// Wraps `func` as the resolver `name` for sources of type `S`.
	pub fn new<S, V, F>(name: impl Into<Arc<str>>, func: F) -> Self
	where
		S: Any,
		V: Any + Send,
		F: Fn(&S) -> V + Send + Sync + 'static,
	{
		Self {
			name: name.into(),
			source_type: TypeId::of::<S>(),
			source_type_name: std::any::type_name::<S>(),
			value_type_name: std::any::type_name::<V>(),
			func: Arc::new(move |source: &dyn Any| {
				source
					.downcast_ref::<S>()
					.map(|s| Box::new(func(s)) as ErasedValue)
			}),
		}
	}

	/// Member name this resolver stands in for.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// `TypeId` of the accepted source type.
	pub fn source_type(&self) -> TypeId {
		self.source_type
	}

	/// Compiler name of the accepted source type.
	pub fn source_type_name(&self) -> &'static str {
		self.source_type_name
	}

	/// Compiler name of the produced value type.
	pub fn value_type_name(&self) -> &'static str {
		self.value_type_name
	}

	/// True when this resolver takes `S` as its argument.
	pub fn accepts<S: Any>(&self) -> bool {
		self.source_type == TypeId::of::<S>()
	}

	/// Invokes the resolver; `None` if `source` is not of the accepted type.
	pub fn resolve(&self, source: &dyn Any) -> Option<ErasedValue> {
		(self.func)(source)
	}

	/// Typed convenience over [`Self::resolve`].
	pub fn resolve_as<S: Any, V: Any>(&self, source: &S) -> Option<V> {
		self.resolve(source)?.downcast::<V>().ok().map(|v| *v)
	}
}

impl fmt::Debug for SourceResolver {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SourceResolver")
			.field("name", &self.name)
			.field("source", &self.source_type_name)
			.field("value", &self.value_type_name)
			.finish()
	}
}

/// Caller-built set of resolvers keyed by `(name, source type)`.
///
/// Iteration follows insertion order. Inserting an existing key replaces the
/// earlier resolver in place.
#[derive(Clone, Debug, Default)]
pub struct SourceResolvers {
	entries: IndexMap<(Arc<str>, TypeId), SourceResolver>,
}

impl SourceResolvers {
	/// Creates an empty set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style [`Self::insert`].
	pub fn with<S, V, F>(mut self, name: impl Into<Arc<str>>, func: F) -> Self
	where
		S: Any,
		V: Any + Send,
		F: Fn(&S) -> V + Send + Sync + 'static,
	{
		self.insert(SourceResolver::new(name, func));
		self
	}

	/// Adds a resolver, returning the one it replaced.
	pub fn insert(&mut self, resolver: SourceResolver) -> Option<SourceResolver> {
		let key = (resolver.name.clone(), resolver.source_type);
		self.entries.insert(key, resolver)
	}

	/// Number of resolvers.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// True when the set holds no resolvers.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Resolvers in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = &SourceResolver> {
		self.entries.values()
	}
}

impl IntoIterator for SourceResolvers {
	type Item = SourceResolver;
	type IntoIter = indexmap::map::IntoValues<(Arc<str>, TypeId), SourceResolver>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.into_values()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	struct Order {
		lines: Vec<u32>,
	}

	#[test]
	fn test_resolve_typed_and_erased() {
		let total = SourceResolver::new("Total", |o: &Order| o.lines.iter().sum::<u32>());
		let order = Order {
			lines: vec![2, 3, 5],
		};
		assert!(total.accepts::<Order>());
		assert_eq!(total.resolve_as::<Order, u32>(&order), Some(10));
		assert!(total.resolve(&"not an order").is_none());
		assert_eq!(total.resolve_as::<Order, String>(&order), None);
	}

	#[test]
	fn test_set_keeps_insertion_order_and_replaces() {
		let mut set = SourceResolvers::new()
			.with("Total", |o: &Order| o.lines.len())
			.with("Count", |o: &Order| o.lines.len());
		let replaced = set.insert(SourceResolver::new("Total", |o: &Order| o.lines.iter().sum::<u32>()));
		assert!(replaced.is_some());
		let names: Vec<_> = set.iter().map(SourceResolver::name).collect();
		assert_eq!(names, ["Total", "Count"]);
		assert_eq!(set.iter().next().map(SourceResolver::value_type_name), Some("u32"));
	}
}
