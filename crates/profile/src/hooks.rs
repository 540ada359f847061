//! Deferred configuration hooks.
//!
//! Hooks are registered while a profile is unsealed and run later by the
//! plan builder, once per constructed type map. The builder exposes its maps
//! through [`TypeMapRecord`] and [`PropertyMapRecord`].
//!
//! # Invariants
//!
//! - A property hook's condition is evaluated when the hook runs, once per
//!   property, never at registration.
//! - The action runs only for properties whose condition returned true.

use std::fmt;
use std::sync::Arc;

use crate::types::TypeRef;

/// A property mapping under construction, as seen by hooks.
pub trait PropertyMapRecord {
	/// Destination member name.
	fn destination_name(&self) -> &str;

	/// Source member chosen so far, if any.
	fn source_name(&self) -> Option<&str>;

	/// Excludes this property from the plan.
	fn ignore(&mut self);

	fn is_ignored(&self) -> bool;
}

/// A type map under construction, as seen by hooks.
pub trait TypeMapRecord {
	fn source_type(&self) -> &TypeRef;

	fn destination_type(&self) -> &TypeRef;

	/// Visits every property map of this type map.
	fn for_each_property(&mut self, visit: &mut dyn FnMut(&mut dyn PropertyMapRecord));
}

type TypeMapFn = dyn Fn(&mut dyn TypeMapRecord) + Send + Sync;
type PropertyConditionFn = dyn Fn(&dyn PropertyMapRecord) -> bool + Send + Sync;
type PropertyActionFn = dyn Fn(&mut dyn PropertyMapRecord) + Send + Sync;

/// Runs against every type map.
#[derive(Clone)]
pub struct TypeMapHook {
	action: Arc<TypeMapFn>,
}

impl TypeMapHook {
	/// Wraps a type-map action.
	pub fn new(action: impl Fn(&mut dyn TypeMapRecord) + Send + Sync + 'static) -> Self {
		Self {
			action: Arc::new(action),
		}
	}

	/// Runs the action on `type_map`.
	pub fn apply(&self, type_map: &mut dyn TypeMapRecord) {
		(self.action)(type_map);
	}
}

impl fmt::Debug for TypeMapHook {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TypeMapHook").finish_non_exhaustive()
	}
}

/// Runs `action` on every property for which `condition` holds.
#[derive(Clone)]
pub struct PropertyHook {
	condition: Arc<PropertyConditionFn>,
	action: Arc<PropertyActionFn>,
}

impl PropertyHook {
	/// Wraps a condition and the action it gates.
	pub fn new(
		condition: impl Fn(&dyn PropertyMapRecord) -> bool + Send + Sync + 'static,
		action: impl Fn(&mut dyn PropertyMapRecord) + Send + Sync + 'static,
	) -> Self {
		Self {
			condition: Arc::new(condition),
			action: Arc::new(action),
		}
	}

	/// Evaluates the condition for `property` and runs the action if it holds.
	///
	/// Returns whether the action ran.
	pub fn apply(&self, property: &mut dyn PropertyMapRecord) -> bool {
		if !(self.condition)(&*property) {
			return false;
		}
		(self.action)(property);
		true
	}
}

impl fmt::Debug for PropertyHook {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PropertyHook").finish_non_exhaustive()
	}
}


#[cfg(test)]
mod tests {
	use std::sync::atomic::{AtomicUsize, Ordering};

	use super::test_records::{Map, Prop};
	use super::*;

	#[test]
	fn test_condition_is_not_evaluated_at_registration() {
		let evaluated = Arc::new(AtomicUsize::new(0));
		let counter = evaluated.clone();
		let hook = PropertyHook::new(
			move |_| {
				counter.fetch_add(1, Ordering::SeqCst);
				true
			},
			|p| p.ignore(),
		);
		assert_eq!(evaluated.load(Ordering::SeqCst), 0);

		let mut prop = Prop::new("X");
		assert!(hook.apply(&mut prop));
		assert!(prop.ignored);
		assert_eq!(evaluated.load(Ordering::SeqCst), 1);
	}

	#[test]
	fn test_action_gated_by_condition() {
		let hook = PropertyHook::new(|p| p.destination_name() == "X", |p| p.ignore());
		let mut other = Prop::new("Y");
		assert!(!hook.apply(&mut other));
		assert!(!other.ignored);
	}

	#[test]
	fn test_type_map_hook_visits_properties() {
		let hook = TypeMapHook::new(|map| {
			map.for_each_property(&mut |p| {
				if p.destination_name().starts_with('_') {
					p.ignore();
				}
			});
		});
		let mut map = Map::new("Order", "OrderDto", &["Id", "_Etag"]);
		hook.apply(&mut map);
		assert!(!map.props[0].ignored);
		assert!(map.props[1].ignored);
	}
}
