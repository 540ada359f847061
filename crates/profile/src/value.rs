//! Typed value transformers.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

type TransformFn = dyn Fn(&mut dyn Any) + Send + Sync;

/// Rewrites every mapped value of type `T` in place.
#[derive(Clone)]
pub struct ValueTransformer {
	value_type: TypeId,
	value_type_name: &'static str,
	func: Arc<TransformFn>,
}

impl ValueTransformer {
	/// Wraps `func` as a transformer for values of type `T`.
	pub fn new<T, F>(func: F) -> Self
	where
		T: Any,
		F: Fn(&mut T) + Send + Sync + 'static,
	{
		Self {
			value_type: TypeId::of::<T>(),
			value_type_name: std::any::type_name::<T>(),
			func: Arc::new(move |value: &mut dyn Any| {
				if let Some(v) = value.downcast_mut::<T>() {
					func(v);
				}
			}),
		}
	}

	/// `TypeId` of the transformed type.
	pub fn value_type(&self) -> TypeId {
		self.value_type
	}

	/// Compiler name of the transformed type.
	pub fn value_type_name(&self) -> &'static str {
		self.value_type_name
	}

	/// True when this transformer rewrites values of type `T`.
	pub fn applies_to<T: Any>(&self) -> bool {
		self.value_type == TypeId::of::<T>()
	}

	/// Transforms `value` if it has this transformer's type; otherwise no-op.
	pub fn apply(&self, value: &mut dyn Any) {
		(self.func)(value);
	}
}

impl fmt::Debug for ValueTransformer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ValueTransformer")
			.field("value", &self.value_type_name)
			.finish()
	}
}
