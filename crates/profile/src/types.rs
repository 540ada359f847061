//! Type descriptors supplied by the introspection layer.
//!
//! Rust has no runtime notion of an unbound generic, so the caller describes
//! each type explicitly: a plain named type, a generic definition with its
//! arity (`Vec<_>`), or a constructed generic with concrete arguments
//! (`Vec<i32>`).

use std::fmt;
use std::sync::Arc;

/// Generic shape of a [`TypeRef`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Generics {
	/// Not generic.
	None,
	/// Unbound generic definition with `arity` parameters.
	Definition {
		/// Number of type parameters.
		arity: usize,
	},
	/// Generic definition applied to concrete arguments.
	Constructed(Arc<[TypeRef]>),
}

/// Descriptor for a type participating in a type map.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
	name: Arc<str>,
	generics: Generics,
}

impl TypeRef {
	/// A non-generic type.
	pub fn named(name: impl Into<Arc<str>>) -> Self {
		Self {
			name: name.into(),
			generics: Generics::None,
		}
	}

	/// A non-generic descriptor named after `T`'s compiler type name.
	pub fn of<T: ?Sized + 'static>() -> Self {
		Self::named(std::any::type_name::<T>())
	}

	/// An unbound generic definition such as `Vec<_>`.
	pub fn generic_definition(name: impl Into<Arc<str>>, arity: usize) -> Self {
		Self {
			name: name.into(),
			generics: Generics::Definition { arity },
		}
	}

	/// A generic definition applied to `args`.
	pub fn constructed(name: impl Into<Arc<str>>, args: impl IntoIterator<Item = TypeRef>) -> Self {
		Self {
			name: name.into(),
			generics: Generics::Constructed(args.into_iter().collect()),
		}
	}

	/// Base name without generic arguments.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Generic shape.
	pub fn generics(&self) -> &Generics {
		&self.generics
	}

	/// True for unbound generic definitions.
	pub fn is_generic_definition(&self) -> bool {
		matches!(self.generics, Generics::Definition { .. })
	}

	/// Number of type parameters or arguments.
	pub fn arity(&self) -> usize {
		match &self.generics {
			Generics::None => 0,
			Generics::Definition { arity } => *arity,
			Generics::Constructed(args) => args.len(),
		}
	}

	/// Returns the generic definition a constructed type was built from.
	pub fn definition(&self) -> Option<TypeRef> {
		match &self.generics {
			Generics::Constructed(args) => Some(Self::generic_definition(self.name.clone(), args.len())),
			_ => None,
		}
	}

	/// True when `self` is a constructed instance of `definition`.
	pub fn is_instance_of(&self, definition: &TypeRef) -> bool {
		definition.is_generic_definition()
			&& matches!(self.generics, Generics::Constructed(_))
			&& self.name == definition.name
			&& self.arity() == definition.arity()
	}
}

impl fmt::Display for TypeRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.name)?;
		match &self.generics {
			Generics::None => Ok(()),
			Generics::Definition { arity } => {
				f.write_str("<")?;
				for idx in 0..*arity {
					if idx > 0 {
						f.write_str(", ")?;
					}
					f.write_str("_")?;
				}
				f.write_str(">")
			}
			Generics::Constructed(args) => {
				f.write_str("<")?;
				for (idx, arg) in args.iter().enumerate() {
					if idx > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{arg}")?;
				}
				f.write_str(">")
			}
		}
	}
}
