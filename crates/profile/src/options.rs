//! Construction-time profile options.
//!
//! # Precedence
//!
//! Scalar switches are [`Override`]s. An unset override inherits the global
//! default chosen by whoever consumes the profile; this crate never turns an
//! unset value into `false`.

use std::fmt;
use std::sync::Arc;

use mapkit_naming::{ConventionPair, NamingConvention};
use serde::Deserialize;

/// A tri-state profile switch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "Option<bool>")]
pub enum Override {
	/// Use the consumer's global default.
	#[default]
	Inherit,
	Enabled,
	Disabled,
}

impl Override {
	/// Resolves against the consumer's global default.
	pub fn resolve(self, global_default: bool) -> bool {
		match self {
			Self::Inherit => global_default,
			Self::Enabled => true,
			Self::Disabled => false,
		}
	}

	/// True unless this is [`Override::Inherit`].
	pub fn is_set(self) -> bool {
		self != Self::Inherit
	}

	/// `None` for [`Override::Inherit`].
	pub fn as_option(self) -> Option<bool> {
		match self {
			Self::Inherit => None,
			Self::Enabled => Some(true),
			Self::Disabled => Some(false),
		}
	}
}

impl From<bool> for Override {
	fn from(value: bool) -> Self {
		if value { Self::Enabled } else { Self::Disabled }
	}
}

impl From<Option<bool>> for Override {
	fn from(value: Option<bool>) -> Self {
		value.map_or(Self::Inherit, Self::from)
	}
}

/// Kind of a type member offered for automatic mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
	Property,
	Field,
	Method,
	Constructor,
}

/// Introspection data for a single member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
	/// Member name as declared.
	pub name: String,
	pub kind: MemberKind,
	pub is_public: bool,
	pub is_static: bool,
}

impl MemberInfo {
	/// A public, non-static member.
	pub fn new(name: impl Into<String>, kind: MemberKind) -> Self {
		Self {
			name: name.into(),
			kind,
			is_public: true,
			is_static: false,
		}
	}

	/// Marks the member non-public.
	pub fn private(mut self) -> Self {
		self.is_public = false;
		self
	}

	/// Marks the member static.
	pub fn as_static(mut self) -> Self {
		self.is_static = true;
		self
	}
}

/// Predicate deciding whether a member takes part in automatic mapping.
pub type MemberPredicate = Arc<dyn Fn(&MemberInfo) -> bool + Send + Sync>;

/// Per-kind member predicates.
///
/// Defaults when unset: properties and fields must be public, methods must be
/// public and non-static, constructors must be public.
#[derive(Clone, Default)]
pub struct MemberFilters {
	pub should_map_property: Option<MemberPredicate>,
	pub should_map_field: Option<MemberPredicate>,
	pub should_map_method: Option<MemberPredicate>,
	pub should_map_constructor: Option<MemberPredicate>,
}

impl MemberFilters {
	/// Runs the predicate for the member's kind, or the default rule.
	pub fn should_map(&self, member: &MemberInfo) -> bool {
		let predicate = match member.kind {
			MemberKind::Property => &self.should_map_property,
			MemberKind::Field => &self.should_map_field,
			MemberKind::Method => &self.should_map_method,
			MemberKind::Constructor => &self.should_map_constructor,
		};
		match predicate {
			Some(p) => p(member),
			None => match member.kind {
				MemberKind::Method => member.is_public && !member.is_static,
				_ => member.is_public,
			},
		}
	}
}

impl fmt::Debug for MemberFilters {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MemberFilters")
			.field("property", &self.should_map_property.is_some())
			.field("field", &self.should_map_field.is_some())
			.field("method", &self.should_map_method.is_some())
			.field("constructor", &self.should_map_constructor.is_some())
			.finish()
	}
}

/// Options accepted when a profile is constructed.
#[derive(Debug, Clone, Default)]
pub struct ProfileOptions {
	/// Registry key; must be unique within a [`crate::ProfileRegistry`].
	pub name: String,
	pub allow_null_destination_values: Override,
	pub allow_null_collections: Override,
	pub enable_null_propagation_for_queries: Override,
	/// Per-kind member predicates.
	pub filters: MemberFilters,
	/// Defaults to [`NamingConvention::pascal_case`].
	pub source_naming_convention: Option<NamingConvention>,
	/// Defaults to [`NamingConvention::pascal_case`].
	pub destination_naming_convention: Option<NamingConvention>,
}

impl ProfileOptions {
	/// Options with the given name and every switch inherited.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	/// Enables or disables null destination values.
	pub fn allow_null_destination_values(mut self, value: bool) -> Self {
		self.allow_null_destination_values = value.into();
		self
	}

	/// Enables or disables null collections.
	pub fn allow_null_collections(mut self, value: bool) -> Self {
		self.allow_null_collections = value.into();
		self
	}

	/// Enables or disables null propagation for queries.
	pub fn enable_null_propagation_for_queries(mut self, value: bool) -> Self {
		self.enable_null_propagation_for_queries = value.into();
		self
	}

	/// Convention for source member names.
	pub fn source_naming_convention(mut self, convention: NamingConvention) -> Self {
		self.source_naming_convention = Some(convention);
		self
	}

	/// Convention for destination member names.
	pub fn destination_naming_convention(mut self, convention: NamingConvention) -> Self {
		self.destination_naming_convention = Some(convention);
		self
	}

	/// Replaces the default property filter.
	pub fn should_map_property(
		mut self,
		predicate: impl Fn(&MemberInfo) -> bool + Send + Sync + 'static,
	) -> Self {
		self.filters.should_map_property = Some(Arc::new(predicate));
		self
	}

	/// Replaces the default field filter.
	pub fn should_map_field(
		mut self,
		predicate: impl Fn(&MemberInfo) -> bool + Send + Sync + 'static,
	) -> Self {
		self.filters.should_map_field = Some(Arc::new(predicate));
		self
	}

	/// Replaces the default method filter.
	pub fn should_map_method(
		mut self,
		predicate: impl Fn(&MemberInfo) -> bool + Send + Sync + 'static,
	) -> Self {
		self.filters.should_map_method = Some(Arc::new(predicate));
		self
	}

	/// Replaces the default constructor filter.
	pub fn should_map_constructor(
		mut self,
		predicate: impl Fn(&MemberInfo) -> bool + Send + Sync + 'static,
	) -> Self {
		self.filters.should_map_constructor = Some(Arc::new(predicate));
		self
	}

	/// Resolved conventions, Pascal-case where unset.
	pub fn conventions(&self) -> ConventionPair {
		ConventionPair::new(
			self.source_naming_convention.clone().unwrap_or_default(),
			self.destination_naming_convention.clone().unwrap_or_default(),
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_override_resolution() {
		assert!(Override::Inherit.resolve(true));
		assert!(!Override::Inherit.resolve(false));
		assert!(!Override::Disabled.resolve(true));
		assert!(Override::Enabled.resolve(false));
		assert_eq!(Override::from(None), Override::Inherit);
		assert_eq!(Override::from(Some(false)).as_option(), Some(false));
		assert!(!Override::default().is_set());
	}

	#[test]
	fn test_default_member_filters() {
		let filters = MemberFilters::default();
		assert!(filters.should_map(&MemberInfo::new("Name", MemberKind::Property)));
		assert!(!filters.should_map(&MemberInfo::new("name", MemberKind::Field).private()));
		assert!(!filters.should_map(&MemberInfo::new("Create", MemberKind::Method).as_static()));
		assert!(filters.should_map(&MemberInfo::new("GetTotal", MemberKind::Method)));
		assert!(filters.should_map(&MemberInfo::new("new", MemberKind::Constructor)));
	}

	#[test]
	fn test_custom_filter_replaces_default() {
		let options = ProfileOptions::new("p").should_map_field(|m| !m.name.starts_with('_'));
		assert!(options.filters.should_map(&MemberInfo::new("secret", MemberKind::Field).private()));
		assert!(!options.filters.should_map(&MemberInfo::new("_cache", MemberKind::Field)));
	}

	#[test]
	fn test_conventions_default_to_pascal_case() {
		let options = ProfileOptions::new("p")
			.source_naming_convention(NamingConvention::lower_underscore());
		let pair = options.conventions();
		assert_eq!(pair.source, NamingConvention::lower_underscore());
		assert_eq!(pair.destination, NamingConvention::pascal_case());
	}
}
