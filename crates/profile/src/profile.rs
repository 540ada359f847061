//! Sealed, read-only profiles.
//!
//! # Role
//!
//! A [`Profile`] is the snapshot handed to the plan builder and shared with
//! every mapping worker. It contains no mutation logic.
//!
//! # Invariants
//!
//! - Every sequence is an `Arc<[T]>` frozen at [`crate::ProfileBuilder::seal`];
//!   clones share storage and readers need no synchronization.
//! - `member_configurations()` is never empty; index 0 is the default.
//! - `open_generic_maps()` is a subset of `type_maps()` in registration order.

use std::any::{Any, TypeId};
use std::sync::Arc;

use mapkit_naming::MemberConfiguration;

use crate::hooks::{PropertyHook, TypeMapHook, TypeMapRecord};
use crate::options::{MemberFilters, MemberInfo, Override};
use crate::resolvers::SourceResolver;
use crate::type_map::TypeMapConfig;
use crate::types::TypeRef;
use crate::value::ValueTransformer;

/// Immutable naming rules, type-map records and hooks of one profile.
#[derive(Clone)]
pub struct Profile {
	pub(crate) name: Arc<str>,
	pub(crate) member_configurations: Arc<[MemberConfiguration]>,
	pub(crate) type_maps: Arc<[TypeMapConfig]>,
	pub(crate) open_generic: Arc<[usize]>,
	pub(crate) global_ignores: Arc<[String]>,
	pub(crate) type_map_hooks: Arc<[TypeMapHook]>,
	pub(crate) property_hooks: Arc<[PropertyHook]>,
	pub(crate) value_transformers: Arc<[ValueTransformer]>,
	pub(crate) source_resolvers: Arc<[SourceResolver]>,
	pub(crate) allow_null_destination_values: Override,
	pub(crate) allow_null_collections: Override,
	pub(crate) enable_null_propagation_for_queries: Override,
	pub(crate) constructor_mapping: Override,
	pub(crate) filters: MemberFilters,
}

impl Profile {
	/// Name the profile was built with.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Member configurations in registration order.
	pub fn member_configurations(&self) -> &[MemberConfiguration] {
		&self.member_configurations
	}

	/// The first member configuration.
	pub fn default_member_configuration(&self) -> &MemberConfiguration {
		&self.member_configurations[0]
	}

	/// Type-map records in registration order, which is resolution precedence.
	pub fn type_maps(&self) -> &[TypeMapConfig] {
		&self.type_maps
	}

	/// Records with an unbound generic definition on either side.
	pub fn open_generic_maps(&self) -> impl Iterator<Item = &TypeMapConfig> + '_ {
		self.open_generic.iter().map(|&idx| &self.type_maps[idx])
	}

	/// First open-generic record that specializes to the closed pair.
	pub fn find_open_generic(
		&self,
		source: &TypeRef,
		destination: &TypeRef,
	) -> Option<&TypeMapConfig> {
		self.open_generic_maps()
			.find(|m| m.specializes_to(source, destination))
	}

	/// Global ignore prefixes in registration order.
	pub fn global_ignores(&self) -> &[String] {
		&self.global_ignores
	}

	/// True when `name` starts with any global ignore prefix.
	pub fn is_ignored(&self, name: &str) -> bool {
		self.global_ignores
			.iter()
			.any(|prefix| name.starts_with(prefix.as_str()))
	}

	/// Returns the first destination candidate matching `source_name`.
	///
	/// Member configurations are tried in order; the first configuration that
	/// produces any match decides. Ignored names on either side never match.
	pub fn find_destination_match<'a, I>(&self, source_name: &str, candidates: I) -> Option<&'a str>
	where
		I: IntoIterator<Item = &'a str>,
		I::IntoIter: Clone,
	{
		if self.is_ignored(source_name) {
			return None;
		}
		let candidates = candidates.into_iter();
		self.member_configurations.iter().find_map(|config| {
			candidates
				.clone()
				.filter(|c| !self.is_ignored(c))
				.find(|c| config.matches(source_name, c))
		})
	}

	/// Whole-type-map hooks in registration order.
	pub fn type_map_hooks(&self) -> &[TypeMapHook] {
		&self.type_map_hooks
	}

	/// Property hooks in registration order.
	pub fn property_hooks(&self) -> &[PropertyHook] {
		&self.property_hooks
	}

	/// Runs every type-map hook on `type_map`, then every property hook on
	/// each of its properties, all in registration order.
	pub fn apply_hooks(&self, type_map: &mut dyn TypeMapRecord) {
		for hook in self.type_map_hooks.iter() {
			hook.apply(&mut *type_map);
		}
		if self.property_hooks.is_empty() {
			return;
		}
		type_map.for_each_property(&mut |property| {
			for hook in self.property_hooks.iter() {
				hook.apply(&mut *property);
			}
		});
	}

	/// Value transformers in registration order.
	pub fn value_transformers(&self) -> &[ValueTransformer] {
		&self.value_transformers
	}

	/// Applies every transformer registered for `T`, in registration order.
	pub fn transform_value<T: Any>(&self, value: &mut T) {
		for t in self.value_transformers.iter().filter(|t| t.applies_to::<T>()) {
			t.apply(&mut *value);
		}
	}

	/// Source resolvers in registration order.
	pub fn source_resolvers(&self) -> &[SourceResolver] {
		&self.source_resolvers
	}

	/// Resolver registered under `name` for sources of type `source`.
	pub fn find_source_resolver(&self, name: &str, source: TypeId) -> Option<&SourceResolver> {
		self.source_resolvers
			.iter()
			.find(|r| r.name() == name && r.source_type() == source)
	}

	/// Null destination values switch.
	pub fn allow_null_destination_values(&self) -> Override {
		self.allow_null_destination_values
	}

	/// Null collections switch.
	pub fn allow_null_collections(&self) -> Override {
		self.allow_null_collections
	}

	/// Null propagation switch for query projections.
	pub fn enable_null_propagation_for_queries(&self) -> Override {
		self.enable_null_propagation_for_queries
	}

	/// `Disabled` after [`crate::ProfileBuilder::disable_constructor_mapping`].
	pub fn constructor_mapping(&self) -> Override {
		self.constructor_mapping
	}

	/// Applies the profile's member filters to `member`.
	pub fn should_map(&self, member: &MemberInfo) -> bool {
		self.filters.should_map(member)
	}
}

impl std::fmt::Debug for Profile {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Profile")
			.field("name", &self.name)
			.field("member_configurations", &self.member_configurations.len())
			.field("type_maps", &self.type_maps.len())
			.field("open_generic", &self.open_generic.len())
			.field("global_ignores", &self.global_ignores)
			.finish_non_exhaustive()
	}
}
