//! Unsealed profile construction.
//!
//! A [`ProfileBuilder`] accepts every registration call during startup. All
//! collections are private and grow only. [`ProfileBuilder::seal`] consumes
//! the builder and copies its state into an immutable [`Profile`], so
//! mutation after hand-off does not compile.

use std::any::Any;
use std::sync::Arc;

use mapkit_naming::{MemberConfiguration, Side};

use crate::hooks::{PropertyHook, PropertyMapRecord, TypeMapHook, TypeMapRecord};
use crate::options::{MemberFilters, Override, ProfileOptions};
use crate::profile::Profile;
use crate::resolvers::{SourceResolver, SourceResolvers};
use crate::type_map::{MemberList, TypeMapConfig};
use crate::types::TypeRef;
use crate::value::ValueTransformer;

/// Destination prefix every new profile recognizes.
pub const DEFAULT_DESTINATION_PREFIX: &str = "Get";

/// Mutable registry of naming rules and type-map registrations.
pub struct ProfileBuilder {
	name: String,
	member_configurations: Vec<MemberConfiguration>,
	type_maps: Vec<TypeMapConfig>,
	open_generic: Vec<usize>,
	global_ignores: Vec<String>,
	type_map_hooks: Vec<TypeMapHook>,
	property_hooks: Vec<PropertyHook>,
	value_transformers: Vec<ValueTransformer>,
	source_resolvers: Vec<SourceResolver>,
	allow_null_destination_values: Override,
	allow_null_collections: Override,
	enable_null_propagation_for_queries: Override,
	constructor_mapping: Override,
	filters: MemberFilters,
}

impl ProfileBuilder {
	/// Creates a profile with default options.
	pub fn new(name: impl Into<String>) -> Self {
		Self::with_options(ProfileOptions::new(name))
	}

	/// Creates a profile from explicit construction options.
	///
	/// The default member configuration runs strip, split/join, substitute
	/// with the option's conventions and recognizes the destination prefix
	/// [`DEFAULT_DESTINATION_PREFIX`].
	pub fn with_options(options: ProfileOptions) -> Self {
		let mut default_config = MemberConfiguration::with_default_pipeline(options.conventions());
		default_config
			.strip_mut()
			.recognize_prefixes(Side::Destination, [DEFAULT_DESTINATION_PREFIX]);

		Self {
			name: options.name,
			member_configurations: vec![default_config],
			type_maps: Vec::new(),
			open_generic: Vec::new(),
			global_ignores: Vec::new(),
			type_map_hooks: Vec::new(),
			property_hooks: Vec::new(),
			value_transformers: Vec::new(),
			source_resolvers: Vec::new(),
			allow_null_destination_values: options.allow_null_destination_values,
			allow_null_collections: options.allow_null_collections,
			enable_null_propagation_for_queries: options.enable_null_propagation_for_queries,
			constructor_mapping: Override::Inherit,
			filters: options.filters,
		}
	}

	/// Name the profile is published under.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Registers a map validated against destination members.
	pub fn create_map(&mut self, source: TypeRef, destination: TypeRef) -> &mut TypeMapConfig {
		self.create_map_with(source, destination, MemberList::Destination)
	}

	/// Registers a map; records keep insertion order, and open-generic records
	/// are also indexed separately.
	pub fn create_map_with(
		&mut self,
		source: TypeRef,
		destination: TypeRef,
		member_list: MemberList,
	) -> &mut TypeMapConfig {
		let config = TypeMapConfig::new(source, destination, member_list);
		let idx = self.type_maps.len();
		if config.is_open_generic() {
			self.open_generic.push(idx);
		}
		tracing::debug!(
			profile = %self.name,
			source = %config.source(),
			destination = %config.destination(),
			open_generic = config.is_open_generic(),
			"type map registered"
		);
		self.type_maps.push(config);
		&mut self.type_maps[idx]
	}

	/// Appends an empty member configuration using the profile's conventions.
	///
	/// Convenience methods keep targeting the first configuration.
	pub fn add_member_configuration(&mut self) -> &mut MemberConfiguration {
		let conventions = self.default_member_configuration().conventions().clone();
		self.member_configurations
			.push(MemberConfiguration::new(conventions));
		let last = self.member_configurations.len() - 1;
		&mut self.member_configurations[last]
	}

	/// The configuration targeted by the convenience methods.
	pub fn default_member_configuration(&self) -> &MemberConfiguration {
		&self.member_configurations[0]
	}

	/// Mutable access to the default configuration.
	pub fn default_member_configuration_mut(&mut self) -> &mut MemberConfiguration {
		&mut self.member_configurations[0]
	}

	/// Mutable access to the configuration at `index`, if registered.
	pub fn member_configuration_mut(&mut self, index: usize) -> Option<&mut MemberConfiguration> {
		self.member_configurations.get_mut(index)
	}

	/// Member configurations in registration order; index 0 is the default.
	pub fn member_configurations(&self) -> &[MemberConfiguration] {
		&self.member_configurations
	}

	/// Empties the default configuration's source prefixes only.
	pub fn clear_prefixes(&mut self) -> &mut Self {
		self.default_member_configuration_mut()
			.strip_mut()
			.clear_prefixes(Side::Source);
		self
	}

	/// Adds source-side prefixes to the default configuration.
	pub fn recognize_prefixes<I, S>(&mut self, prefixes: I) -> &mut Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.default_member_configuration_mut()
			.strip_mut()
			.recognize_prefixes(Side::Source, prefixes);
		self
	}

	/// Adds source-side postfixes to the default configuration.
	pub fn recognize_postfixes<I, S>(&mut self, postfixes: I) -> &mut Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.default_member_configuration_mut()
			.strip_mut()
			.recognize_postfixes(Side::Source, postfixes);
		self
	}

	/// Adds destination-side prefixes to the default configuration.
	pub fn recognize_destination_prefixes<I, S>(&mut self, prefixes: I) -> &mut Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.default_member_configuration_mut()
			.strip_mut()
			.recognize_prefixes(Side::Destination, prefixes);
		self
	}

	/// Adds destination-side postfixes to the default configuration.
	pub fn recognize_destination_postfixes<I, S>(&mut self, postfixes: I) -> &mut Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.default_member_configuration_mut()
			.strip_mut()
			.recognize_postfixes(Side::Destination, postfixes);
		self
	}

	/// Treats `original` as `alias` when matching names.
	pub fn recognize_alias(
		&mut self,
		original: impl Into<String>,
		alias: impl Into<String>,
	) -> &mut Self {
		self.default_member_configuration_mut()
			.substitutions_mut()
			.push(original, alias);
		self
	}

	/// Replaces `original` with `new_value` when matching names.
	///
	/// Registers the same kind of entry as [`Self::recognize_alias`].
	pub fn replace_member_name(
		&mut self,
		original: impl Into<String>,
		new_value: impl Into<String>,
	) -> &mut Self {
		self.default_member_configuration_mut()
			.substitutions_mut()
			.push(original, new_value);
		self
	}

	/// Excludes member names starting with `prefix` (ordinal, case-sensitive).
	pub fn add_global_ignore(&mut self, prefix: impl Into<String>) -> &mut Self {
		self.global_ignores.push(prefix.into());
		self
	}

	/// Runs `hook` on every type map the plan builder constructs.
	pub fn for_all_maps(
		&mut self,
		hook: impl Fn(&mut dyn TypeMapRecord) + Send + Sync + 'static,
	) -> &mut Self {
		self.type_map_hooks.push(TypeMapHook::new(hook));
		self
	}

	/// Runs `action` on every property map for which `condition` holds.
	pub fn for_all_property_maps(
		&mut self,
		condition: impl Fn(&dyn PropertyMapRecord) -> bool + Send + Sync + 'static,
		action: impl Fn(&mut dyn PropertyMapRecord) + Send + Sync + 'static,
	) -> &mut Self {
		self.property_hooks.push(PropertyHook::new(condition, action));
		self
	}

	/// Registers fallback source-value providers.
	///
	/// A resolver whose name and source type are already registered replaces
	/// the earlier one in place, as inside a [`SourceResolvers`] set.
	pub fn include_source_resolvers(&mut self, resolvers: SourceResolvers) -> &mut Self {
		for resolver in resolvers {
			let existing = self.source_resolvers.iter_mut().find(|r| {
				r.name() == resolver.name() && r.source_type() == resolver.source_type()
			});
			match existing {
				Some(slot) => *slot = resolver,
				None => self.source_resolvers.push(resolver),
			}
		}
		self
	}

	/// Rewrites every mapped value of type `T`.
	pub fn add_value_transformer<T, F>(&mut self, transform: F) -> &mut Self
	where
		T: Any,
		F: Fn(&mut T) + Send + Sync + 'static,
	{
		self.value_transformers.push(ValueTransformer::new(transform));
		self
	}

	/// Marks constructor mapping as disabled for this profile.
	pub fn disable_constructor_mapping(&mut self) -> &mut Self {
		self.constructor_mapping = Override::Disabled;
		self
	}

	/// Overrides whether null source values may be written to destinations.
	pub fn set_allow_null_destination_values(&mut self, value: impl Into<Override>) -> &mut Self {
		self.allow_null_destination_values = value.into();
		self
	}

	/// Overrides whether null collections are kept instead of emptied.
	pub fn set_allow_null_collections(&mut self, value: impl Into<Override>) -> &mut Self {
		self.allow_null_collections = value.into();
		self
	}

	/// Overrides null propagation for query projections.
	pub fn set_enable_null_propagation_for_queries(
		&mut self,
		value: impl Into<Override>,
	) -> &mut Self {
		self.enable_null_propagation_for_queries = value.into();
		self
	}

	/// Copies the accumulated state into an immutable [`Profile`].
	pub fn seal(self) -> Profile {
		tracing::debug!(
			profile = %self.name,
			type_maps = self.type_maps.len(),
			open_generic = self.open_generic.len(),
			member_configurations = self.member_configurations.len(),
			"profile sealed"
		);
		Profile {
			name: Arc::from(self.name),
			member_configurations: self.member_configurations.into(),
			type_maps: self.type_maps.into(),
			open_generic: self.open_generic.into(),
			global_ignores: self.global_ignores.into(),
			type_map_hooks: self.type_map_hooks.into(),
			property_hooks: self.property_hooks.into(),
			value_transformers: self.value_transformers.into(),
			source_resolvers: self.source_resolvers.into(),
			allow_null_destination_values: self.allow_null_destination_values,
			allow_null_collections: self.allow_null_collections,
			enable_null_propagation_for_queries: self.enable_null_propagation_for_queries,
			constructor_mapping: self.constructor_mapping,
			filters: self.filters,
		}
	}
}

impl std::fmt::Debug for ProfileBuilder {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ProfileBuilder")
			.field("name", &self.name)
			.field("member_configurations", &self.member_configurations.len())
			.field("type_maps", &self.type_maps.len())
			.finish_non_exhaustive()
	}
}
