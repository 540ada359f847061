//! File-backed profile settings.
//!
//! Settings describe the data-only part of a profile in TOML. Hooks, member
//! filters, resolvers and value transformers are code and are registered on
//! the resulting [`ProfileBuilder`].
//!
//! ```toml
//! [[profile]]
//! name = "orders"
//! source_naming_convention = "lower_underscore"
//! allow_null_collections = false
//! prefixes = ["Get"]
//! destination_postfixes = ["Dto"]
//! global_ignores = ["Internal"]
//! aliases = [{ original = "ID", alias = "Id" }]
//! ```

use std::path::Path;

use mapkit_naming::NamingConvention;
use serde::Deserialize;

use crate::builder::ProfileBuilder;
use crate::error::{ProfileError, Result};
use crate::options::{Override, ProfileOptions};
use crate::registry::ProfileRegistry;

/// Well-known naming conventions addressable from settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConventionName {
	ExactMatch,
	PascalCase,
	LowerUnderscore,
}

impl ConventionName {
	/// Returns the well-known convention.
	pub fn convention(self) -> NamingConvention {
		match self {
			Self::ExactMatch => NamingConvention::exact_match(),
			Self::PascalCase => NamingConvention::pascal_case(),
			Self::LowerUnderscore => NamingConvention::lower_underscore(),
		}
	}
}

/// An `original -> alias` substitution entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AliasSetting {
	/// Name as it appears on the member.
	pub original: String,
	/// Name to treat it as.
	#[serde(alias = "new_value")]
	pub alias: String,
}

/// Data-only description of one profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileSettings {
	/// Registry key.
	pub name: String,
	pub allow_null_destination_values: Override,
	pub allow_null_collections: Override,
	pub enable_null_propagation_for_queries: Override,
	pub source_naming_convention: Option<ConventionName>,
	pub destination_naming_convention: Option<ConventionName>,
	/// Applied before `prefixes`.
	pub clear_prefixes: bool,
	pub prefixes: Vec<String>,
	pub postfixes: Vec<String>,
	pub destination_prefixes: Vec<String>,
	pub destination_postfixes: Vec<String>,
	pub aliases: Vec<AliasSetting>,
	pub replacements: Vec<AliasSetting>,
	pub global_ignores: Vec<String>,
	pub disable_constructor_mapping: bool,
}

impl ProfileSettings {
	/// Parses one profile from TOML.
	pub fn from_toml_str(text: &str) -> Result<Self> {
		Ok(toml::from_str(text)?)
	}

	/// Construction options carried by these settings.
	pub fn options(&self) -> ProfileOptions {
		ProfileOptions {
			name: self.name.clone(),
			allow_null_destination_values: self.allow_null_destination_values,
			allow_null_collections: self.allow_null_collections,
			enable_null_propagation_for_queries: self.enable_null_propagation_for_queries,
			source_naming_convention: self.source_naming_convention.map(ConventionName::convention),
			destination_naming_convention: self
				.destination_naming_convention
				.map(ConventionName::convention),
			..ProfileOptions::default()
		}
	}

	/// Builds an unsealed profile with every setting applied.
	pub fn into_builder(self) -> ProfileBuilder {
		let mut builder = ProfileBuilder::with_options(self.options());
		self.apply(&mut builder);
		builder
	}

	/// Applies the registration part of these settings to `builder`.
	pub fn apply(self, builder: &mut ProfileBuilder) {
		if self.clear_prefixes {
			builder.clear_prefixes();
		}
		builder
			.recognize_prefixes(self.prefixes)
			.recognize_postfixes(self.postfixes)
			.recognize_destination_prefixes(self.destination_prefixes)
			.recognize_destination_postfixes(self.destination_postfixes);
		for a in self.aliases {
			builder.recognize_alias(a.original, a.alias);
		}
		for r in self.replacements {
			builder.replace_member_name(r.original, r.alias);
		}
		for prefix in self.global_ignores {
			builder.add_global_ignore(prefix);
		}
		if self.disable_constructor_mapping {
			builder.disable_constructor_mapping();
		}
	}
}

/// A settings file holding any number of `[[profile]]` tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsFile {
	/// Profiles in file order.
	#[serde(rename = "profile")]
	pub profiles: Vec<ProfileSettings>,
}

impl SettingsFile {
	/// Parses a settings file from TOML text.
	pub fn from_toml_str(text: &str) -> Result<Self> {
		Ok(toml::from_str(text)?)
	}

	/// Reads and parses the settings file at `path`.
	pub fn from_path(path: &Path) -> Result<Self> {
		let text = std::fs::read_to_string(path).map_err(|error| ProfileError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&text)
	}

	/// Seals every profile and publishes it into a new registry.
	pub fn into_registry(self) -> Result<ProfileRegistry> {
		let registry = ProfileRegistry::new();
		for settings in self.profiles {
			registry.publish(settings.into_builder().seal())?;
		}
		Ok(registry)
	}
}
