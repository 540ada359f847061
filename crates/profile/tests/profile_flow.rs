//! End-to-end profile flow: settings, code registration, sealing, publication
//! and the lookups a plan builder performs against a sealed profile.

use std::sync::Arc;
use std::thread;

use mapkit_profile::naming::{NamingConvention, Side};
use mapkit_profile::{
	Override, ProfileBuilder, ProfileError, ProfileOptions, ProfileSettings,
	PropertyMapRecord, SettingsFile, TypeMapRecord, TypeRef,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

/// Property map the way a plan builder would produce it.
struct PlannedProperty {
	destination: String,
	source: Option<String>,
	ignored: bool,
}

impl PropertyMapRecord for PlannedProperty {
	fn destination_name(&self) -> &str {
		&self.destination
	}

	fn source_name(&self) -> Option<&str> {
		self.source.as_deref()
	}

	fn ignore(&mut self) {
		self.ignored = true;
	}

	fn is_ignored(&self) -> bool {
		self.ignored
	}
}

struct PlannedMap {
	source: TypeRef,
	destination: TypeRef,
	properties: Vec<PlannedProperty>,
}

impl TypeMapRecord for PlannedMap {
	fn source_type(&self) -> &TypeRef {
		&self.source
	}

	fn destination_type(&self) -> &TypeRef {
		&self.destination
	}

	fn for_each_property(&mut self, visit: &mut dyn FnMut(&mut dyn PropertyMapRecord)) {
		for p in &mut self.properties {
			visit(p);
		}
	}
}

/// Pairs every destination member with a source member the way a plan
/// builder does: first match through the profile wins.
fn plan(
	profile: &mapkit_profile::Profile,
	source: (&str, &[&str]),
	destination: (&str, &[&str]),
) -> PlannedMap {
	let properties = destination
		.1
		.iter()
		.map(|&dst| PlannedProperty {
			destination: dst.to_owned(),
			source: source
				.1
				.iter()
				.copied()
				.find(|src| profile.find_destination_match(src, [dst]).is_some())
				.map(str::to_owned),
			ignored: profile.is_ignored(dst),
		})
		.collect();
	let mut map = PlannedMap {
		source: TypeRef::named(source.0),
		destination: TypeRef::named(destination.0),
		properties,
	};
	profile.apply_hooks(&mut map);
	map
}

const SETTINGS: &str = r#"
	[[profile]]
	name = "rows"
	source_naming_convention = "lower_underscore"
	destination_postfixes = ["Dto"]
	global_ignores = ["Internal"]
	aliases = [{ original = "Ident", alias = "Id" }]
	allow_null_collections = false
"#;

#[test]
fn settings_and_code_registration_compose() {
	let mut file = SettingsFile::from_toml_str(SETTINGS).unwrap();
	let mut builder = file.profiles.remove(0).into_builder();
	builder.create_map(TypeRef::named("OrderRow"), TypeRef::named("Order"));
	builder.for_all_property_maps(
		|p| p.source_name().is_none(),
		|p| p.ignore(),
	);
	let profile = builder.seal();

	let map = plan(
		&profile,
		("OrderRow", &["ident", "customer_name", "total_amount", "internal_flag"]),
		("Order", &["Id", "GetCustomerName", "TotalAmountDto", "InternalFlag", "Notes"]),
	);

	let summary: Vec<_> = map
		.properties
		.iter()
		.map(|p| (p.destination.as_str(), p.source.as_deref(), p.ignored))
		.collect();
	assert_eq!(summary, [
		("Id", Some("ident"), false),
		("GetCustomerName", Some("customer_name"), false),
		("TotalAmountDto", Some("total_amount"), false),
		("InternalFlag", None, true),
		("Notes", None, true),
	]);
	assert!(!profile.allow_null_collections().resolve(true));
	assert_eq!(profile.allow_null_destination_values(), Override::Inherit);
}

#[rstest]
#[case("Identifier", "GetId", true)]
#[case("GetId", "Identifier", false)]
#[case("Identifier", "GetIdentifier", true)]
#[case("Id", "Identifier", true)]
#[case("Name", "GetName", true)]
fn alias_after_destination_prefix(
	#[case] source: &str,
	#[case] destination: &str,
	#[case] expected: bool,
) {
	let mut builder = ProfileBuilder::new("aliases");
	builder.recognize_alias("Id", "Identifier");
	let profile = builder.seal();
	assert_eq!(
		profile.default_member_configuration().matches(source, destination),
		expected
	);
}

#[test]
fn destination_convention_drives_joining() {
	let profile = ProfileBuilder::with_options(
		ProfileOptions::new("snake-out")
			.destination_naming_convention(NamingConvention::lower_underscore()),
	)
	.seal();

	assert_eq!(
		profile
			.default_member_configuration()
			.resolve("CustomerName", Side::Source),
		"customer_name"
	);
	assert_eq!(
		profile.find_destination_match("CustomerName", ["customer_id", "customer_name"]),
		Some("customer_name")
	);
}

#[test]
fn registry_shares_sealed_profiles_across_threads() {
	let registry = Arc::new(SettingsFile::from_toml_str(SETTINGS).unwrap().into_registry().unwrap());

	let err = registry
		.publish(
			ProfileSettings {
				name: "rows".into(),
				..ProfileSettings::default()
			}
			.into_builder()
			.seal(),
		)
		.unwrap_err();
	assert!(matches!(err, ProfileError::DuplicateProfile { .. }));

	let handles: Vec<_> = (0..4)
		.map(|_| {
			let registry = registry.clone();
			thread::spawn(move || {
				let profile = registry.get("rows").unwrap();
				profile.find_destination_match("ident", ["Name", "Id"]).map(str::to_owned)
			})
		})
		.collect();
	for h in handles {
		assert_eq!(h.join().unwrap().as_deref(), Some("Id"));
	}
}
