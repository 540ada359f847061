//! Published profiles with atomic snapshot publication.
//!
//! # Concurrency
//!
//! - **Reads:** Wait-free (atomic load of the current table).
//! - **Writes:** Lock-free, linearizable (CAS retry loop in
//!   [`ProfileRegistry::publish`]).

use std::sync::Arc;

use arc_swap::ArcSwap;
use rustc_hash::FxHashMap as HashMap;

use crate::error::{ProfileError, Result};
use crate::profile::Profile;

/// Immutable table of sealed profiles in publication order.
#[derive(Clone, Default)]
pub struct ProfileTable {
	profiles: Arc<[Profile]>,
	by_name: Arc<HashMap<Arc<str>, usize>>,
}

impl ProfileTable {
	/// Profile published under `name`.
	pub fn get(&self, name: &str) -> Option<&Profile> {
		self.by_name.get(name).map(|&idx| &self.profiles[idx])
	}

	/// Profiles in publication order.
	pub fn iter(&self) -> impl Iterator<Item = &Profile> {
		self.profiles.iter()
	}

	/// Number of published profiles.
	pub fn len(&self) -> usize {
		self.profiles.len()
	}

	/// True when nothing has been published.
	pub fn is_empty(&self) -> bool {
		self.profiles.is_empty()
	}

	fn with(&self, profile: Profile) -> Self {
		let mut profiles = self.profiles.to_vec();
		let mut by_name = (*self.by_name).clone();
		by_name.insert(profile.name.clone(), profiles.len());
		profiles.push(profile);
		Self {
			profiles: profiles.into(),
			by_name: Arc::new(by_name),
		}
	}
}

/// Shared container of sealed profiles, readable from any thread.
pub struct ProfileRegistry {
	snap: ArcSwap<ProfileTable>,
}

impl ProfileRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self {
			snap: ArcSwap::from_pointee(ProfileTable::default()),
		}
	}

	/// Publishes a sealed profile. Names are unique.
	pub fn publish(&self, profile: Profile) -> Result<()> {
		loop {
			let old = self.snap.load_full();
			if old.get(profile.name()).is_some() {
				return Err(ProfileError::DuplicateProfile {
					name: profile.name().to_owned(),
				});
			}

			let new = Arc::new(old.with(profile.clone()));
			let prev = self.snap.compare_and_swap(&old, new);
			if Arc::ptr_eq(&prev, &old) {
				tracing::debug!(profile = profile.name(), total = old.len() + 1, "profile published");
				return Ok(());
			}
			// CAS failed, retry with updated snapshot
		}
	}

	/// Current table; holding it pins that version.
	pub fn snapshot(&self) -> Arc<ProfileTable> {
		self.snap.load_full()
	}

	/// Clone of the profile published under `name`; cheap, shares storage.
	pub fn get(&self, name: &str) -> Option<Profile> {
		self.snap.load().get(name).cloned()
	}

	/// Number of published profiles.
	pub fn len(&self) -> usize {
		self.snap.load().len()
	}

	/// True when nothing has been published.
	pub fn is_empty(&self) -> bool {
		self.snap.load().is_empty()
	}
}

impl Default for ProfileRegistry {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use std::thread;

	use super::*;
	use crate::ProfileBuilder;

	#[test]
	fn test_publish_and_lookup() {
		let registry = ProfileRegistry::new();
		registry.publish(ProfileBuilder::new("orders").seal()).unwrap();
		registry.publish(ProfileBuilder::new("billing").seal()).unwrap();

		assert_eq!(registry.len(), 2);
		assert_eq!(registry.get("billing").map(|p| p.name().to_owned()).as_deref(), Some("billing"));
		let names: Vec<_> = registry.snapshot().iter().map(|p| p.name().to_owned()).collect();
		assert_eq!(names, ["orders", "billing"]);
	}

	#[test]
	fn test_duplicate_name_rejected() {
		let registry = ProfileRegistry::new();
		registry.publish(ProfileBuilder::new("orders").seal()).unwrap();
		let err = registry.publish(ProfileBuilder::new("orders").seal()).unwrap_err();
		assert!(matches!(err, ProfileError::DuplicateProfile { ref name } if name == "orders"));
		assert_eq!(registry.len(), 1);
	}

	#[test]
	fn test_snapshot_survives_later_publication() {
		let registry = ProfileRegistry::new();
		registry.publish(ProfileBuilder::new("a").seal()).unwrap();
		let pinned = registry.snapshot();
		registry.publish(ProfileBuilder::new("b").seal()).unwrap();
		assert_eq!(pinned.len(), 1);
		assert!(pinned.get("b").is_none());
		assert_eq!(registry.len(), 2);
	}

	#[test]
	fn test_no_lost_updates() {
		let registry = Arc::new(ProfileRegistry::new());
		let handles: Vec<_> = (0..8)
			.map(|i| {
				let registry = registry.clone();
				thread::spawn(move || {
					for j in 0..16 {
						registry
							.publish(ProfileBuilder::new(format!("p{i}-{j}")).seal())
							.unwrap();
					}
				})
			})
			.collect();
		for h in handles {
			h.join().unwrap();
		}
		assert_eq!(registry.len(), 8 * 16);
		assert!(registry.get("p7-15").is_some());
	}
}
