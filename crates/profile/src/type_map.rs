//! Type-map registration records.

use crate::types::TypeRef;

/// Which side's members must all be accounted for when a map is validated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MemberList {
	/// Every source member must be consumed.
	Source,
	/// Every destination member must be populated.
	#[default]
	Destination,
}

/// A registered intent to map `source` to `destination`.
///
/// Returned mutably by [`crate::ProfileBuilder::create_map`] so callers can
/// refine it while the profile is unsealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMapConfig {
	source: TypeRef,
	destination: TypeRef,
	member_list: MemberList,
	ignored_members: Vec<String>,
	reverse: bool,
}

impl TypeMapConfig {
	/// Creates an unrefined record.
	pub(crate) fn new(source: TypeRef, destination: TypeRef, member_list: MemberList) -> Self {
		Self {
			source,
			destination,
			member_list,
			ignored_members: Vec::new(),
			reverse: false,
		}
	}

	/// Source type descriptor.
	pub fn source(&self) -> &TypeRef {
		&self.source
	}

	/// Destination type descriptor.
	pub fn destination(&self) -> &TypeRef {
		&self.destination
	}

	/// Side validated for completeness.
	pub fn member_list(&self) -> MemberList {
		self.member_list
	}

	/// True when either side is an unbound generic definition.
	pub fn is_open_generic(&self) -> bool {
		self.source.is_generic_definition() || self.destination.is_generic_definition()
	}

	/// Excludes a destination member from automatic matching for this map only.
	pub fn ignore_member(&mut self, name: impl Into<String>) -> &mut Self {
		self.ignored_members.push(name.into());
		self
	}

	/// Destination members excluded for this map, in registration order.
	pub fn ignored_members(&self) -> &[String] {
		&self.ignored_members
	}

	/// True when `name` was excluded with [`Self::ignore_member`].
	pub fn is_member_ignored(&self, name: &str) -> bool {
		self.ignored_members.iter().any(|m| m == name)
	}

	/// Requests that the builder also derive the `destination -> source` map.
	pub fn reverse_map(&mut self) -> &mut Self {
		self.reverse = true;
		self
	}

	/// True after [`Self::reverse_map`].
	pub fn is_reverse_mapped(&self) -> bool {
		self.reverse
	}

	/// True when this open-generic record can be specialized to the closed pair.
	pub fn specializes_to(&self, source: &TypeRef, destination: &TypeRef) -> bool {
		if !self.is_open_generic() {
			return false;
		}
		let side_matches = |registered: &TypeRef, closed: &TypeRef| {
			if registered.is_generic_definition() {
				closed.is_instance_of(registered)
			} else {
				registered == closed
			}
		};
		side_matches(&self.source, source) && side_matches(&self.destination, destination)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_open_generic_detection() {
		let open = TypeMapConfig::new(
			TypeRef::generic_definition("Page", 1),
			TypeRef::named("PageDto"),
			MemberList::Destination,
		);
		let closed = TypeMapConfig::new(
			TypeRef::constructed("Page", [TypeRef::named("Order")]),
			TypeRef::named("PageDto"),
			MemberList::Destination,
		);
		assert!(open.is_open_generic());
		assert!(!closed.is_open_generic());
	}

	#[test]
	fn test_specializes_to() {
		let open = TypeMapConfig::new(
			TypeRef::generic_definition("Page", 1),
			TypeRef::generic_definition("PageDto", 1),
			MemberList::Source,
		);
		let order = TypeRef::named("Order");
		assert!(open.specializes_to(
			&TypeRef::constructed("Page", [order.clone()]),
			&TypeRef::constructed("PageDto", [order.clone()]),
		));
		assert!(!open.specializes_to(
			&TypeRef::constructed("Page", [order.clone()]),
			&TypeRef::named("PageDto"),
		));
	}

	#[test]
	fn test_ignore_and_reverse() {
		let mut map = TypeMapConfig::new(
			TypeRef::named("Order"),
			TypeRef::named("OrderDto"),
			MemberList::default(),
		);
		map.ignore_member("Audit").reverse_map();
		assert!(map.is_member_ignored("Audit"));
		assert!(!map.is_member_ignored("AuditLog"));
		assert!(map.is_reverse_mapped());
		assert_eq!(map.member_list(), MemberList::Destination);
	}
}
