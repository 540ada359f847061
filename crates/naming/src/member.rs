//! Member configurations: ordered name-transformer pipelines.
//!
//! # Resolution
//!
//! [`MemberConfiguration::resolve`] runs every transformer in registration
//! order, each consuming the previous output. The default pipeline built by
//! [`MemberConfiguration::with_default_pipeline`] is strip, split/join,
//! substitute.
//!
//! A name that resolves to nothing useful is a non-match, never an error.

use std::borrow::Cow;

use crate::convention::{ConventionPair, NamingConvention};
use crate::transform::{NameTransformer, PrePostfixStrip, Side, Substitutions};

/// An ordered pipeline of [`NameTransformer`]s plus the conventions that
/// drive its split step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberConfiguration {
	transformers: Vec<NameTransformer>,
	conventions: ConventionPair,
}

impl MemberConfiguration {
	/// Creates a configuration with no transformers; it resolves every name to
	/// itself until steps are pushed.
	pub fn new(conventions: ConventionPair) -> Self {
		Self {
			transformers: Vec::new(),
			conventions,
		}
	}

	/// Creates the standard strip, split/join, substitute pipeline.
	pub fn with_default_pipeline(conventions: ConventionPair) -> Self {
		let mut config = Self::new(conventions);
		config.transformers = vec![
			NameTransformer::PrePostfixStrip(PrePostfixStrip::default()),
			NameTransformer::Split(config.conventions.clone()),
			NameTransformer::Substitute(Substitutions::default()),
		];
		config
	}

	/// The conventions used by split steps.
	pub fn conventions(&self) -> &ConventionPair {
		&self.conventions
	}

	/// Convention for source member names.
	pub fn source_convention(&self) -> &NamingConvention {
		&self.conventions.source
	}

	/// Convention for destination member names.
	pub fn destination_convention(&self) -> &NamingConvention {
		&self.conventions.destination
	}

	/// Replaces the conventions, including those held by existing split steps.
	pub fn set_conventions(&mut self, conventions: ConventionPair) -> &mut Self {
		for t in &mut self.transformers {
			if let NameTransformer::Split(pair) = t {
				*pair = conventions.clone();
			}
		}
		self.conventions = conventions;
		self
	}

	/// Transformers in pipeline order.
	pub fn transformers(&self) -> &[NameTransformer] {
		&self.transformers
	}

	/// Appends a step to the end of the pipeline.
	pub fn push(&mut self, transformer: NameTransformer) -> &mut Self {
		self.transformers.push(transformer);
		self
	}

	/// Appends a split step using this configuration's conventions.
	pub fn push_split(&mut self) -> &mut Self {
		let pair = self.conventions.clone();
		self.push(NameTransformer::Split(pair))
	}

	/// The first strip step, if any.
	pub fn strip(&self) -> Option<&PrePostfixStrip> {
		self.transformers.iter().find_map(|t| match t {
			NameTransformer::PrePostfixStrip(s) => Some(s),
			_ => None,
		})
	}

	/// The first substitute step, if any.
	pub fn substitutions(&self) -> Option<&Substitutions> {
		self.transformers.iter().find_map(|t| match t {
			NameTransformer::Substitute(s) => Some(s),
			_ => None,
		})
	}

	/// The first strip step, inserted at the front of the pipeline if absent.
	pub fn strip_mut(&mut self) -> &mut PrePostfixStrip {
		let idx = match self
			.transformers
			.iter()
			.position(|t| matches!(t, NameTransformer::PrePostfixStrip(_)))
		{
			Some(idx) => idx,
			None => {
				self.transformers
					.insert(0, NameTransformer::PrePostfixStrip(PrePostfixStrip::default()));
				0
			}
		};
		match &mut self.transformers[idx] {
			NameTransformer::PrePostfixStrip(s) => s,
			_ => unreachable!("position points at a strip step"),
		}
	}

	/// The first substitute step, appended to the pipeline if absent.
	pub fn substitutions_mut(&mut self) -> &mut Substitutions {
		let idx = match self
			.transformers
			.iter()
			.position(|t| matches!(t, NameTransformer::Substitute(_)))
		{
			Some(idx) => idx,
			None => {
				self.transformers
					.push(NameTransformer::Substitute(Substitutions::default()));
				self.transformers.len() - 1
			}
		};
		match &mut self.transformers[idx] {
			NameTransformer::Substitute(s) => s,
			_ => unreachable!("position points at a substitute step"),
		}
	}

	/// Resolves `name`, a member of `side`, to the candidate name it would
	/// carry on the opposite side.
	pub fn resolve(&self, name: &str, side: Side) -> String {
		let mut current = Cow::Borrowed(name);
		for t in &self.transformers {
			current = t.apply(current, side);
		}
		tracing::trace!(name, ?side, resolved = %current, "resolved member name");
		current.into_owned()
	}

	/// Returns true when the candidate sets of both names intersect.
	///
	/// A name's candidates are the raw name and its resolution from its own
	/// side. Equality is ordinal.
	pub fn matches(&self, source: &str, destination: &str) -> bool {
		if source == destination {
			return true;
		}
		let resolved_source = self.resolve(source, Side::Source);
		let resolved_destination = self.resolve(destination, Side::Destination);
		resolved_source == destination
			|| resolved_destination == source
			|| resolved_source == resolved_destination
	}
}
