//! Name transformers: the closed set of steps a member configuration runs.

use std::borrow::Cow;

use crate::convention::ConventionPair;

/// Which side of a type map a member name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
	/// A member of the source type.
	Source,
	/// A member of the destination type.
	Destination,
}

impl Side {
	/// Returns the other side.
	pub fn opposite(self) -> Self {
		match self {
			Self::Source => Self::Destination,
			Self::Destination => Self::Source,
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Affixes {
	prefixes: Vec<String>,
	postfixes: Vec<String>,
}

/// Prefix and postfix lists, kept separately for each side.
///
/// At most one prefix and one postfix are removed per name. Each list is
/// scanned in registration order and the first entry that matches wins, even
/// when a later entry would match more. A strip that would leave an empty
/// name is skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrePostfixStrip {
	source: Affixes,
	destination: Affixes,
}

impl PrePostfixStrip {
	fn affixes(&self, side: Side) -> &Affixes {
		match side {
			Side::Source => &self.source,
			Side::Destination => &self.destination,
		}
	}

	fn affixes_mut(&mut self, side: Side) -> &mut Affixes {
		match side {
			Side::Source => &mut self.source,
			Side::Destination => &mut self.destination,
		}
	}

	/// Registered prefixes for `side`, in registration order.
	pub fn prefixes(&self, side: Side) -> &[String] {
		&self.affixes(side).prefixes
	}

	/// Registered postfixes for `side`, in registration order.
	pub fn postfixes(&self, side: Side) -> &[String] {
		&self.affixes(side).postfixes
	}

	/// Appends prefixes for `side`.
	pub fn recognize_prefixes<I, S>(&mut self, side: Side, prefixes: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.affixes_mut(side)
			.prefixes
			.extend(prefixes.into_iter().map(Into::into));
	}

	/// Appends postfixes for `side`.
	pub fn recognize_postfixes<I, S>(&mut self, side: Side, postfixes: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.affixes_mut(side)
			.postfixes
			.extend(postfixes.into_iter().map(Into::into));
	}

	/// Empties the prefix list for `side`. Postfixes are untouched.
	pub fn clear_prefixes(&mut self, side: Side) {
		self.affixes_mut(side).prefixes.clear();
	}

	/// Removes at most one prefix and one postfix from `name`.
	pub fn strip<'a>(&self, name: &'a str, side: Side) -> &'a str {
		let affixes = self.affixes(side);
		let mut rest = name;
		if let Some(stripped) = affixes
			.prefixes
			.iter()
			.find_map(|p| rest.strip_prefix(p.as_str()))
			.filter(|s| !s.is_empty())
		{
			rest = stripped;
		}
		if let Some(stripped) = affixes
			.postfixes
			.iter()
			.find_map(|p| rest.strip_suffix(p.as_str()))
			.filter(|s| !s.is_empty())
		{
			rest = stripped;
		}
		rest
	}
}

/// One registered `(original, replacement)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Substitution {
	/// Name to match, compared ordinally against the whole name.
	pub original: String,
	/// Name emitted when `original` matches.
	pub replacement: String,
}

/// Ordered alias replacements; the first whole-name match wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitutions {
	pairs: Vec<Substitution>,
}

impl Substitutions {
	/// Appends a pair.
	pub fn push(&mut self, original: impl Into<String>, replacement: impl Into<String>) {
		self.pairs.push(Substitution {
			original: original.into(),
			replacement: replacement.into(),
		});
	}

	/// Registered pairs in registration order.
	pub fn pairs(&self) -> &[Substitution] {
		&self.pairs
	}

	/// Returns the replacement for `name`, or `name` itself.
	pub fn apply<'a>(&'a self, name: &'a str) -> &'a str {
		self.pairs
			.iter()
			.find(|s| s.original == name)
			.map_or(name, |s| s.replacement.as_str())
	}
}

/// A single step of a member-name pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameTransformer {
	/// Tokenize with the side's convention, rejoin with the opposite side's.
	Split(ConventionPair),
	/// Remove configured prefixes and postfixes for the side.
	PrePostfixStrip(PrePostfixStrip),
	/// Replace whole names with registered aliases.
	Substitute(Substitutions),
}

impl NameTransformer {
	/// Applies this step to `name` as seen from `side`.
	pub fn apply<'a>(&'a self, name: Cow<'a, str>, side: Side) -> Cow<'a, str> {
		match self {
			Self::Split(pair) => {
				let tokens = pair.for_side(side).split(&name);
				Cow::Owned(pair.for_side(side.opposite()).join(&tokens))
			}
			Self::PrePostfixStrip(strip) => match name {
				Cow::Borrowed(n) => Cow::Borrowed(strip.strip(n, side)),
				Cow::Owned(n) => Cow::Owned(strip.strip(&n, side).to_owned()),
			},
			Self::Substitute(subs) => match subs.pairs.iter().find(|s| s.original == *name) {
				Some(s) => Cow::Borrowed(s.replacement.as_str()),
				None => name,
			},
		}
	}
}
