//! Identifier tokenization rules.
//!
//! A [`NamingConvention`] splits an identifier into tokens and joins tokens
//! back into an identifier. Conventions are stateless and cheap to clone; the
//! compiled pattern is shared.
//!
//! # Invariants
//!
//! - `join(split(x))` is a deterministic function of `x` and idempotent on its
//!   own output: `join(split(join(split(x)))) == join(split(x))`.
//! - An invalid pattern is rejected by [`NamingConvention::new`], never during
//!   resolution.

use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, LazyLock};

use fancy_regex::Regex;

use crate::error::{ConventionError, Result};

/// Pascal-case boundaries: acronym runs stop before a capitalized word.
const PASCAL_CASE_PATTERN: &str = r"(\p{Lu}+(?=$|\p{Lu}[\p{Ll}0-9])|\p{Lu}?[\p{Ll}0-9]+)";
/// Alphanumeric runs separated by anything else, usually underscores.
const LOWER_UNDERSCORE_PATTERN: &str = r"[\p{Ll}\p{Lu}0-9]+(?=_?)";

static PASCAL_CASE: LazyLock<NamingConvention> = LazyLock::new(|| {
	NamingConvention::new(PASCAL_CASE_PATTERN, "", TokenCase::UpperFirst)
		.expect("pascal-case pattern compiles")
		.labeled("pascal_case")
});

static LOWER_UNDERSCORE: LazyLock<NamingConvention> = LazyLock::new(|| {
	NamingConvention::new(LOWER_UNDERSCORE_PATTERN, "_", TokenCase::Lower)
		.expect("lower-underscore pattern compiles")
		.labeled("lower_underscore")
});

/// Case applied to each token when joining.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TokenCase {
	/// Tokens are emitted as-is.
	#[default]
	Preserve,
	/// The first character of each token is uppercased.
	UpperFirst,
	/// Every token is lowercased.
	Lower,
}

impl TokenCase {
	/// Shapes `token`, borrowing it when it already has this case.
	pub fn shape<'a>(self, token: &'a str) -> Cow<'a, str> {
		match self {
			Self::Preserve => Cow::Borrowed(token),
			Self::Lower => {
				if token.chars().any(char::is_uppercase) {
					Cow::Owned(token.to_lowercase())
				} else {
					Cow::Borrowed(token)
				}
			}
			Self::UpperFirst => {
				let mut chars = token.chars();
				match chars.next() {
					Some(first) if first.to_uppercase().ne([first]) => {
						Cow::Owned(first.to_uppercase().chain(chars).collect())
					}
					_ => Cow::Borrowed(token),
				}
			}
		}
	}
}

#[derive(Clone)]
enum Tokenizer {
	Exact,
	Pattern(Arc<Regex>),
}

/// A reusable split/join rule for identifiers.
#[derive(Clone)]
pub struct NamingConvention {
	label: Arc<str>,
	tokenizer: Tokenizer,
	separator: Arc<str>,
	token_case: TokenCase,
}

impl NamingConvention {
	/// Compiles a custom convention.
	///
	/// Every non-overlapping match of `pattern` becomes a token; text between
	/// matches is discarded. Joining applies `token_case` to each token and
	/// interleaves `separator`.
	pub fn new(pattern: &str, separator: &str, token_case: TokenCase) -> Result<Self> {
		let regex = Regex::new(pattern).map_err(|source| ConventionError::InvalidPattern {
			pattern: pattern.to_owned(),
			source: Box::new(source),
		})?;
		Ok(Self {
			label: Arc::from(pattern),
			tokenizer: Tokenizer::Pattern(Arc::new(regex)),
			separator: Arc::from(separator),
			token_case,
		})
	}

	/// Identifiers are never decomposed: `split(x) == [x]`, `join([x]) == x`.
	pub fn exact_match() -> Self {
		Self {
			label: Arc::from("exact_match"),
			tokenizer: Tokenizer::Exact,
			separator: Arc::from(""),
			token_case: TokenCase::Preserve,
		}
	}

	/// `UserId`, `HTMLParser`: case boundaries, no separator, capitalized tokens.
	pub fn pascal_case() -> Self {
		PASCAL_CASE.clone()
	}

	/// `user_id`: underscore separated, lowercased tokens.
	pub fn lower_underscore() -> Self {
		LOWER_UNDERSCORE.clone()
	}

	fn labeled(mut self, label: &str) -> Self {
		self.label = Arc::from(label);
		self
	}

	/// Short name used in logs and debug output.
	pub fn label(&self) -> &str {
		&self.label
	}

	/// String placed between tokens by [`Self::join`].
	pub fn separator(&self) -> &str {
		&self.separator
	}

	/// Case applied to tokens by [`Self::join`].
	pub fn token_case(&self) -> TokenCase {
		self.token_case
	}

	/// Returns the token pattern, or `None` for [`Self::exact_match`].
	pub fn pattern(&self) -> Option<&str> {
		match &self.tokenizer {
			Tokenizer::Exact => None,
			Tokenizer::Pattern(regex) => Some(regex.as_str()),
		}
	}

	/// Splits `name` into tokens shaped by [`Self::token_case`].
	///
	/// Tokens borrow from `name` unless shaping changed them, so
	/// `split(join(split(x))) == split(x)` for names this convention reads
	/// unambiguously.
	pub fn split<'a>(&self, name: &'a str) -> Vec<Cow<'a, str>> {
		let regex = match &self.tokenizer {
			Tokenizer::Exact => return vec![Cow::Borrowed(name)],
			Tokenizer::Pattern(regex) => regex,
		};

		let mut tokens = Vec::new();
		for m in regex.find_iter(name) {
			match m {
				Ok(m) => tokens.push(self.token_case.shape(m.as_str())),
				Err(error) => {
					tracing::warn!(
						convention = %self.label,
						name,
						%error,
						"tokenizer failed; treating name as a single token"
					);
					return vec![self.token_case.shape(name)];
				}
			}
		}
		tokens
	}

	/// Joins tokens into an identifier.
	pub fn join<S: AsRef<str>>(&self, tokens: &[S]) -> String {
		let mut out = String::new();
		for (idx, token) in tokens.iter().enumerate() {
			if idx > 0 {
				out.push_str(&self.separator);
			}
			out.push_str(&self.token_case.shape(token.as_ref()));
		}
		out
	}

	/// `join(split(name))` under this convention alone.
	pub fn normalize(&self, name: &str) -> String {
		self.join(&self.split(name))
	}
}

impl Default for NamingConvention {
	fn default() -> Self {
		Self::pascal_case()
	}
}

impl PartialEq for NamingConvention {
	fn eq(&self, other: &Self) -> bool {
		self.pattern() == other.pattern()
			&& self.separator == other.separator
			&& self.token_case == other.token_case
	}
}

impl Eq for NamingConvention {}

impl fmt::Debug for NamingConvention {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("NamingConvention")
			.field("label", &self.label)
			.field("pattern", &self.pattern())
			.field("separator", &self.separator)
			.field("token_case", &self.token_case)
			.finish()
	}
}

impl fmt::Display for NamingConvention {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.label)
	}
}

/// Source-side and destination-side conventions used together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConventionPair {
	/// Convention for source member names.
	pub source: NamingConvention,
	/// Convention for destination member names.
	pub destination: NamingConvention,
}

impl ConventionPair {
	/// Creates a pair from explicit conventions.
	pub fn new(source: NamingConvention, destination: NamingConvention) -> Self {
		Self {
			source,
			destination,
		}
	}

	/// Returns the convention for `side`.
	pub fn for_side(&self, side: crate::Side) -> &NamingConvention {
		match side {
			crate::Side::Source => &self.source,
			crate::Side::Destination => &self.destination,
		}
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;
	use rstest::rstest;

	use super::*;

	#[test]
	fn test_builtin_patterns_compile() {
		assert_eq!(NamingConvention::pascal_case().pattern(), Some(PASCAL_CASE_PATTERN));
		assert_eq!(
			NamingConvention::lower_underscore().pattern(),
			Some(LOWER_UNDERSCORE_PATTERN)
		);
	}

	#[test]
	fn test_invalid_pattern_fails_at_construction() {
		let err = NamingConvention::new("(unclosed", "", TokenCase::Preserve).unwrap_err();
		assert!(matches!(err, ConventionError::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"));
	}

	#[rstest]
	#[case("UserId", &["User", "Id"])]
	#[case("HTMLParser", &["HTML", "Parser"])]
	#[case("GetURL", &["Get", "URL"])]
	#[case("Address2Line", &["Address2", "Line"])]
	#[case("user_id", &["User", "Id"])]
	#[case("userId", &["User", "Id"])]
	#[case("", &[])]
	fn test_pascal_split(#[case] name: &str, #[case] expected: &[&str]) {
		assert_eq!(NamingConvention::pascal_case().split(name), expected);
	}

	#[rstest]
	#[case("user_id", &["user", "id"])]
	#[case("__created_at__", &["created", "at"])]
	#[case("Total", &["total"])]
	#[case("UserId", &["userid"])]
	fn test_lower_underscore_split(#[case] name: &str, #[case] expected: &[&str]) {
		assert_eq!(NamingConvention::lower_underscore().split(name), expected);
	}

	#[test]
	fn test_split_borrows_tokens_already_in_case() {
		let tokens = NamingConvention::pascal_case().split("userId");
		assert!(matches!(tokens[0], Cow::Owned(_)));
		assert!(matches!(tokens[1], Cow::Borrowed("Id")));
	}

	#[rstest]
	#[case("userId")]
	#[case("user_id")]
	#[case("HTMLParser")]
	fn test_pascal_tokens_survive_round_trip(#[case] name: &str) {
		let pascal = NamingConvention::pascal_case();
		let tokens = pascal.split(name);
		assert_eq!(pascal.split(&pascal.join(&tokens)), tokens);
	}

	#[test]
	fn test_join_applies_case_and_separator() {
		assert_eq!(NamingConvention::pascal_case().join(&["user", "id"]), "UserId");
		assert_eq!(NamingConvention::lower_underscore().join(&["User", "Id"]), "user_id");
	}

	#[test]
	fn test_custom_convention() {
		let kebab = NamingConvention::new(r"[a-z0-9]+", "-", TokenCase::Lower).unwrap();
		assert_eq!(kebab.split("order-line-id"), ["order", "line", "id"]);
		assert_eq!(kebab.join(&["Order", "Line"]), "order-line");
		assert_eq!(kebab.label(), "[a-z0-9]+");
	}

	#[test]
	fn test_equality_ignores_label() {
		let custom = NamingConvention::new(PASCAL_CASE_PATTERN, "", TokenCase::UpperFirst).unwrap();
		assert_eq!(custom, NamingConvention::pascal_case());
		assert_ne!(NamingConvention::exact_match(), NamingConvention::pascal_case());
	}

	proptest! {
		#[test]
		fn prop_exact_match_never_splits(s in ".*") {
			let exact = NamingConvention::exact_match();
			prop_assert_eq!(exact.split(&s), vec![s.as_str()]);
			prop_assert_eq!(exact.join(&[s.as_str()]), s.clone());
		}

		#[test]
		fn prop_normalize_is_idempotent(s in "[A-Za-z0-9_]{0,24}") {
			for convention in [
				NamingConvention::exact_match(),
				NamingConvention::pascal_case(),
				NamingConvention::lower_underscore(),
			] {
				let once = convention.normalize(&s);
				prop_assert_eq!(convention.normalize(&once), once.clone());
			}
		}

		#[test]
		fn prop_tokens_survive_round_trip(s in "[A-Za-z0-9_]{0,24}") {
			for convention in [NamingConvention::exact_match(), NamingConvention::lower_underscore()] {
				let tokens = convention.split(&s);
				let rejoined = convention.join(&tokens);
				prop_assert_eq!(convention.split(&rejoined), tokens);
			}
		}

		#[test]
		fn prop_pascal_tokens_survive_round_trip(
			words in prop::collection::vec("[a-z][a-z0-9]{1,6}", 0..5),
			camel in any::<bool>(),
		) {
			let pascal = NamingConvention::pascal_case();
			let name: String = words
				.iter()
				.enumerate()
				.map(|(idx, w)| {
					if idx == 0 && camel {
						w.clone()
					} else {
						TokenCase::UpperFirst.shape(w).into_owned()
					}
				})
				.collect();
			let tokens = pascal.split(&name);
			prop_assert_eq!(tokens.len(), words.len());
			let joined = pascal.join(&tokens);
			prop_assert_eq!(pascal.split(&joined), tokens);
		}
	}
}
