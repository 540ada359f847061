//! Error types for naming-convention construction.

use thiserror::Error;

/// Errors raised while building a [`crate::NamingConvention`].
///
/// Resolution itself never fails; a name without a counterpart is a
/// non-match, not an error.
#[derive(Debug, Error)]
pub enum ConventionError {
	/// The token-matching pattern does not compile.
	#[error("invalid token pattern {pattern:?}: {source}")]
	InvalidPattern {
		/// The rejected pattern source.
		pattern: String,
		/// The underlying regex compilation error.
		#[source]
		source: Box<fancy_regex::Error>,
	},
}

/// Result type for convention construction.
pub type Result<T> = std::result::Result<T, ConventionError>;
