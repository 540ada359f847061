//! Member-name resolution for type-to-type mapping.
//!
//! Turns an arbitrary identifier such as `GetUserId` into a normalized,
//! comparable candidate (`UserId`) through a composable pipeline.
//!
//! # Mental Model
//!
//! 1. A [`NamingConvention`] splits identifiers into tokens and joins tokens
//!    back together.
//! 2. A [`NameTransformer`] is one pipeline step: strip prefixes/postfixes,
//!    split with one side's convention and rejoin with the other's, or
//!    substitute aliases.
//! 3. A [`MemberConfiguration`] owns an ordered list of steps plus the
//!    source/destination [`ConventionPair`], and resolves a name seen from a
//!    [`Side`].
//!
//! Resolution runs while a mapping plan is being built, never while values
//! are copied.

/// Identifier tokenization rules.
pub mod convention;
/// Convention construction errors.
pub mod error;
/// Ordered transformer pipelines.
pub mod member;
/// Strip, split and substitute steps.
pub mod transform;

pub use convention::{ConventionPair, NamingConvention, TokenCase};
pub use error::{ConventionError, Result};
pub use member::MemberConfiguration;
pub use transform::{NameTransformer, PrePostfixStrip, Side, Substitution, Substitutions};
