//! Error types for profile settings and publication.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised outside the infallible registration surface.
#[derive(Debug, Error)]
pub enum ProfileError {
	/// A profile with the same name is already published.
	#[error("profile {name:?} is already published")]
	DuplicateProfile {
		/// Name of the rejected profile.
		name: String,
	},

	/// Settings text is not valid TOML or does not fit the schema.
	#[error("invalid profile settings: {0}")]
	Settings(#[from] toml::de::Error),

	/// Error reading a settings file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},
}

/// Result type for profile operations.
pub type Result<T> = std::result::Result<T, ProfileError>;
