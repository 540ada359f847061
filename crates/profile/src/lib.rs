//! Mapping profiles.
//!
//! A profile is a named scope of naming rules and type-map registrations
//! collected at startup and consumed, read-only, by a plan builder.
//!
//! # Mental Model
//!
//! 1. **Unsealed:** A [`ProfileBuilder`] accepts registration calls from the
//!    single thread that configures the application.
//! 2. **Sealing:** [`ProfileBuilder::seal`] consumes the builder and freezes
//!    every collection into a [`Profile`].
//! 3. **Consumption:** The plan builder walks the profile's records, resolves
//!    member names through its member configurations and runs its deferred
//!    hooks. Sealed profiles may be shared across any number of threads, or
//!    published into a [`ProfileRegistry`].
//!
//! # Key Types
//!
//! | Type | Role |
//! |------|------|
//! | [`ProfileBuilder`] | Growth-only registration surface. |
//! | [`Profile`] | Immutable snapshot handed to consumers. |
//! | [`ProfileRegistry`] | Atomic container of published profiles. |
//! | [`TypeMapConfig`] | One registered `source -> destination` intent. |
//! | [`ProfileSettings`] | TOML description of a profile's data-only rules. |

mod builder;
mod error;
mod hooks;
mod options;
mod profile;
mod registry;
mod resolvers;
mod settings;
mod type_map;
mod types;
mod value;

pub use builder::{DEFAULT_DESTINATION_PREFIX, ProfileBuilder};
pub use error::{ProfileError, Result};
pub use hooks::{PropertyHook, PropertyMapRecord, TypeMapHook, TypeMapRecord};
pub use mapkit_naming as naming;
pub use options::{MemberFilters, MemberInfo, MemberKind, MemberPredicate, Override, ProfileOptions};
pub use profile::Profile;
pub use registry::{ProfileRegistry, ProfileTable};
pub use resolvers::{ErasedValue, SourceResolver, SourceResolvers};
pub use settings::{AliasSetting, ConventionName, ProfileSettings, SettingsFile};
pub use type_map::{MemberList, TypeMapConfig};
pub use types::{Generics, TypeRef};
pub use value::ValueTransformer;
