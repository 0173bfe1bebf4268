//! Load secrets from files kept out of version control.
//!
//! Reads a single secret from a plain-text file and a set of named
//! credentials from a YAML file, both expected to be git-ignored.
//!
//! ## Modules
//! - `cli` — Command-line handlers
//! - `core` — Loaders, project paths, ignore-list checks
//! - `models` — Data structures
//! - `util` — Filesystem, masking and logging helpers

pub mod cli;
pub mod constants;
pub mod core;
pub mod error;
pub mod models;
pub mod util;

pub use crate::core::credential_file::read_credentials;
pub use crate::core::secret_file::{load_secret, read_secret};
pub use crate::error::LoadError;
pub use crate::models::credential_set::{CredentialMap, CredentialSet, CredentialValue, ShapeError};
pub use crate::models::secret::Secret;
