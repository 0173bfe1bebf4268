//! Data structures for loaded secrets and project configuration.

pub mod config;
pub mod credential_set;
pub mod secret;
