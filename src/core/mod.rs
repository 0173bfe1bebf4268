//! Loaders and project-level helpers.

pub mod config_file;
pub mod credential_file;
pub mod ignore_list;
pub mod paths;
pub mod secret_file;
