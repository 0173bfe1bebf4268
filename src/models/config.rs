//! Project configuration file model (`credfile.toml`).

use crate::constants;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProjectConfig {
    #[serde(default)]
    pub sources: SourcesSection,
    #[serde(default)]
    pub policy: PolicySection,
}

/// Where the secret files live, relative to the project root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourcesSection {
    #[serde(default = "default_secret_file")]
    pub secret_file: PathBuf,
    #[serde(default = "default_credentials_file")]
    pub credentials_file: PathBuf,
}

impl Default for SourcesSection {
    fn default() -> Self {
        Self {
            secret_file: default_secret_file(),
            credentials_file: default_credentials_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PolicySection {
    /// Fail `doctor` when a secret file is not git-ignored.
    #[serde(default = "default_true")]
    pub require_ignored: bool,

    /// Most permissive mode allowed on secret files.
    #[serde(default = "default_max_file_mode")]
    pub max_file_mode: u32,
}

impl Default for PolicySection {
    fn default() -> Self {
        Self {
            require_ignored: true,
            max_file_mode: default_max_file_mode(),
        }
    }
}

impl PolicySection {
    /// True when `mode` grants nothing beyond `max_file_mode`.
    pub fn mode_allowed(&self, mode: u32) -> bool {
        mode & 0o777 & !self.max_file_mode == 0
    }
}

fn default_secret_file() -> PathBuf {
    PathBuf::from(constants::DEFAULT_SECRET_FILE)
}

fn default_credentials_file() -> PathBuf {
    PathBuf::from(constants::DEFAULT_CREDENTIALS_FILE)
}

fn default_true() -> bool {
    true
}

fn default_max_file_mode() -> u32 {
    constants::DEFAULT_MAX_FILE_MODE
}
