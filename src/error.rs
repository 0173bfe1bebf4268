//! Errors returned by the credential loaders.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is {size} bytes (limit {limit})", path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("{} is not valid UTF-8", path.display())]
    Utf8 { path: PathBuf },

    #[error("parse YAML {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{}: top-level YAML value must be a mapping", path.display())]
    NotAMapping { path: PathBuf },

    #[error("{}: duplicate key '{key}'", path.display())]
    DuplicateKey { path: PathBuf, key: String },

    #[error("no credentials for service '{service}'")]
    MissingService { service: String },

    #[error("service '{service}' has no field '{field}'")]
    MissingField { service: String, field: String },

    #[error("'{key}' is not a text value")]
    NotText { key: String },
}

impl LoadError {
    /// Map an I/O error on `path`, folding `NotFound` into its own variant.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound { path }
        } else {
            LoadError::Io { path, source }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_from_io_not_found() {
        let err = LoadError::from_io("/tmp/x", io::Error::from(io::ErrorKind::NotFound));
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "file not found: /tmp/x");
    }

    #[test]
    fn test_from_io_other() {
        let err = LoadError::from_io(
            "/tmp/x",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(!err.is_not_found());
        assert!(err.to_string().starts_with("read /tmp/x"));
    }
}
