//! YAML credential reader.

use crate::error::LoadError;
use crate::models::credential_set::{CredentialSet, ShapeError};
use serde_yaml::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Parse a YAML credential file into a [`CredentialSet`].
///
/// Missing files and malformed documents are errors; a parse failure
/// never yields a partial set.
pub fn read_credentials(path: impl AsRef<Path>) -> Result<CredentialSet, LoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == ErrorKind::InvalidData {
            LoadError::Utf8 {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::from_io(path, e)
        }
    })?;

    if is_blank_document(&content) {
        return Ok(CredentialSet::default());
    }

    let mut value: Value = serde_yaml::from_str(&content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    value.apply_merge().map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let set = CredentialSet::from_yaml(value).map_err(|err| match err {
        ShapeError::NotAMapping => LoadError::NotAMapping {
            path: path.to_path_buf(),
        },
        ShapeError::DuplicateKey(key) => LoadError::DuplicateKey {
            path: path.to_path_buf(),
            key,
        },
    })?;
    tracing::debug!(path = %path.display(), services = set.len(), "loaded credentials");
    Ok(set)
}

fn is_blank_document(content: &str) -> bool {
    content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---"
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::credential_set::CredentialValue;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    const TWITTER: &str = "twitter:\n  consumer_key: K\n  consumer_secret: S\n";

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_twitter_example() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "credentials.yml", TWITTER);
        let set = read_credentials(&path).unwrap();

        let mut fields = BTreeMap::new();
        fields.insert("consumer_key".to_string(), CredentialValue::Text("K".into()));
        fields.insert("consumer_secret".to_string(), CredentialValue::Text("S".into()));
        assert_eq!(set.entry("twitter"), Some(&CredentialValue::Map(fields)));
        assert_eq!(set.services().collect::<Vec<_>>(), vec!["twitter"]);
        assert_eq!(set.field("twitter", "consumer_key").unwrap(), "K");
        assert_eq!(set.field("twitter", "consumer_secret").unwrap(), "S");
    }

    #[test]
    fn test_reading_twice_is_equal() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "credentials.yml", TWITTER);
        let first = read_credentials(&path).unwrap();
        let second = read_credentials(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_source_file_untouched() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "credentials.yml", TWITTER);
        read_credentials(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), TWITTER);
    }

    #[test]
    fn test_malformed_yaml_fails() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "credentials.yml",
            "twitter:\n  consumer_key: K\n    consumer_secret: S\n",
        );
        let err = read_credentials(&path).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
        assert!(err.to_string().contains("credentials.yml"));
    }

    #[test]
    fn test_unclosed_flow_mapping_fails() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "credentials.yml", "twitter: {consumer_key: K\n");
        assert!(matches!(
            read_credentials(&path),
            Err(LoadError::Parse { .. })
        ));
    }

    #[test]
    fn test_merge_keys_are_applied() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "credentials.yml",
            "defaults: &d {consumer_key: K}\ntwitter:\n  <<: *d\n  consumer_secret: S\n",
        );
        let set = read_credentials(&path).unwrap();
        assert_eq!(set.field("twitter", "consumer_key").unwrap(), "K");
        assert_eq!(set.field("twitter", "consumer_secret").unwrap(), "S");
        assert!(set.get("twitter", "<<").is_none());
    }

    #[test]
    fn test_merge_key_own_field_wins() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "credentials.yml",
            "base: &b {consumer_key: K, consumer_secret: S}\ntwitter:\n  <<: *b\n  consumer_key: override\n",
        );
        let set = read_credentials(&path).unwrap();
        assert_eq!(set.field("twitter", "consumer_key").unwrap(), "override");
        assert_eq!(set.field("twitter", "consumer_secret").unwrap(), "S");
    }

    #[test]
    fn test_colliding_keys_fail() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "credentials.yml", "svc: {1: numeric, \"1\": quoted}\n");
        let err = read_credentials(&path).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateKey { ref key, .. } if key == "svc.1"));
        assert!(err.to_string().contains("credentials.yml"));
    }

    #[test]
    fn test_missing_file_propagates() {
        let dir = TempDir::new().unwrap();
        let err = read_credentials(dir.path().join("absent.yml")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_top_level_list_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "credentials.yml", "- a\n- b\n");
        assert!(matches!(
            read_credentials(&path),
            Err(LoadError::NotAMapping { .. })
        ));
    }

    #[test]
    fn test_empty_file_is_empty_set() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "credentials.yml", "\n# nothing yet\n");
        assert!(read_credentials(&path).unwrap().is_empty());
    }
}
