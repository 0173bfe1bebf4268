use crate::models::config::ProjectConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Load `credfile.toml`; a missing file gives the defaults.
pub fn load(path: &Path) -> Result<ProjectConfig> {
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let config: ProjectConfig = toml::from_str(&content)
        .with_context(|| format!("parse config {}", path.display()))?;
    Ok(config)
}

/// Starter config written by `init`.
pub fn template() -> Result<String> {
    toml::to_string_pretty(&ProjectConfig::default()).context("serialize default config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_default() {
        let dir = TempDir::new().unwrap();
        let cfg = load(&dir.path().join("credfile.toml")).unwrap();
        assert_eq!(cfg, ProjectConfig::default());
    }

    #[test]
    fn test_invalid_config_names_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credfile.toml");
        fs::write(&path, "[sources\n").unwrap();
        let err = load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("credfile.toml"));
    }

    #[test]
    fn test_template_round_trips() {
        let text = template().unwrap();
        let cfg: ProjectConfig = toml::from_str(&text).unwrap();
        assert_eq!(cfg, ProjectConfig::default());
    }
}
