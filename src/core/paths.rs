//! Project root resolution and well-known file locations.

use crate::constants;
use crate::models::config::ProjectConfig;
use crate::util::path;
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub config_file: PathBuf,
    pub gitignore: PathBuf,
}

impl ProjectPaths {
    /// Resolve the project root from CLI arg, env var, or auto-detection.
    pub fn resolve(root_arg: Option<PathBuf>) -> Result<Self> {
        let cwd = env::current_dir().context("resolve current directory")?;
        if let Some(root) = root_arg {
            return Ok(Self::from_root(path::resolve(&cwd, &root)));
        }
        if let Ok(root) = env::var(constants::ROOT_ENV_VAR) {
            if !root.is_empty() {
                return Ok(Self::from_root(path::resolve(&cwd, Path::new(&root))));
            }
        }
        Ok(Self::from_root(find_project_root(&cwd).unwrap_or(cwd)))
    }

    pub fn from_root(root: PathBuf) -> Self {
        let config_file = root.join(constants::CONFIG_FILE_NAME);
        let gitignore = root.join(constants::GITIGNORE_FILE_NAME);
        Self {
            root,
            config_file,
            gitignore,
        }
    }

    /// Absolute location of the plain-text secret file.
    pub fn secret_file(&self, config: &ProjectConfig) -> PathBuf {
        path::resolve(&self.root, &config.sources.secret_file)
    }

    /// Absolute location of the YAML credential file.
    pub fn credentials_file(&self, config: &ProjectConfig) -> PathBuf {
        path::resolve(&self.root, &config.sources.credentials_file)
    }
}

/// Nearest ancestor holding a config file or a `.git` entry.
fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| looks_like_root(dir))
        .map(Path::to_path_buf)
}

fn looks_like_root(dir: &Path) -> bool {
    dir.join(constants::CONFIG_FILE_NAME).is_file() || dir.join(".git").exists()
}

impl std::fmt::Display for ProjectPaths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "project@{}", self.root.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_from_root() {
        let paths = ProjectPaths::from_root(PathBuf::from("/proj"));
        assert_eq!(paths.root, PathBuf::from("/proj"));
        assert_eq!(paths.config_file, PathBuf::from("/proj/credfile.toml"));
        assert_eq!(paths.gitignore, PathBuf::from("/proj/.gitignore"));
    }

    #[test]
    fn test_source_files_resolved_against_root() {
        let paths = ProjectPaths::from_root(PathBuf::from("/proj"));
        let config = ProjectConfig::default();
        assert_eq!(paths.secret_file(&config), PathBuf::from("/proj/api_key.txt"));
        assert_eq!(
            paths.credentials_file(&config),
            PathBuf::from("/proj/credentials.yml")
        );
    }

    #[test]
    fn test_explicit_root_wins() {
        let dir = TempDir::new().unwrap();
        let paths = ProjectPaths::resolve(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(paths.root, dir.path());
    }

    #[test]
    fn test_find_project_root_by_config() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("credfile.toml"), "").unwrap();
        let nested = dir.path().join("notebooks/week1");
        fs::create_dir_all(&nested).unwrap();
        assert_eq!(find_project_root(&nested), Some(dir.path().to_path_buf()));
    }

    #[test]
    fn test_find_project_root_by_git_dir() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        let nested = dir.path().join("src");
        fs::create_dir_all(&nested).unwrap();
        assert_eq!(find_project_root(&nested), Some(dir.path().to_path_buf()));
    }
}
