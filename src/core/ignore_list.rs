//! Minimal `.gitignore` matcher for checking that secret files stay untracked.
//!
//! Supports comments, `!` negation, trailing `/` for directories, leading or
//! inner `/` anchoring and glob wildcards (`*`, `?`, `[..]`, `**`). The last
//! matching rule wins, and a file inside an ignored directory stays ignored.

use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

#[derive(Debug, Clone)]
struct IgnoreRule {
    pattern: Pattern,
    negated: bool,
    dir_only: bool,
    anchored: bool,
}

impl IgnoreRule {
    fn parse(line: &str) -> Option<Self> {
        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let (negated, rest) = match line.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, line.strip_prefix('\\').unwrap_or(line)),
        };
        let (dir_only, rest) = match rest.strip_suffix('/') {
            Some(rest) => (true, rest),
            None => (false, rest),
        };
        let anchored = rest.contains('/');
        let rest = rest.trim_start_matches('/');
        if rest.is_empty() {
            return None;
        }
        match Pattern::new(rest) {
            Ok(pattern) => Some(Self {
                pattern,
                negated,
                dir_only,
                anchored,
            }),
            Err(err) => {
                tracing::debug!(pattern = rest, error = %err, "skipping invalid ignore pattern");
                None
            }
        }
    }

    /// `full` is the slash path from the root, `name` its last component.
    fn matches(&self, full: &str, name: &str, is_dir: bool) -> bool {
        if self.dir_only && !is_dir {
            return false;
        }
        if self.anchored {
            self.pattern.matches_with(full, MATCH_OPTIONS)
        } else {
            self.pattern.matches_with(name, MATCH_OPTIONS)
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IgnoreList {
    rules: Vec<IgnoreRule>,
}

impl IgnoreList {
    pub fn parse(content: &str) -> Self {
        Self {
            rules: content.lines().filter_map(IgnoreRule::parse).collect(),
        }
    }

    /// Load an ignore file; a missing file ignores nothing.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Self::parse(&content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("read {}", path.display())),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether the file at `rel` (slash-separated, relative to the root of
    /// the ignore file) is excluded.
    pub fn is_ignored(&self, rel: &str) -> bool {
        let parts: Vec<&str> = rel.split('/').filter(|p| !p.is_empty()).collect();
        for i in 0..parts.len() {
            let full = parts[..=i].join("/");
            let is_dir = i + 1 < parts.len();
            let ignored = self.last_match(&full, parts[i], is_dir);
            if is_dir && ignored {
                return true;
            }
            if !is_dir {
                return ignored;
            }
        }
        false
    }

    fn last_match(&self, full: &str, name: &str, is_dir: bool) -> bool {
        let mut ignored = false;
        for rule in &self.rules {
            if rule.matches(full, name, is_dir) {
                ignored = !rule.negated;
            }
        }
        ignored
    }
}

/// Line to append so that `rel` is ignored, anchored to the root.
pub fn entry_for(rel: &str) -> String {
    format!("/{}", rel.trim_start_matches('/'))
}
