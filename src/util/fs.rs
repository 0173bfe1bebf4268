use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

pub fn set_permissions(path: &Path, mode: u32) -> Result<()> {
    #[cfg(unix)]
    {
        let perm = fs::Permissions::from_mode(mode);
        fs::set_permissions(path, perm)
            .with_context(|| format!("set permissions {:o} on {}", mode, path.display()))?;
    }
    Ok(())
}

/// Permission bits of `path`, `None` if unreadable or not on unix.
#[cfg(unix)]
pub fn file_mode(path: &Path) -> Option<u32> {
    fs::metadata(path)
        .ok()
        .map(|m| m.permissions().mode() & 0o777)
}

#[cfg(not(unix))]
pub fn file_mode(_path: &Path) -> Option<u32> {
    None
}

/// Atomically create `path` with `content` and `mode`.
/// Returns `false` without touching anything if `path` already exists.
pub fn create_new(path: &Path, content: &str, mode: u32) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)
        .with_context(|| format!("create dir {}", parent.display()))?;
    let mut tmp = tempfile::Builder::new()
        .prefix(".credfile-")
        .tempfile_in(parent)
        .context("create temp file")?;
    tmp.write_all(content.as_bytes())
        .context("write temp file")?;
    tmp.flush().context("flush temp file")?;

    #[cfg(unix)]
    {
        let perm = fs::Permissions::from_mode(mode);
        tmp.as_file()
            .set_permissions(perm)
            .context("set permissions on temp file")?;
    }
    #[cfg(not(unix))]
    let _ = mode;

    match tmp.persist_noclobber(path) {
        Ok(_) => Ok(true),
        Err(e) if e.error.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(anyhow::anyhow!("persist {}: {}", path.display(), e.error)),
    }
}

/// Append lines to a text file, creating it if needed.
pub fn append_lines(path: &Path, lines: &[String]) -> Result<()> {
    if lines.is_empty() {
        return Ok(());
    }
    let needs_newline = match fs::read(path) {
        Ok(existing) => !existing.is_empty() && !existing.ends_with(b"\n"),
        Err(_) => false,
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open {}", path.display()))?;
    let mut content = String::new();
    if needs_newline {
        content.push('\n');
    }
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    file.write_all(content.as_bytes())
        .with_context(|| format!("append to {}", path.display()))?;
    Ok(())
}
