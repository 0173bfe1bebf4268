//! Plain-text secret reader.

use crate::constants;
use crate::error::LoadError;
use crate::models::secret::Secret;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zeroize::Zeroizing;

/// Read a one-line secret, trimming surrounding whitespace.
pub fn read_secret(path: impl AsRef<Path>) -> Result<Secret, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| LoadError::from_io(path, e))?;
    let size = file
        .metadata()
        .map_err(|e| LoadError::from_io(path, e))?
        .len();
    if size > constants::MAX_SECRET_SIZE {
        return Err(LoadError::TooLarge {
            path: path.to_path_buf(),
            size,
            limit: constants::MAX_SECRET_SIZE,
        });
    }

    let mut buf = Zeroizing::new(Vec::with_capacity(size as usize));
    file.take(constants::MAX_SECRET_SIZE)
        .read_to_end(&mut buf)
        .map_err(|e| LoadError::from_io(path, e))?;
    let text = std::str::from_utf8(&buf).map_err(|_| LoadError::Utf8 {
        path: path.to_path_buf(),
    })?;
    Ok(Secret::new(text.trim()))
}

/// Like [`read_secret`], but a missing file is reported as a warning and
/// yields `Ok(None)`. Every other failure is returned.
pub fn load_secret(path: impl AsRef<Path>) -> Result<Option<Secret>, LoadError> {
    let path = path.as_ref();
    match read_secret(path) {
        Ok(secret) => {
            tracing::debug!(path = %path.display(), len = secret.len(), "loaded secret");
            Ok(Some(secret))
        }
        Err(err) if err.is_not_found() => {
            tracing::warn!(path = %path.display(), "secret file not found: {}", path.display());
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
