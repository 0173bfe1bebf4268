//! Plain-text secret value.

use crate::util::mask;
use std::fmt;
use zeroize::Zeroizing;

/// A single secret read from a file. Wiped from memory on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(Zeroizing<String>);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    /// Raw secret value. Callers must not log it.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Preview safe to print: first and last two characters only.
    pub fn masked(&self) -> String {
        mask::mask_value(self.expose())
    }

    /// Truncated SHA-256 of the value, for telling secrets apart.
    pub fn fingerprint(&self) -> String {
        mask::fingerprint(self.expose())
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Secret").field(&"<redacted>").finish()
    }
}
