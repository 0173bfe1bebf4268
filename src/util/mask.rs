//! Safe-to-print previews of secret values.

use crate::constants;
use sha2::{Digest, Sha256};

/// Values shorter than this are fully starred out.
const MIN_REVEAL_LEN: usize = 8;

/// Keep the first and last two characters of long values, star out short ones.
pub fn mask_value(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() < MIN_REVEAL_LEN {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..2].iter().collect();
        let tail: String = chars[chars.len() - 2..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

/// First `FINGERPRINT_LEN` hex chars of the SHA-256 of `value`.
pub fn fingerprint(value: &str) -> String {
    let digest = Sha256::digest(value.as_bytes());
    let mut out = format!("{:x}", digest);
    out.truncate(constants::FINGERPRINT_LEN);
    out
}
