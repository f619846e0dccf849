//! BLAKE3 content fingerprints.
//!
//! # Overview
//! A [`Fingerprint`] is the BLAKE3 digest of a file's entire content. Files
//! are read fully into memory before hashing; the fingerprint is a pure
//! function of the bytes, so switching to streaming later does not change
//! any value produced here.

use std::fmt;
use std::fs;
use std::path::Path;

use super::HashError;

/// Length of a fingerprint in bytes.
pub const FINGERPRINT_LEN: usize = blake3::OUT_LEN;

/// Fixed-length content digest used as a proxy for content equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; FINGERPRINT_LEN]);

impl Fingerprint {
    /// Lowercase hexadecimal rendering (64 characters).
    #[must_use]
    pub fn to_hex(&self) -> String {
        blake3::Hash::from(self.0).to_hex().to_string()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Fingerprint an in-memory buffer.
#[must_use]
pub fn fingerprint_bytes(content: &[u8]) -> Fingerprint {
    Fingerprint(*blake3::hash(content).as_bytes())
}

/// Read a file fully and fingerprint its content.
///
/// # Errors
///
/// Returns [`HashError`] if the file is missing, unreadable, or the read
/// fails part way.
pub fn fingerprint_file(path: &Path) -> Result<Fingerprint, HashError> {
    let content = fs::read(path).map_err(|e| HashError::from_io(path, e))?;

    let fingerprint = fingerprint_bytes(&content);
    log::trace!("Fingerprinted {} -> {}", path.display(), fingerprint);
    Ok(fingerprint)
}
