/// Content hashing of referenced files into short postfixes.
use std::path::Path;

use sha2::{Digest as _, Sha256};

use crate::types::Postfix;

/// Number of hex characters kept from the digest.
pub const POSTFIX_LEN: usize = 8;

/// Read a file's raw bytes and derive its postfix.
///
/// # Errors
///
/// Returns the I/O error if the file cannot be read. The caller attaches
/// the reference context.
pub fn hash_file(path: &Path) -> Result<Postfix, std::io::Error> {
    let bytes = std::fs::read(path)?;
    return Ok(postfix_for_bytes(&bytes));
}

/// SHA-256 the bytes and keep the first `POSTFIX_LEN` hex characters.
pub fn postfix_for_bytes(bytes: &[u8]) -> Postfix {
    let digest = Sha256::digest(bytes);
    let hex = format!("{digest:x}");
    let short = hex.get(..POSTFIX_LEN).unwrap_or(&hex);
    return Postfix(short.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_input_uses_sha256_of_nothing() {
        assert_eq!(postfix_for_bytes(b"").0, "e3b0c442");
    }

    #[test]
    fn hashes_file_contents_not_path() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.js");
        let b = dir.path().join("b.js");
        std::fs::write(&a, "hello").unwrap();
        std::fs::write(&b, "hello").unwrap();

        let postfix = hash_file(&a).unwrap();
        assert_eq!(postfix.0, "2cf24dba");
        assert_eq!(postfix, hash_file(&b).unwrap());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let err = hash_file(&dir.path().join("nope.js")).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn postfix_is_lowercase_hex_of_fixed_length() {
        let postfix = postfix_for_bytes(&[0xff, 0x00, 0x10]);
        assert_eq!(postfix.0.len(), POSTFIX_LEN);
        assert!(postfix.0.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }
}
