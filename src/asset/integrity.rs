//! Content hashing for cache busting and subresource integrity.
//!
//! Both the integrity string and the filename fragment derive from the same
//! SHA-512 digest, base64-encoded with `/` and `+` removed so the fragment
//! is filesystem- and URL-safe. Same content always yields the same values,
//! across runs and regardless of the source filename.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use sha2::{Digest, Sha512};

/// Length of the cache-busting filename fragment.
const FRAGMENT_LEN: usize = 10;

/// base64(sha512(bytes)) with every `/` and `+` stripped.
pub fn digest_base64(bytes: &[u8]) -> String {
    let digest = Sha512::digest(bytes);
    BASE64
        .encode(digest)
        .chars()
        .filter(|c| *c != '/' && *c != '+')
        .collect()
}

/// Cache-busting filename fragment: first 10 characters of the stripped
/// base64 digest, uppercased.
pub fn hash_fragment(bytes: &[u8]) -> String {
    digest_base64(bytes)
        .chars()
        .take(FRAGMENT_LEN)
        .collect::<String>()
        .to_uppercase()
}

/// SRI string: `sha512-` + stripped base64 digest.
pub fn integrity_string(bytes: &[u8]) -> String {
    format!("sha512-{}", digest_base64(bytes))
}
