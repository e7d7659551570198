//! Session key fingerprinting.
//!
//! Operators compare fingerprints across replicas to confirm they share a
//! key. The fingerprint reveals nothing useful about the key itself.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

/// Bytes of the SHA-256 digest kept before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Truncated SHA-256 fingerprint of the key's signing half as lowercase hex.
///
/// ```rust
/// use actix_web::cookie::Key;
/// use mentor_match::inbound::http::session_config::fingerprint::key_fingerprint;
///
/// let fp = key_fingerprint(&Key::generate());
/// assert_eq!(fp.len(), 16);
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(&digest[..FINGERPRINT_BYTES])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn same_material_gives_same_fingerprint() {
        let first = Key::derive_from(&[b'k'; 64]);
        let second = Key::derive_from(&[b'k'; 64]);
        assert_eq!(key_fingerprint(&first), key_fingerprint(&second));
    }

    #[rstest]
    fn fingerprint_is_short_lowercase_hex() {
        let fp = key_fingerprint(&Key::generate());

        assert_eq!(fp.len(), FINGERPRINT_BYTES * 2);
        assert!(
            fp.chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[rstest]
    fn distinct_keys_are_distinguishable() {
        let mentor_key = Key::derive_from(&[b'a'; 64]);
        let mentee_key = Key::derive_from(&[b'b'; 64]);
        assert_ne!(key_fingerprint(&mentor_key), key_fingerprint(&mentee_key));
    }
}
