//! Gateway API key hashing and verification.
//!
//! The gateway is guarded by a single shared API key compared against the
//! `X-Api-Key` request header. Only the SHA-256 digest of the key is kept
//! in memory; the plaintext never appears in config structs or logs.

use crate::hashing::sha256_hex;

/// Compute the stored digest for a plaintext gateway key.
pub fn hash_gateway_key(key: &str) -> String {
    sha256_hex(key.as_bytes())
}

/// Check a presented plaintext key against the stored digest.
///
/// The comparison runs over the full digest regardless of where the first
/// mismatch occurs, so timing does not reveal the matching prefix length.
pub fn verify_gateway_key(presented: &str, stored_digest: &str) -> bool {
    let presented_digest = hash_gateway_key(presented);
    constant_time_eq(presented_digest.as_bytes(), stored_digest.as_bytes())
}

/// Byte-wise comparison without early exit.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_key_verifies() {
        let digest = hash_gateway_key("jv_live_abc123");
        assert!(verify_gateway_key("jv_live_abc123", &digest));
    }

    #[test]
    fn wrong_key_rejected() {
        let digest = hash_gateway_key("jv_live_abc123");
        assert!(!verify_gateway_key("jv_live_abc124", &digest));
    }

    #[test]
    fn empty_key_rejected() {
        let digest = hash_gateway_key("jv_live_abc123");
        assert!(!verify_gateway_key("", &digest));
    }

    #[test]
    fn digest_is_hex_sha256() {
        let digest = hash_gateway_key("anything");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
