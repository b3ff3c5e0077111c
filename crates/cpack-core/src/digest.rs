//! # Content Digests
//!
//! SHA-256 digests over canonical (RFC 8785) JSON bytes. Used to
//! fingerprint synthesized templates so that "same declaration, same
//! output" is checkable as a single string, and by the upload constructor
//! to fingerprint source content.
//!
//! Canonicalization goes through `serde_jcs` (sorted keys, compact
//! separators), so the digest of a value never depends on field
//! declaration order or formatting.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::SynthError;

/// A SHA-256 digest of canonical content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    /// Compute the digest of raw bytes.
    pub fn of_bytes(data: &[u8]) -> Self {
        let hash = Sha256::digest(data);
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hash);
        Self(bytes)
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sha256:{}", self.to_hex())
    }
}

/// Compute the SHA-256 digest of a value's canonical JSON form.
///
/// The value is serialized to a JSON tree, canonicalized per RFC 8785
/// (sorted keys, compact separators), and hashed. Two values that
/// serialize identically digest identically regardless of map iteration
/// order or formatting.
///
/// # Errors
///
/// Returns `SynthError::Serialization` if the value cannot be represented
/// as JSON.
pub fn canonical_digest(value: &impl Serialize) -> Result<ContentDigest, SynthError> {
    let tree: Value = serde_json::to_value(value)?;
    let canonical = serde_jcs::to_string(&tree)?;
    Ok(ContentDigest::of_bytes(canonical.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_digest_deterministic() {
        let v = json!({"b": 2, "a": 1});
        let d1 = canonical_digest(&v).unwrap();
        let d2 = canonical_digest(&v).unwrap();
        assert_eq!(d1, d2);
    }

    #[test]
    fn test_digest_ignores_key_order() {
        // Two trees with the same entries in different declaration order
        // canonicalize to the same bytes.
        let a: Value = serde_json::from_str(r#"{"x": 1, "y": 2}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"y": 2, "x": 1}"#).unwrap();
        assert_eq!(canonical_digest(&a).unwrap(), canonical_digest(&b).unwrap());
    }

    #[test]
    fn test_different_content_different_digest() {
        let a = json!({"k": 1});
        let b = json!({"k": 2});
        assert_ne!(canonical_digest(&a).unwrap(), canonical_digest(&b).unwrap());
    }

    #[test]
    fn test_hex_format() {
        let d = canonical_digest(&json!({})).unwrap();
        let hex = d.to_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_display_prefix() {
        let d = canonical_digest(&json!({})).unwrap();
        assert!(d.to_string().starts_with("sha256:"));
    }

    #[test]
    fn test_known_vector_empty_object() {
        // SHA256 of the canonical form "{}".
        let d = canonical_digest(&json!({})).unwrap();
        assert_eq!(
            d.to_hex(),
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );
    }
}
