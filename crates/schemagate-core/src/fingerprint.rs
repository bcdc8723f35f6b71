//! # Schema Fingerprints
//!
//! Defines `Fingerprint`, the cache key for compiled schema documents.
//!
//! A fingerprint is the SHA-256 digest of the raw schema text, byte for byte.
//! No normalization is applied: two texts that differ only in whitespace
//! produce two fingerprints and therefore two cache entries.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// SHA-256 digest of a schema document's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Compute the fingerprint of a schema text.
    pub fn of(schema_text: &str) -> Self {
        let hash = Sha256::digest(schema_text.as_bytes());
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hash);
        Self(bytes)
    }

    /// The raw 32-byte digest.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render the fingerprint as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sha256:{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_deterministic() {
        let a = Fingerprint::of(r#"{"type":"object"}"#);
        let b = Fingerprint::of(r#"{"type":"object"}"#);
        assert_eq!(a, b);
    }

    #[test]
    fn test_whitespace_changes_fingerprint() {
        let a = Fingerprint::of(r#"{"type":"object"}"#);
        let b = Fingerprint::of(r#"{ "type": "object" }"#);
        assert_ne!(a, b);
    }

    #[test]
    fn test_known_sha256_vector() {
        // sha256(b"{}")
        assert_eq!(
            Fingerprint::of("{}").to_hex(),
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );
    }

    #[test]
    fn test_display_prefix() {
        let s = Fingerprint::of("{}").to_string();
        assert!(s.starts_with("sha256:"));
        assert_eq!(s.len(), 7 + 64);
    }
}
