//! Content digest computation for request bodies.

use sha2::{Digest, Sha256, Sha512};

use crate::error::{ClientError, Result};

/// Hash algorithm used for the `Digest` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    /// SHA-256.
    Sha256,
    /// SHA-512.
    Sha512,
}

impl DigestAlgorithm {
    /// Resolves an algorithm from its header label.
    ///
    /// Accepts the canonical labels (`SHA-256`, `SHA-512`) and their
    /// hyphenless spellings, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UnsupportedAlgorithm`] for any other name.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_uppercase().as_str() {
            "SHA-256" | "SHA256" => Ok(Self::Sha256),
            "SHA-512" | "SHA512" => Ok(Self::Sha512),
            _ => Err(ClientError::UnsupportedAlgorithm(name.to_owned())),
        }
    }

    /// Canonical label embedded in the `Digest` header value.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sha256 => "SHA-256",
            Self::Sha512 => "SHA-512",
        }
    }

    /// Hashes the payload and base64-encodes the raw hash bytes.
    ///
    /// Pure and deterministic. Callers must skip this entirely for
    /// empty payloads; bodiless requests carry no `Digest` header.
    #[must_use]
    pub fn digest(self, payload: &[u8]) -> DigestResult {
        let raw = match self {
            Self::Sha256 => Sha256::digest(payload).to_vec(),
            Self::Sha512 => Sha512::digest(payload).to_vec(),
        };
        let encoded = base64::Engine::encode(&base64::engine::general_purpose::STANDARD, raw);
        DigestResult { algorithm: self, encoded }
    }
}

/// Digest of a request payload, ready for the `Digest` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestResult {
    /// Algorithm the payload was hashed with.
    pub algorithm: DigestAlgorithm,
    /// Base64 encoding of the raw hash bytes.
    pub encoded: String,
}

impl DigestResult {
    /// Serializes to the `<ALG>=<base64>` wire form.
    #[must_use]
    pub fn header_value(&self) -> String {
        format!("{}={}", self.algorithm.label(), self.encoded)
    }
}

/// Computes the payload digest for a named algorithm.
///
/// # Errors
///
/// Returns [`ClientError::UnsupportedAlgorithm`] for unknown names.
pub fn compute_digest(payload: &[u8], algorithm_name: &str) -> Result<DigestResult> {
    Ok(DigestAlgorithm::from_name(algorithm_name)?.digest(payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_digest_deterministic() {
        let first = compute_digest(b"hello", "SHA-256").unwrap();
        let second = compute_digest(b"hello", "SHA-256").unwrap();
        assert_eq!(first.encoded, second.encoded);
    }

    #[test]
    fn test_compute_digest_known_value() {
        // SHA-256("hello") = 2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824
        let digest = compute_digest(b"hello", "SHA-256").unwrap();
        let raw = base64::Engine::decode(&base64::engine::general_purpose::STANDARD, &digest.encoded)
            .expect("digest should be valid base64");
        assert_eq!(
            hex::encode(raw),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_compute_digest_empty_payload_value() {
        // SHA-256 of the empty byte string.
        let digest = compute_digest(b"", "SHA-256").unwrap();
        assert_eq!(digest.encoded, "47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU=");
    }

    #[test]
    fn test_header_value_format() {
        let digest = compute_digest(b"hello", "sha256").unwrap();
        assert!(digest.header_value().starts_with("SHA-256="));
        assert!(digest.header_value().ends_with(&digest.encoded));
    }

    #[test]
    fn test_sha512_raw_length() {
        let digest = compute_digest(b"hello", "SHA-512").unwrap();
        let raw = base64::Engine::decode(&base64::engine::general_purpose::STANDARD, &digest.encoded)
            .expect("digest should be valid base64");
        assert_eq!(raw.len(), 64);
        assert_eq!(digest.algorithm.label(), "SHA-512");
    }

    #[test]
    fn test_unsupported_algorithm_rejected() {
        let result = compute_digest(b"hello", "md5");
        assert!(matches!(
            result.unwrap_err(),
            crate::error::ClientError::UnsupportedAlgorithm(name) if name == "md5"
        ));
    }
}
