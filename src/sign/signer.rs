//! Keyed signature generation and signature header assembly.

use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha512};

use crate::error::{ClientError, Result};

type HmacSha256 = Hmac<Sha256>;
type HmacSha512 = Hmac<Sha512>;

/// Keyed-hash construction used to sign the canonical string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    /// HMAC with SHA-256.
    HmacSha256,
    /// HMAC with SHA-512.
    HmacSha512,
}

impl SignatureAlgorithm {
    /// Resolves an algorithm from its wire identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UnsupportedAlgorithm`] for any other name.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "hmac-sha256" => Ok(Self::HmacSha256),
            "hmac-sha512" => Ok(Self::HmacSha512),
            _ => Err(ClientError::UnsupportedAlgorithm(name.to_owned())),
        }
    }

    /// Identifier advertised in the signature header.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::HmacSha256 => "hmac-sha256",
            Self::HmacSha512 => "hmac-sha512",
        }
    }
}

/// Assembled signature header, ready for serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Opaque key identifier the verifier uses to select the secret.
    pub key_id: String,
    /// Signing algorithm identifier.
    pub algorithm: SignatureAlgorithm,
    /// Covered header names, in the exact order they were signed.
    pub headers: Vec<String>,
    /// Base64 encoding of the raw signature bytes.
    pub signature: String,
}

impl SignatureHeader {
    /// Serializes to the `field="value"` comma-joined grammar.
    #[must_use]
    pub fn to_header_value(&self) -> String {
        format!(
            "keyId=\"{}\",algorithm=\"{}\",headers=\"{}\",signature=\"{}\"",
            self.key_id,
            self.algorithm.label(),
            self.headers.join(" "),
            self.signature
        )
    }

    /// Full `Authorization` header value.
    #[must_use]
    pub fn authorization_value(&self) -> String {
        format!("Signature {}", self.to_header_value())
    }
}

/// Signs the canonical string and assembles the signature header.
///
/// Computes a keyed hash over the UTF-8 bytes of `canonical` exactly
/// as given; the string must not be mutated between construction and
/// signing. Deterministic: the same canonical string, secret and
/// algorithm always produce the same signature. Nothing here reads
/// the clock or any other ambient state.
///
/// # Errors
///
/// Returns [`ClientError::InvalidSecret`] if the secret is empty.
/// HMAC itself accepts keys of any non-zero length.
pub fn sign(
    canonical: &str,
    key_id: &str,
    secret: &[u8],
    algorithm: SignatureAlgorithm,
    covered_headers: &[String],
) -> Result<SignatureHeader> {
    if secret.is_empty() {
        return Err(ClientError::InvalidSecret("secret must not be empty".to_owned()));
    }

    let raw = match algorithm {
        SignatureAlgorithm::HmacSha256 => {
            let mut mac = HmacSha256::new_from_slice(secret)
                .map_err(|e| ClientError::InvalidSecret(e.to_string()))?;
            mac.update(canonical.as_bytes());
            mac.finalize().into_bytes().to_vec()
        }
        SignatureAlgorithm::HmacSha512 => {
            let mut mac = HmacSha512::new_from_slice(secret)
                .map_err(|e| ClientError::InvalidSecret(e.to_string()))?;
            mac.update(canonical.as_bytes());
            mac.finalize().into_bytes().to_vec()
        }
    };

    let signature = base64::Engine::encode(&base64::engine::general_purpose::STANDARD, raw);

    Ok(SignatureHeader {
        key_id: key_id.to_owned(),
        algorithm,
        headers: covered_headers.to_vec(),
        signature,
    })
}
