//! Request signing: content digest, canonical string, keyed signature.
//!
//! The signing scheme covers selected request metadata rather than the
//! raw message. A canonical string is built from the covered headers,
//! signed with a shared secret, and advertised in a single header the
//! verifier can recompute against:
//!
//! - **Digest** ([`digest`]): base64-encoded hash of the payload,
//!   carried as `Digest: <ALG>=<base64>` so the signature can cover
//!   the body without embedding it in the canonical string. Omitted
//!   for bodiless requests.
//! - **Canonical string** ([`canonical`]): one `<name>: <value>` line
//!   per covered header, newline-joined, starting with the
//!   `(request-target)` pseudo-header. Byte-exact reproducibility is
//!   the whole contract: the verifier rebuilds this string
//!   independently, so any deviation breaks verification.
//! - **Signature** ([`signer`]): keyed HMAC over the canonical string,
//!   assembled into
//!   `keyId="..",algorithm="..",headers="..",signature=".."`.
//!
//! The covered-header order is a single source of truth: the
//! [`SigningHeaders`] sequence drives both the canonical string layout
//! and the `headers` attribute the signature header declares.

pub mod canonical;
pub mod digest;
pub mod signer;

pub use canonical::{build_canonical_string, SigningHeaders, REQUEST_TARGET};
pub use digest::{compute_digest, DigestAlgorithm, DigestResult};
pub use signer::{sign, SignatureAlgorithm, SignatureHeader};
