//! sigreq: a one-shot HTTP client with signed requests.
//!
//! Issues a single outbound HTTP request whose authenticity is
//! established by a shared-secret HTTP signature: a canonical string
//! is built from selected request metadata (method, path, host, date,
//! body digest), signed with a keyed HMAC, and attached as an
//! `Authorization: Signature ...` header the server can independently
//! recompute and verify.
//!
//! # Pipeline
//!
//! ```text
//! resolved inputs
//!   → Digest            (sign::digest, skipped for empty payloads)
//!   → Canonical string  (sign::canonical)
//!   → Signature         (sign::signer)
//!   → Dispatch          (transport)
//!   → Classification    (transport::classify)
//! → typed Outcome
//! ```
//!
//! Each stage runs exactly once; there are no retries and no redirect
//! following. The whole scheme is byte-exact: the covered-header order
//! that is signed is the same order advertised to the verifier, and
//! the digest covers the exact payload bytes sent on the wire.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use sigreq::{
//!     request::{send, RequestSpec},
//!     sign::{DigestAlgorithm, SignatureAlgorithm},
//!     transport::{build_client, Outcome},
//! };
//!
//! # async fn example() -> sigreq::Result<()> {
//! let spec = RequestSpec {
//!     method: "POST".to_owned(),
//!     url: url::Url::parse("https://api.example.org/submit").expect("static URL"),
//!     date: "1700000000000".to_owned(),
//!     key_id: "my-key".to_owned(),
//!     secret: b"shared-secret".to_vec(),
//!     signature_algorithm: SignatureAlgorithm::HmacSha256,
//!     digest_algorithm: DigestAlgorithm::Sha256,
//!     payload: br#"{"hello":"world"}"#.to_vec(),
//!     extra_headers: vec![("content-type".to_owned(), "application/json".to_owned())],
//! };
//!
//! let client = build_client(Duration::from_secs(30), Duration::from_secs(10))?;
//!
//! match send(&client, &spec).await? {
//!     Outcome::Ok { status, .. } => println!("ok: {status}"),
//!     Outcome::RemoteError { status, .. } => eprintln!("remote error: {status}"),
//!     Outcome::TransportError { cause } => eprintln!("transport error: {cause}"),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod request;
pub mod sign;
pub mod transport;

pub use error::{ClientError, Result};
pub use request::{send, RequestSpec};
pub use transport::{Outcome, RemoteErrorBody};
