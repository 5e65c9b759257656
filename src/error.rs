//! Error types for signed request construction.

use thiserror::Error;

/// Result type alias for sigreq operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while assembling a signed request.
///
/// Every variant here is detected before any bytes leave the process.
/// Transport-level failures are deliberately absent: the dispatcher
/// never raises past its boundary and reports them as
/// [`DispatchResult::TransportFailure`](crate::transport::DispatchResult),
/// which the classifier turns into
/// [`Outcome::TransportError`](crate::transport::Outcome).
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum ClientError {
    /// Requested digest or signing algorithm is not implemented.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// A covered signing header has no value at canonicalization time.
    #[error("missing signing header: {0}")]
    MissingSigningHeader(String),

    /// Signing secret is empty or unusable for the chosen construction.
    #[error("invalid secret: {0}")]
    InvalidSecret(String),

    /// Request URL is unparseable or missing a host.
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    /// HTTP method token is not a valid method.
    #[error("invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// Caller-supplied header failed injection validation.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// Payload exceeds the maximum accepted size.
    #[error("payload of {size} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge {
        /// Bytes read before the limit was hit.
        size: usize,
        /// Maximum accepted payload size in bytes.
        limit: usize,
    },

    /// HTTP client construction failed.
    #[error("HTTP client construction failed: {0}")]
    HttpError(#[from] reqwest::Error),
}
