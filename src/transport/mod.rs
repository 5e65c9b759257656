//! HTTP dispatch for the one-shot signed request.
//!
//! The dispatcher sends exactly one request and never raises past its
//! boundary: any received HTTP response, whatever its status, comes
//! back as [`DispatchResult::Success`], and transport-level failures
//! (DNS, refused connections, timeouts) come back as
//! [`DispatchResult::TransportFailure`]. Turning error statuses into
//! typed outcomes is the classifier's job ([`classify`]).

pub mod classify;

use std::time::Duration;

use reqwest::{Client, Method};
use tracing::instrument;
use url::Url;

use crate::error::{ClientError, Result};

pub use classify::{classify, Outcome, RemoteErrorBody};

/// Result of a single dispatch attempt.
///
/// Created by [`dispatch`] and consumed immediately by
/// [`classify`]; never persisted.
#[derive(Debug)]
pub enum DispatchResult {
    /// The server answered. Error status codes land here too; they are
    /// data for the classifier, not transport failures.
    Success {
        /// HTTP status code.
        status: u16,
        /// Response headers as name/value pairs.
        headers: Vec<(String, String)>,
        /// Raw response body bytes. No parsing happens here.
        body: Vec<u8>,
    },
    /// The request never completed at the transport level.
    TransportFailure {
        /// Underlying transport error.
        cause: reqwest::Error,
    },
}

/// Builds the HTTP client for a single dispatch.
///
/// Redirects are disabled: exactly one request is issued per
/// invocation, and a 3xx answer is surfaced to the caller instead of
/// being followed.
///
/// # Errors
///
/// Returns [`ClientError::HttpError`] if client construction fails.
pub fn build_client(timeout: Duration, connect_timeout: Duration) -> Result<Client> {
    Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(timeout)
        .connect_timeout(connect_timeout)
        .build()
        .map_err(ClientError::HttpError)
}

/// Sends exactly one HTTP request.
///
/// No retries, no redirect following, no caching. The body bytes are
/// sent exactly as given; the digest upstream was computed over these
/// same bytes.
#[instrument(skip(client, headers, body), fields(method = %method, url = %url))]
pub async fn dispatch(
    client: &Client,
    method: Method,
    url: &Url,
    headers: &[(String, String)],
    body: &[u8],
) -> DispatchResult {
    let mut request = client.request(method, url.clone());

    for (name, value) in headers {
        request = request.header(name.as_str(), value.as_str());
    }

    if !body.is_empty() {
        request = request.body(body.to_vec());
    }

    let response = match request.send().await {
        Ok(response) => response,
        Err(cause) => return DispatchResult::TransportFailure { cause },
    };

    let status = response.status().as_u16();
    let headers = header_pairs(response.headers());

    // A failure while draining the body is still a transport failure;
    // the exchange did not complete.
    match response.bytes().await {
        Ok(body) => DispatchResult::Success { status, headers, body: body.to_vec() },
        Err(cause) => DispatchResult::TransportFailure { cause },
    }
}

/// Flattens response headers to name/value pairs. Non-UTF-8 values
/// (obs-text is legal in header values) are converted lossily rather
/// than dropped.
fn header_pairs(headers: &reqwest::header::HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(k, v)| (k.to_string(), String::from_utf8_lossy(v.as_bytes()).into_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_client() {
        let client = build_client(Duration::from_secs(30), Duration::from_secs(10));
        assert!(client.is_ok());
    }

    #[test]
    fn test_header_pairs_keeps_non_utf8_values() {
        use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("x-opaque"),
            HeaderValue::from_bytes(b"caf\xe9").expect("obs-text is a legal header value"),
        );

        let pairs = header_pairs(&headers);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0, "x-opaque");
        assert_eq!(pairs[0].1, "caf\u{FFFD}", "value must be kept lossily, not dropped");
    }

    #[test]
    fn test_build_client_zero_timeouts() {
        let client = build_client(Duration::from_secs(0), Duration::from_secs(0));
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_dispatch_dns_failure_is_transport_failure() {
        let client = build_client(Duration::from_secs(5), Duration::from_secs(5)).unwrap();
        // .invalid is reserved (RFC 2606) and never resolves.
        let url = Url::parse("http://sigreq-test.invalid/resource").unwrap();

        let result = dispatch(&client, Method::GET, &url, &[], &[]).await;
        assert!(matches!(result, DispatchResult::TransportFailure { .. }));
    }
}
