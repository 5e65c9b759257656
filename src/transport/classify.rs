//! Response classification: success, remote error, transport failure.

use serde_json::Value;

use super::DispatchResult;

/// Typed outcome of a signed request exchange.
///
/// The caller decides exit codes and display formatting from this;
/// the classifier itself performs no I/O.
#[derive(Debug)]
pub enum Outcome {
    /// The server answered with a 2xx or 3xx status.
    Ok {
        /// HTTP status code.
        status: u16,
        /// Response headers as name/value pairs.
        headers: Vec<(String, String)>,
        /// Raw response body bytes.
        body: Vec<u8>,
    },
    /// The server reported a failure status.
    RemoteError {
        /// HTTP status code.
        status: u16,
        /// Error body, parsed when possible.
        body: RemoteErrorBody,
    },
    /// The request failed below the HTTP layer.
    TransportError {
        /// Underlying transport error.
        cause: reqwest::Error,
    },
}

/// Body of a remote-reported error.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteErrorBody {
    /// Body parsed as structured JSON error data, surfaced verbatim so
    /// the caller can tell validation errors from auth errors.
    Structured(Value),
    /// Body kept as raw bytes; it was not parseable.
    Raw(Vec<u8>),
}

/// Classifies a dispatch result.
///
/// A non-2xx/3xx status becomes [`Outcome::RemoteError`], carrying the
/// parsed body when it is JSON and the raw bytes otherwise. Transport
/// failures pass through as [`Outcome::TransportError`], distinct from
/// anything the remote said.
#[must_use]
pub fn classify(result: DispatchResult) -> Outcome {
    match result {
        DispatchResult::Success { status, headers, body } => {
            if (200..400).contains(&status) {
                Outcome::Ok { status, headers, body }
            } else {
                let body = match serde_json::from_slice::<Value>(&body) {
                    Ok(value) => RemoteErrorBody::Structured(value),
                    Err(_) => RemoteErrorBody::Raw(body),
                };
                Outcome::RemoteError { status, body }
            }
        }
        DispatchResult::TransportFailure { cause } => Outcome::TransportError { cause },
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn success(status: u16, body: &[u8]) -> DispatchResult {
        DispatchResult::Success { status, headers: vec![], body: body.to_vec() }
    }

    #[test]
    fn test_classify_2xx_is_ok() {
        let outcome = classify(success(200, b"payload"));
        assert!(matches!(outcome, Outcome::Ok { status: 200, .. }));
    }

    #[test]
    fn test_classify_3xx_is_ok() {
        // Redirects are not followed; a 3xx is a completed exchange.
        let outcome = classify(success(302, b""));
        assert!(matches!(outcome, Outcome::Ok { status: 302, .. }));
    }

    #[test]
    fn test_classify_401_with_json_body() {
        let outcome = classify(success(401, br#"{"error":"bad signature"}"#));
        match outcome {
            Outcome::RemoteError { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, RemoteErrorBody::Structured(json!({"error": "bad signature"})));
            }
            other => panic!("expected RemoteError, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_500_with_unparseable_body() {
        let outcome = classify(success(500, b"<html>oops</html>"));
        match outcome {
            Outcome::RemoteError { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, RemoteErrorBody::Raw(b"<html>oops</html>".to_vec()));
            }
            other => panic!("expected RemoteError, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_preserves_success_payload() {
        let outcome = classify(DispatchResult::Success {
            status: 201,
            headers: vec![("content-type".to_owned(), "application/json".to_owned())],
            body: b"{\"id\":1}".to_vec(),
        });
        match outcome {
            Outcome::Ok { status, headers, body } => {
                assert_eq!(status, 201);
                assert_eq!(headers.len(), 1);
                assert_eq!(body, b"{\"id\":1}");
            }
            other => panic!("expected Ok, got {other:?}"),
        }
    }
}
