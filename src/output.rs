//! Response rendering for the CLI.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use sigreq::{Outcome, RemoteErrorBody};

/// JSON summary of one exchange, emitted with `--json`.
#[derive(Debug, Serialize)]
pub struct ExchangeSummary {
    /// `ok`, `remote-error`, or `transport-error`.
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Response body size in bytes; 0 when no response arrived.
    pub bytes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrote_to: Option<String>,
    /// Response body, included when it parses as JSON and was not
    /// redirected to a file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Renders an outcome and returns the process exit code: 0 for a
/// successful exchange, 1 for a remote-reported error, 2 for a
/// transport failure.
pub fn render(outcome: &Outcome, output: Option<&Path>, json: bool) -> Result<u8> {
    if json {
        return render_json(outcome, output);
    }

    match outcome {
        Outcome::Ok { status, headers, body } => {
            eprintln!("{status}");
            write_body(headers, body, output)?;
            Ok(0)
        }
        Outcome::RemoteError { status, body } => {
            match body {
                RemoteErrorBody::Structured(value) => {
                    let pretty = serde_json::to_string_pretty(value)
                        .context("re-serializing remote error body")?;
                    eprintln!("remote error ({status}):\n{pretty}");
                }
                RemoteErrorBody::Raw(bytes) => {
                    eprintln!("remote error ({status}): {}", String::from_utf8_lossy(bytes));
                }
            }
            Ok(1)
        }
        Outcome::TransportError { cause } => {
            eprintln!("transport error: {cause}");
            Ok(2)
        }
    }
}

fn render_json(outcome: &Outcome, output: Option<&Path>) -> Result<u8> {
    let (summary, code) = summarize(outcome, output)?;
    let pretty = serde_json::to_string_pretty(&summary).context("serializing exchange summary")?;
    println!("{pretty}");
    Ok(code)
}

/// Builds the `--json` summary; writes the body to `output` when given.
fn summarize(outcome: &Outcome, output: Option<&Path>) -> Result<(ExchangeSummary, u8)> {
    match outcome {
        Outcome::Ok { status, headers: _, body } => {
            let wrote_to = if let Some(path) = output {
                fs::write(path, body)
                    .with_context(|| format!("writing response body to {}", path.display()))?;
                Some(path.display().to_string())
            } else {
                None
            };
            let parsed = if wrote_to.is_none() {
                serde_json::from_slice::<serde_json::Value>(body).ok()
            } else {
                None
            };
            let summary = ExchangeSummary {
                outcome: "ok",
                status: Some(*status),
                bytes: body.len(),
                wrote_to,
                body: parsed,
                error: None,
            };
            Ok((summary, 0))
        }
        Outcome::RemoteError { status, body } => {
            let (bytes, parsed, error) = match body {
                RemoteErrorBody::Structured(value) => {
                    (value.to_string().len(), Some(value.clone()), None)
                }
                RemoteErrorBody::Raw(raw) => {
                    (raw.len(), None, Some(String::from_utf8_lossy(raw).into_owned()))
                }
            };
            let summary = ExchangeSummary {
                outcome: "remote-error",
                status: Some(*status),
                bytes,
                wrote_to: None,
                body: parsed,
                error,
            };
            Ok((summary, 1))
        }
        Outcome::TransportError { cause } => {
            let summary = ExchangeSummary {
                outcome: "transport-error",
                status: None,
                bytes: 0,
                wrote_to: None,
                body: None,
                error: Some(cause.to_string()),
            };
            Ok((summary, 2))
        }
    }
}

fn write_body(headers: &[(String, String)], body: &[u8], output: Option<&Path>) -> Result<()> {
    if let Some(path) = output {
        fs::write(path, body)
            .with_context(|| format!("writing response body to {}", path.display()))?;
        return Ok(());
    }

    if body.is_empty() {
        return Ok(());
    }

    if is_json(headers) {
        if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
            let pretty =
                serde_json::to_string_pretty(&value).context("pretty-printing response body")?;
            println!("{pretty}");
            return Ok(());
        }
        // Advertised as JSON but does not parse; fall through to raw bytes.
    }

    std::io::stdout().write_all(body).context("writing response body to stdout")?;
    Ok(())
}

fn is_json(headers: &[(String, String)]) -> bool {
    headers
        .iter()
        .any(|(name, value)| name.eq_ignore_ascii_case("content-type") && value.contains("json"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use sigreq::RemoteErrorBody;

    use super::*;

    #[test]
    fn test_exit_codes() {
        let ok = Outcome::Ok { status: 200, headers: vec![], body: vec![] };
        assert_eq!(render(&ok, None, false).unwrap(), 0);

        let remote = Outcome::RemoteError {
            status: 401,
            body: RemoteErrorBody::Structured(json!({"error": "bad signature"})),
        };
        assert_eq!(render(&remote, None, false).unwrap(), 1);

        let raw = Outcome::RemoteError { status: 502, body: RemoteErrorBody::Raw(b"gw".to_vec()) };
        assert_eq!(render(&raw, None, false).unwrap(), 1);
    }

    #[test]
    fn test_body_written_to_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let outcome = Outcome::Ok { status: 200, headers: vec![], body: b"payload".to_vec() };

        render(&outcome, Some(file.path()), false).unwrap();
        assert_eq!(fs::read(file.path()).unwrap(), b"payload");
    }

    #[test]
    fn test_json_summary_ok() {
        let outcome = Outcome::Ok {
            status: 200,
            headers: vec![],
            body: br#"{"id":1}"#.to_vec(),
        };
        let (summary, code) = summarize(&outcome, None).unwrap();

        assert_eq!(code, 0);
        assert_eq!(summary.outcome, "ok");
        assert_eq!(summary.status, Some(200));
        assert_eq!(summary.body, Some(json!({"id": 1})));

        let rendered = serde_json::to_string(&summary).unwrap();
        assert!(rendered.contains("\"outcome\":\"ok\""));
        assert!(!rendered.contains("wrote_to"), "absent fields must be skipped");
    }

    #[test]
    fn test_json_summary_remote_error() {
        let outcome = Outcome::RemoteError {
            status: 401,
            body: RemoteErrorBody::Structured(json!({"error": "bad signature"})),
        };
        let (summary, code) = summarize(&outcome, None).unwrap();

        assert_eq!(code, 1);
        assert_eq!(summary.outcome, "remote-error");
        assert_eq!(summary.status, Some(401));
        assert_eq!(summary.body, Some(json!({"error": "bad signature"})));
        assert!(summary.error.is_none());
    }

    #[test]
    fn test_json_summary_writes_file_and_records_path() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let outcome = Outcome::Ok { status: 201, headers: vec![], body: b"payload".to_vec() };

        let (summary, _) = summarize(&outcome, Some(file.path())).unwrap();
        assert_eq!(summary.wrote_to, Some(file.path().display().to_string()));
        assert!(summary.body.is_none(), "body redirected to file is not inlined");
        assert_eq!(fs::read(file.path()).unwrap(), b"payload");
    }

    #[test]
    fn test_is_json_detection() {
        let json_headers =
            vec![("Content-Type".to_owned(), "application/json; charset=utf-8".to_owned())];
        assert!(is_json(&json_headers));

        let html_headers = vec![("content-type".to_owned(), "text/html".to_owned())];
        assert!(!is_json(&html_headers));
    }
}
