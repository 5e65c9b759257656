//! Signed request pipeline.
//!
//! Straight-line flow, each stage exactly once per invocation:
//! digest (when a payload is present) → canonical string → signature →
//! dispatch → classification. Every pre-network failure returns before
//! any bytes leave the process.

use reqwest::{Client, Method};
use tracing::debug;
use url::Url;

use crate::{
    error::{ClientError, Result},
    sign::{build_canonical_string, sign, DigestAlgorithm, SignatureAlgorithm, SigningHeaders},
    transport::{classify, dispatch, Outcome},
};

/// Fully resolved inputs for one signed request.
///
/// Built once per invocation from the caller's configuration and not
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    /// HTTP verb, uppercase.
    pub method: String,
    /// Target URL.
    pub url: Url,
    /// Exact string sent as the `Date` header and covered by the
    /// signature. Supplied by the caller; never regenerated here, so
    /// the signed line and the wire header cannot disagree.
    pub date: String,
    /// Key id the verifier uses to select the shared secret.
    pub key_id: String,
    /// Shared secret for the keyed signature.
    pub secret: Vec<u8>,
    /// Keyed-hash construction for the signature.
    pub signature_algorithm: SignatureAlgorithm,
    /// Hash algorithm for the `Digest` header.
    pub digest_algorithm: DigestAlgorithm,
    /// Request body, possibly empty.
    pub payload: Vec<u8>,
    /// Additional headers sent on the wire but not covered by the
    /// signature.
    pub extra_headers: Vec<(String, String)>,
}

/// Signed `host` value: includes the port only when the URL carries a
/// non-default one, matching what the HTTP layer puts on the wire.
fn host_value(url: &Url) -> Result<String> {
    let host = url
        .host_str()
        .ok_or_else(|| ClientError::InvalidUrl(format!("URL missing host: {url}")))?;
    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_owned(),
    })
}

fn path_with_query(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_owned(),
    }
}

/// Rejects header names and values carrying CR, LF, or NUL.
fn validate_header(name: &str, value: &str) -> Result<()> {
    if name.contains('\r') || name.contains('\n') || name.contains('\0') {
        return Err(ClientError::InvalidHeader(format!(
            "header name {name:?} contains control characters"
        )));
    }
    if value.contains('\r') || value.contains('\n') || value.contains('\0') {
        return Err(ClientError::InvalidHeader(format!(
            "header {name} value contains control characters"
        )));
    }
    Ok(())
}

/// Runs the full pipeline for one request and classifies the answer.
///
/// The digest is computed over the exact payload bytes that are later
/// sent, and the covered-header order signed here is the same order
/// advertised in the `Authorization` header.
///
/// # Errors
///
/// Returns a [`ClientError`] for any failure detected before dispatch
/// (bad method, bad URL, empty secret, malformed extra header).
/// Transport failures and remote error statuses are not errors at this
/// boundary; they come back inside the [`Outcome`].
pub async fn send(client: &Client, spec: &RequestSpec) -> Result<Outcome> {
    let method = Method::from_bytes(spec.method.as_bytes())
        .map_err(|_| ClientError::InvalidMethod(spec.method.clone()))?;

    for (name, value) in &spec.extra_headers {
        validate_header(name, value)?;
    }

    let host = host_value(&spec.url)?;

    // Bodiless requests carry no digest header and no digest line.
    let digest = if spec.payload.is_empty() {
        None
    } else {
        Some(spec.digest_algorithm.digest(&spec.payload))
    };

    let mut signing = SigningHeaders::for_request(&spec.method, &path_with_query(&spec.url));
    signing.push("host", host);
    signing.push("date", spec.date.clone());
    if let Some(digest) = &digest {
        signing.push("digest", digest.header_value());
    }

    let canonical = build_canonical_string(&signing)?;
    let signature = sign(
        &canonical,
        &spec.key_id,
        &spec.secret,
        spec.signature_algorithm,
        &signing.names(),
    )?;

    debug!(covered = %signature.headers.join(" "), "canonical string signed");

    let mut headers: Vec<(String, String)> =
        vec![("date".to_owned(), spec.date.clone())];
    if let Some(digest) = &digest {
        headers.push(("digest".to_owned(), digest.header_value()));
    }
    headers.push(("authorization".to_owned(), signature.authorization_value()));
    headers.extend(spec.extra_headers.iter().cloned());

    let result = dispatch(client, method, &spec.url, &headers, &spec.payload).await;
    Ok(classify(result))
}
