//! Payload resolution from literal, file, or standard input.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use sigreq::ClientError;

/// Maximum accepted payload size: 10 MiB.
///
/// The digest is computed over the fully buffered payload, so the
/// read contract is explicitly bounded rather than unbounded chunked
/// accumulation.
pub const MAX_PAYLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Resolves the request payload. Precedence: literal, then file, then
/// nothing (an empty, bodiless request).
pub fn resolve_payload(data: Option<&str>, data_file: Option<&Path>) -> Result<Vec<u8>> {
    match (data, data_file) {
        (Some("-"), _) => read_bounded(std::io::stdin().lock()).context("reading payload from stdin"),
        (Some(literal), _) => {
            if literal.len() > MAX_PAYLOAD_BYTES {
                return Err(ClientError::PayloadTooLarge {
                    size: literal.len(),
                    limit: MAX_PAYLOAD_BYTES,
                }
                .into());
            }
            Ok(literal.as_bytes().to_vec())
        }
        (None, Some(path)) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open payload file {}", path.display()))?;
            read_bounded(file).with_context(|| format!("reading payload from {}", path.display()))
        }
        (None, None) => Ok(Vec::new()),
    }
}

fn read_bounded(reader: impl Read) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut limited = reader.take(MAX_PAYLOAD_BYTES as u64 + 1);
    limited.read_to_end(&mut buf)?;
    if buf.len() > MAX_PAYLOAD_BYTES {
        return Err(ClientError::PayloadTooLarge { size: buf.len(), limit: MAX_PAYLOAD_BYTES }.into());
    }
    Ok(buf)
}
