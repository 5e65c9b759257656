//! Canonical signing string construction.

use crate::error::{ClientError, Result};

/// Pseudo-header covering the method and path-with-query.
pub const REQUEST_TARGET: &str = "(request-target)";

/// Ordered set of headers covered by the signature.
///
/// Iteration order is significant: it determines both the canonical
/// string layout and the `headers` list advertised in the signature
/// header. Both are derived from this one sequence, so the signed
/// order and the declared order cannot drift apart.
#[derive(Debug, Clone)]
pub struct SigningHeaders {
    entries: Vec<(String, String)>,
}

impl SigningHeaders {
    /// Starts a covered-header set with the `(request-target)` line.
    ///
    /// The pseudo-header value is `<lowercased-method> <path-with-query>`
    /// and always comes first.
    #[must_use]
    pub fn for_request(method: &str, path_with_query: &str) -> Self {
        let target = format!("{} {}", method.to_ascii_lowercase(), path_with_query);
        Self { entries: vec![(REQUEST_TARGET.to_owned(), target)] }
    }

    /// Appends a covered header. Names are lowercased on entry; values
    /// are kept verbatim.
    pub fn push(&mut self, name: &str, value: impl Into<String>) {
        self.entries.push((name.to_ascii_lowercase(), value.into()));
    }

    /// Covered header names in canonical order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Looks up a covered header value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Builds the newline-joined canonical string.
///
/// One `<lowercased-name>: <value>` line per covered header, in
/// declared order, joined by a single newline with no trailing
/// newline. Values are used verbatim; no re-encoding happens here.
///
/// # Errors
///
/// Returns [`ClientError::MissingSigningHeader`] if a covered header
/// has an empty value. That is a programming error upstream, caught
/// before any signing happens.
pub fn build_canonical_string(headers: &SigningHeaders) -> Result<String> {
    let mut lines = Vec::with_capacity(headers.entries.len());
    for (name, value) in &headers.entries {
        if value.is_empty() {
            return Err(ClientError::MissingSigningHeader(name.clone()));
        }
        lines.push(format!("{name}: {value}"));
    }
    Ok(lines.join("\n"))
}
