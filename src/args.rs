use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Encodings for the signed `Date` header.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// Milliseconds since the Unix epoch.
    EpochMs,
    /// RFC 7231 IMF-fixdate, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`.
    HttpDate,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "sigreq", version, about = "One-shot HTTP client with signed requests")]
pub struct Cli {
    /// Target URL.
    pub url: String,

    /// HTTP method.
    #[arg(short = 'X', long, default_value = "GET")]
    pub method: String,

    /// Request body as a literal; `-` reads standard input.
    #[arg(short = 'd', long, conflicts_with = "data_file")]
    pub data: Option<String>,

    /// Read the request body from a file.
    #[arg(long)]
    pub data_file: Option<PathBuf>,

    /// Key id the server uses to look up the shared secret.
    #[arg(long)]
    pub key_id: String,

    /// Shared signing secret.
    #[arg(long, env = "SIGREQ_SECRET", hide_env_values = true)]
    pub secret: String,

    /// Digest algorithm for the request body.
    #[arg(long, default_value = "SHA-256")]
    pub digest: String,

    /// Signing algorithm.
    #[arg(long, default_value = "hmac-sha256")]
    pub algorithm: String,

    /// Encoding of the signed `Date` header.
    #[arg(long, value_enum, default_value_t = DateFormat::EpochMs)]
    pub date_format: DateFormat,

    /// Extra header as `Name: value`. Repeatable. Sent on the wire but
    /// not covered by the signature.
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,

    /// Write the response body to a file instead of stdout.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Emit a JSON summary of the exchange on stdout.
    #[arg(long)]
    pub json: bool,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Connect timeout in seconds.
    #[arg(long, default_value_t = 10)]
    pub connect_timeout: u64,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from([
            "sigreq",
            "https://example.org/",
            "--key-id",
            "k1",
            "--secret",
            "s3cret",
        ]);
        assert_eq!(cli.method, "GET");
        assert_eq!(cli.digest, "SHA-256");
        assert_eq!(cli.algorithm, "hmac-sha256");
        assert_eq!(cli.date_format, DateFormat::EpochMs);
        assert_eq!(cli.timeout, 30);
        assert!(cli.data.is_none());
    }
}
