//! sigreq binary: resolve inputs, run the signing pipeline once,
//! render the outcome.

use std::process::ExitCode;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use time::macros::format_description;
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;
use url::Url;

mod args;
mod input;
mod output;

use args::DateFormat;
use sigreq::{
    request::{send, RequestSpec},
    sign::{DigestAlgorithm, SignatureAlgorithm},
    transport::build_client,
};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_logging();

    let cli = args::Cli::parse();

    let url = Url::parse(&cli.url).with_context(|| format!("invalid URL: {}", cli.url))?;
    let payload = input::resolve_payload(cli.data.as_deref(), cli.data_file.as_deref())?;

    let spec = RequestSpec {
        method: cli.method.to_ascii_uppercase(),
        url,
        date: format_date(cli.date_format)?,
        key_id: cli.key_id,
        secret: cli.secret.into_bytes(),
        signature_algorithm: SignatureAlgorithm::from_name(&cli.algorithm)?,
        digest_algorithm: DigestAlgorithm::from_name(&cli.digest)?,
        payload,
        extra_headers: parse_headers(&cli.headers)?,
    };

    let client = build_client(
        Duration::from_secs(cli.timeout),
        Duration::from_secs(cli.connect_timeout),
    )?;

    let outcome = send(&client, &spec).await?;
    let code = output::render(&outcome, cli.output.as_deref(), cli.json)?;
    Ok(ExitCode::from(code))
}

/// Structured logging to stderr. `RUST_LOG` controls the filter,
/// `LOG_FORMAT=json` switches to JSON lines.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Produces the exact `Date` string that is both signed and sent.
fn format_date(format: DateFormat) -> Result<String> {
    match format {
        DateFormat::EpochMs => {
            let now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .context("system clock is before the Unix epoch")?;
            Ok(now.as_millis().to_string())
        }
        DateFormat::HttpDate => {
            let imf_fixdate = format_description!(
                "[weekday repr:short], [day] [month repr:short] [year] \
                 [hour]:[minute]:[second] GMT"
            );
            OffsetDateTime::now_utc()
                .format(&imf_fixdate)
                .context("formatting HTTP date")
        }
    }
}

/// Splits repeatable `-H "Name: value"` arguments.
fn parse_headers(raw: &[String]) -> Result<Vec<(String, String)>> {
    raw.iter()
        .map(|header| {
            let (name, value) = header
                .split_once(':')
                .with_context(|| format!("malformed header {header:?}, expected \"Name: value\""))?;
            Ok((name.trim().to_owned(), value.trim().to_owned()))
        })
        .collect()
}
