//! # Structured Logging
//!
//! One `tracing` subscriber for the whole node. The RAIL crates log at the
//! operator's chosen level, HTTP request traces stay at `info`, and
//! `RUST_LOG` replaces all of it when set.
//!
//! Output goes to stderr. `hash-leaf` and `verify-proof` print their results
//! on stdout, so logs never end up in a piped digest.

use clap::ValueEnum;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Crates whose targets follow the node's `--log-level`.
const RAIL_TARGETS: [&str; 3] = ["rail_nft_node", "rail_nft_contracts", "rail_nft_protocol"];

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Colored, multi-field lines with source locations.
    Pretty,
    /// One JSON object per line, for log shippers.
    Json,
}

/// Filter directives used when `RUST_LOG` is unset.
pub fn default_directives(level: &str) -> String {
    RAIL_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .chain(std::iter::once("tower_http=info".to_string()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Installs the global subscriber.
///
/// Fails if a subscriber is already installed, instead of panicking.
pub fn init_logging(level: &str, format: LogFormat) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(false),
            )
            .try_init()?,
    }

    tracing::debug!(?format, level, "logging ready");
    Ok(())
}
