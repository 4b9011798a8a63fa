//! # maillog-logging
//!
//! Diagnostic logging for maillog.
//!
//! Diagnostics always go to stderr so stdout carries nothing but the
//! JSON session report.
//!
//! ## Log Formats
//!
//! - `Pretty` - Human-readable multi-field output
//! - `JSON` - Structured JSON lines
//! - `Compact` - Minimal text output

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default filter directive when neither RUST_LOG nor configuration sets one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Output format for diagnostic logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON lines format for machine consumption
    Json,
    /// Compact single-line format
    Compact,
}

/// Build the env filter. RUST_LOG takes precedence over `level`.
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Initialize tracing for the application
pub fn init_tracing(level: &str, format: LogFormat) {
    let filter = build_filter(level);

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        LogFormat::Compact => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .compact()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
                .init();
        }
    }
}
