//! Structured logging and security-focused trace utilities.
//!
//! This module configures the `tracing` ecosystem for the application,
//! supporting multiple output formats and providing utilities to prevent
//! sensitive data (like OAuth tokens echoed back by Google) from leaking
//! into logs.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::{LlmError, Result};
use crate::SERVICE_NAME;
use tracing::Span;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber for the application.
///
/// Supports two output formats:
/// - `json` (default): Structured JSON logs for Cloud Logging ingestion.
/// - `pretty`: Human-readable, colorized output for development.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    // Configure filter from environment or config file
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(env_filter);

    let outcome = match config.format.as_str() {
        "pretty" => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init(),
        _ => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .try_init(),
    };

    outcome.map_err(|e| LlmError::Internal(format!("Failed to install log subscriber: {}", e)))
}

/// Process-wide span; every record emitted inside it carries `service`.
pub fn service_span() -> Span {
    tracing::info_span!("app", service = SERVICE_NAME)
}

/// Sanitizes sensitive information from log messages.
///
/// Scans for Google credential patterns (`ya29.` access tokens and `1//0`
/// refresh tokens) and replaces every occurrence with a placeholder.
pub fn sanitize(input: &str) -> String {
    let redacted = redact(input, "ya29.", "[REDACTED_ACCESS_TOKEN]");
    redact(&redacted, "1//0", "[REDACTED_REFRESH_TOKEN]")
}

fn redact(input: &str, prefix: &str, placeholder: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find(prefix) {
        result.push_str(&rest[..pos]);
        result.push_str(placeholder);
        // Token runs until whitespace or a quote
        let tail = &rest[pos..];
        let end = tail
            .find(|c: char| c.is_whitespace() || c == '"' || c == '\'')
            .unwrap_or(tail.len());
        rest = &tail[end..];
    }

    result.push_str(rest);
    result
}
