//! Logging with automatic PII redaction for citizen form data
//!
//! Values spoken into a government application form (names, mobile numbers,
//! Aadhaar numbers, PIN codes, email addresses) are personal data. Code that
//! logs them runs the value through a [`PiiRedactor`] first, so log sinks only
//! ever see masked or hash-correlated forms.
//!
//! # Detected Data Types
//!
//! - **Email Addresses**: ramesh@example.com → r***@e***
//! - **Mobile Numbers**: 9876543210 → **********
//! - **Aadhaar Numbers**: 1234 5678 9012 → XXXX-XXXX-9012
//! - **PIN Codes**: 110001 → ******
//! - **Custom Patterns**: Configurable extra patterns
//!
//! With `hash_for_correlation` enabled (the default) each match is replaced by
//! a short SHA-256 digest instead, e.g. `MOBILE[q2Vt1h0cXwA]`, so repeated
//! occurrences of the same value can be correlated without revealing it.
//!
//! # Example
//!
//! ```rust,no_run
//! use logger_redacted::{init_logging, LoggerConfig, PiiRedactor};
//!
//! init_logging(&LoggerConfig::default()).ok();
//!
//! let redactor = PiiRedactor::default();
//! tracing::info!(value = %redactor.redact("9876543210"), "mobile number captured");
//! ```

pub mod redactor;
pub mod config;

pub use redactor::*;
pub use config::*;

use thiserror::Error;
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Logging setup failure
#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Tracing initialization failed: {0}")]
    Init(String),
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `config.log_level`.
///
/// # Errors
///
/// Returns [`LoggerError::Init`] when a global subscriber is already installed.
pub fn init_logging(config: &LoggerConfig) -> Result<(), LoggerError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));

    let result = if config.json_output {
        // Structured JSON logging for production
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .with_writer(std::io::stderr)
                    .json(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    };

    result.map_err(|e| LoggerError::Init(e.to_string()))
}

/// Build the redactor matching a logger configuration.
pub fn redactor_for(config: &LoggerConfig) -> PiiRedactor {
    if config.redaction_enabled {
        PiiRedactor::default()
    } else {
        PiiRedactor::new(RedactionConfig::disabled())
    }
}
