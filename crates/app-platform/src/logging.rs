//! Log output setup
//!
//! Installs a `tracing-subscriber` formatter filtered by `RUST_LOG`,
//! falling back to the given default directive.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "info";

/// Errors raised while installing the subscriber
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The filter directive could not be parsed
    #[error("Invalid log filter '{directive}': {message}")]
    InvalidFilter {
        /// Directive as given
        directive: String,
        /// Parser message
        message: String,
    },
}

/// Install the global subscriber.
///
/// Returns `Ok(false)` when another subscriber was already installed, so
/// calling this from several tests or entry points is harmless.
pub fn init_tracing(default_filter: &str) -> Result<bool, LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter).map_err(|e| LoggingError::InvalidFilter {
            directive: default_filter.to_string(),
            message: e.to_string(),
        })?,
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok();

    Ok(installed)
}
