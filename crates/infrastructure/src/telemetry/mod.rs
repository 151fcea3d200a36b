//! Logging initialization
//!
//! Installs a `tracing` subscriber writing to stderr in text or JSON form,
//! so stdout stays free for command output.

use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, LoggingConfig};

/// Error type for logging initialization
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The log filter could not be parsed
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// Failed to initialize tracing subscriber
    #[error("Failed to initialize tracing: {0}")]
    Init(String),
}

/// Build the log filter
///
/// An explicit `filter_override` wins, then `RUST_LOG`, then the configured
/// filter.
pub fn build_filter(
    config: &LoggingConfig,
    filter_override: Option<&str>,
) -> Result<EnvFilter, TelemetryError> {
    match filter_override {
        Some(filter) => {
            EnvFilter::try_new(filter).map_err(|e| TelemetryError::Filter(e.to_string()))
        },
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.filter))),
    }
}

/// Initialize logging with the given configuration
///
/// Fails when a global subscriber is already installed.
pub fn init_logging(
    config: &LoggingConfig,
    filter_override: Option<&str>,
) -> Result<(), TelemetryError> {
    let env_filter = build_filter(config, filter_override)?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.format {
        LogFormat::Text => registry.with(fmt_layer).try_init(),
        LogFormat::Json => registry.with(fmt_layer.json()).try_init(),
    }
    .map_err(|e| TelemetryError::Init(e.to_string()))?;

    info!(format = %config.format, "Logging initialized");
    Ok(())
}
