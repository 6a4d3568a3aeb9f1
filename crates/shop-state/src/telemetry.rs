//! Logging setup.
//!
//! Installs a `tracing` subscriber filtered by `SHOP_LOG` (falls back to the
//! level passed in). Logs go to stderr so command output stays clean.

use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "SHOP_LOG";

/// Output format for logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line, for log aggregation.
    Json,
    /// Human-readable lines for development.
    #[default]
    Human,
}

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log filter: {0}")]
    Filter(String),

    #[error("failed to install subscriber: {0}")]
    Init(String),
}

/// Build the filter from `SHOP_LOG`, or `default_level` when unset.
pub fn env_filter(default_level: &str) -> Result<EnvFilter, TelemetryError> {
    match std::env::var(LOG_ENV) {
        Ok(directives) if !directives.trim().is_empty() => {
            EnvFilter::try_new(directives).map_err(|e| TelemetryError::Filter(e.to_string()))
        }
        _ => EnvFilter::try_new(default_level).map_err(|e| TelemetryError::Filter(e.to_string())),
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(format: LogFormat, default_level: &str) -> Result<(), TelemetryError> {
    let filter = env_filter(default_level)?;

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Human => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    }
    .map_err(|e| TelemetryError::Init(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_format_is_human() {
        assert_eq!(LogFormat::default(), LogFormat::Human);
    }

    #[test]
    fn test_second_init_fails() {
        let _ = init(LogFormat::Human, "warn");
        assert!(matches!(
            init(LogFormat::Json, "warn"),
            Err(TelemetryError::Init(_))
        ));
    }
}
