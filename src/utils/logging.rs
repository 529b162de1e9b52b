//! Structured logging setup.
//!
//! This module configures the `tracing` ecosystem for the application. The
//! output format follows the run mode unless pinned in configuration:
//! production deployments get one JSON object per line for log shipping,
//! everything else gets human-readable output.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::{LoggingConfig, RunMode};
use crate::error::{ApiError, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl LogFormat {
    /// Resolves a configured format name; `auto` (or anything unknown)
    /// depends on the run mode.
    pub fn resolve(configured: &str, mode: &RunMode) -> Self {
        match configured {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            "compact" => LogFormat::Compact,
            _ if mode.is_production() => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Initializes the global tracing subscriber for the application.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig, mode: &RunMode) -> Result<()> {
    // Configure filter from environment or config file
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| ApiError::Config(format!("invalid log level '{}': {}", config.level, e)))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let initialized = match LogFormat::resolve(&config.format, mode) {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        LogFormat::Compact => registry
            .with(tracing_subscriber::fmt::layer().compact())
            .try_init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init(),
    };

    initialized.map_err(|e| ApiError::Config(format!("logging already initialized: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_format_follows_run_mode() {
        assert_eq!(LogFormat::resolve("auto", &RunMode::Production), LogFormat::Json);
        assert_eq!(LogFormat::resolve("auto", &RunMode::Development), LogFormat::Pretty);
        assert_eq!(LogFormat::resolve("auto", &RunMode::Test), LogFormat::Pretty);
    }

    #[test]
    fn test_explicit_format_wins() {
        assert_eq!(LogFormat::resolve("pretty", &RunMode::Production), LogFormat::Pretty);
        assert_eq!(LogFormat::resolve("compact", &RunMode::Development), LogFormat::Compact);
        assert_eq!(LogFormat::resolve("json", &RunMode::Development), LogFormat::Json);
    }
}
