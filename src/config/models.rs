//! Configuration data structures for the semey-api server.
//!
//! This module defines the schema for the application settings: run mode,
//! server binding, CORS, rate limiting, logging and response compression.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};
use std::fmt;

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Deployment mode, taken from `NODE_ENV`.
    #[serde(default)]
    pub environment: RunMode,

    /// HTTP server settings (host, port, workers).
    #[serde(default)]
    pub server: ServerConfig,

    /// Cross-origin resource sharing.
    #[serde(default)]
    pub cors: CorsConfig,

    /// Per-client request throttling on `/api/`.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Performance and resource management settings.
    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// Deployment mode. Only `development` exposes internal error details.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RunMode {
    #[default]
    Development,
    Production,
    Test,
    Other(String),
}

impl RunMode {
    pub fn is_development(&self) -> bool {
        matches!(self, RunMode::Development)
    }

    pub fn is_production(&self) -> bool {
        matches!(self, RunMode::Production)
    }

    pub fn as_str(&self) -> &str {
        match self {
            RunMode::Development => "development",
            RunMode::Production => "production",
            RunMode::Test => "test",
            RunMode::Other(name) => name,
        }
    }
}

impl From<String> for RunMode {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "development" => RunMode::Development,
            "production" => RunMode::Production,
            "test" => RunMode::Test,
            _ => RunMode::Other(value),
        }
    }
}

impl From<RunMode> for String {
    fn from(mode: RunMode) -> Self {
        mode.as_str().to_string()
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `0.0.0.0`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `8080`
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of tokio worker threads.
    /// Default: Number of logical CPU cores.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Largest accepted request body, in bytes.
    /// Default: 10 MiB
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

/// Settings for cross-origin requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated origin list, or `*` for any origin.
    /// Default: `*`
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: String,
}

impl CorsConfig {
    /// Parsed origin list; `None` means any origin is allowed.
    pub fn origins(&self) -> Option<Vec<String>> {
        let origins: Vec<String> = self
            .allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(String::from)
            .collect();

        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            None
        } else {
            Some(origins)
        }
    }
}

/// Fixed-window request throttling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Default: `true`
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Requests allowed per client per window.
    /// Default: `100`
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Window length in seconds.
    /// Default: `900` (15 minutes)
    #[serde(default = "default_window_seconds")]
    pub window_seconds: u64,

    /// Only paths under this prefix are throttled.
    /// Default: `/api/`
    #[serde(default = "default_path_prefix")]
    pub path_prefix: String,

    /// Key clients by the first `X-Forwarded-For` hop instead of the peer
    /// address. Only enable behind a proxy that sets the header.
    /// Default: `false`
    #[serde(default)]
    pub trust_forwarded_for: bool,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`auto`, `pretty`, `json`, `compact`).
    /// `auto` picks `json` in production and `pretty` otherwise.
    /// Default: `auto`
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Whether to emit a combined-format access log line per request.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub access_log: bool,
}

/// Settings for tuning application performance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Whether to enable gzip/deflate compression for HTTP responses.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub enable_compression: bool,
}

// Default trait implementations linking to custom logic

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests: default_max_requests(),
            window_seconds: default_window_seconds(),
            path_prefix: default_path_prefix(),
            trust_forwarded_for: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            access_log: true,
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            enable_compression: true,
        }
    }
}

// Helper functions for serde defaults and shared constants
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_body_limit() -> usize {
    10 * 1024 * 1024
}

fn default_allowed_origins() -> String {
    "*".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_requests() -> u32 {
    100
}

fn default_window_seconds() -> u64 {
    900 // 15 minutes
}

fn default_path_prefix() -> String {
    "/api/".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "auto".to_string()
}
