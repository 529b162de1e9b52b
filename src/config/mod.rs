// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{ApiError, Result};
use config::{Config, Environment, File};
use std::path::{Path, PathBuf};

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Plain deployment variables (`PORT`, `ALLOWED_ORIGINS`, `NODE_ENV`)
    /// 2. Prefixed environment variables (`SEMEY_SERVER__PORT`, ...)
    /// 3. Config file
    /// 4. Defaults (lowest)
    ///
    /// CLI flags are applied on top by the binary.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::load`], reading the plain deployment variables
    /// through `lookup` instead of the process environment.
    pub fn load_with<F>(config_path: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_config_path);

        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            // An explicitly requested file must exist; the default one is optional
            .add_source(
                File::with_name(&path.to_string_lossy())
                    .required(config_path.is_some())
            )
            // Override with environment variables (prefix: SEMEY_)
            .add_source(
                Environment::with_prefix("SEMEY")
                    .prefix_separator("_")
                    .separator("__")
            )
            .set_override_option("server.port", non_empty(lookup("PORT")))?
            .set_override_option("cors.allowed_origins", non_empty(lookup("ALLOWED_ORIGINS")))?
            .set_override_option("environment", non_empty(lookup("NODE_ENV")))?
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ApiError::Config(e.to_string()))
    }

    fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".semey-api")
            .join("config.toml")
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
