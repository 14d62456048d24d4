//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOPFRONT_STORE_PATH` - JSON file holding cart state (default: `.shopfront/storage.json`)
//! - `SHOPFRONT_CATALOG_PATH` - Product catalog JSON used by `products` and `cart add`
//! - `SHOPFRONT_LOG_FORMAT` - `pretty` (default) or `json`
//! - `RUST_LOG` - Tracing filter directives

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

const DEFAULT_STORE_PATH: &str = ".shopfront/storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'pretty' or 'json', got '{other}'")),
        }
    }
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Backing file for the key-value store
    pub store_path: PathBuf,
    /// Default product catalog file
    pub catalog_path: Option<PathBuf>,
    /// Log output format
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let store_path = lookup("SHOPFRONT_STORE_PATH")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_STORE_PATH.to_string())
            .into();
        let catalog_path = lookup("SHOPFRONT_CATALOG_PATH")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let log_format = lookup("SHOPFRONT_LOG_FORMAT")
            .map(|v| v.parse::<LogFormat>())
            .transpose()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOPFRONT_LOG_FORMAT".to_string(), e))?
            .unwrap_or_default();

        Ok(Self {
            store_path,
            catalog_path,
            log_format,
        })
    }
}
