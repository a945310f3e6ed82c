//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `SOLEVERSE_API_URL` - Storefront API base URL (default: http://localhost:5000/api)
//! - `SOLEVERSE_DATA_DIR` - Directory for persisted shopper state (default: .soleverse)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default storefront API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Default directory for persisted shopper state.
pub const DEFAULT_DATA_DIR: &str = ".soleverse";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Shopper client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Storefront API base URL
    pub api_url: Url,
    /// Directory holding one JSON file per persisted key
    pub data_dir: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `SOLEVERSE_API_URL` is not an absolute http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = parse_api_url(&get_env_or_default("SOLEVERSE_API_URL", DEFAULT_API_URL))
            .map_err(|e| ConfigError::InvalidEnvVar("SOLEVERSE_API_URL".to_string(), e))?;
        let data_dir = PathBuf::from(get_env_or_default("SOLEVERSE_DATA_DIR", DEFAULT_DATA_DIR));

        Ok(Self { api_url, data_dir })
    }
}

/// Parse and check an API base URL.
///
/// # Errors
///
/// Returns a description of the problem if the URL is malformed or not http(s).
pub fn parse_api_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported scheme '{other}'")),
    }
}

/// Get an environment variable with a default value. Blank values count as unset.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
