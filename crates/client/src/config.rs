//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BREADFRUIT_SERVER_URL` - Base URL of the storefront API server
//!
//! ## Optional
//! - `BREADFRUIT_CREDENTIALS_PATH` - Token storage file
//!   (default: `.breadfruit/credentials.json`)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the storefront API server.
    pub server_url: Url,
    /// Path of the JSON file holding the persisted bearer token.
    pub credentials_path: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let server_url = get_required_env("BREADFRUIT_SERVER_URL")?
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("BREADFRUIT_SERVER_URL".to_string(), e.to_string())
            })?;
        let credentials_path = PathBuf::from(get_env_or_default(
            "BREADFRUIT_CREDENTIALS_PATH",
            ".breadfruit/credentials.json",
        ));

        Ok(Self {
            server_url,
            credentials_path,
        })
    }

    /// Build a configuration directly, without the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `server_url` is not a valid URL.
    pub fn new(
        server_url: &str,
        credentials_path: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let server_url = server_url.parse::<Url>().map_err(|e| {
            ConfigError::InvalidEnvVar("server_url".to_string(), e.to_string())
        })?;
        Ok(Self {
            server_url,
            credentials_path: credentials_path.into(),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
