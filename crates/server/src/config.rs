//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BREADFRUIT_PAYMENT_URL` - Payment page base URL orders redirect to
//!   (no query string; `order_id` is appended)
//!
//! ## Optional
//! - `BREADFRUIT_HOST` - Bind address (default: 127.0.0.1)
//! - `BREADFRUIT_PORT` - Listen port (default: 4000)

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

use breadfruit_core::OrderId;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront API server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Payment page base URL; checkout responses point here.
    pub payment_url: String,
}

impl ServerConfig {
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

        let host = get_env_or_default("BREADFRUIT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("BREADFRUIT_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("BREADFRUIT_PORT", "4000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("BREADFRUIT_PORT".to_string(), e.to_string()))?;
        let payment_url = get_required_env("BREADFRUIT_PAYMENT_URL")?;

        Ok(Self {
            host,
            port,
            payment_url,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Payment redirect URL for an order.
    #[must_use]
    pub fn payment_redirect(&self, order_id: &OrderId) -> String {
        format!(
            "{}?order_id={order_id}",
            self.payment_url.trim_end_matches('/')
        )
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

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config() -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 4000,
            payment_url: "https://pay.example.com/checkout".to_string(),
        }
    }

    #[test]
    fn test_socket_addr() {
        let addr = config().socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 4000);
    }

    #[test]
    fn test_payment_redirect_appends_order_id() {
        let url = config().payment_redirect(&OrderId::new("o-1"));
        assert_eq!(url, "https://pay.example.com/checkout?order_id=o-1");
    }

    #[test]
    fn test_payment_redirect_trims_trailing_slash() {
        let mut config = config();
        config.payment_url = "https://pay.example.com/checkout/".to_string();
        let url = config.payment_redirect(&OrderId::new("o-1"));
        assert_eq!(url, "https://pay.example.com/checkout?order_id=o-1");
    }
}
