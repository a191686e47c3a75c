//! Shop API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOP_API_HOST` - Bind address (default: 127.0.0.1)
//! - `SHOP_API_PORT` - Listen port (default: 3333)
//! - `SHOP_FIXTURE` - Path to the catalog fixture (default:
//!   `crates/shop-api/data/shop.json`, relative to the workspace root)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// Default fixture path, relative to the workspace root.
const DEFAULT_FIXTURE: &str = "crates/shop-api/data/shop.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Shop API application configuration.
#[derive(Debug, Clone)]
pub struct ShopApiConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Path to the JSON catalog fixture
    pub fixture_path: PathBuf,
}

impl ShopApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("SHOP_API_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOP_API_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("SHOP_API_PORT", "3333")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOP_API_PORT".to_string(), e.to_string()))?;
        let fixture_path = PathBuf::from(get_env_or_default("SHOP_FIXTURE", DEFAULT_FIXTURE));

        Ok(Self {
            host,
            port,
            fixture_path,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = ShopApiConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3333,
            fixture_path: PathBuf::from(DEFAULT_FIXTURE),
        };
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3333);
    }
}
