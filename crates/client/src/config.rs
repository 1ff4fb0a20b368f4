//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MARKET_API_URL` - Base URL of the backend API
//!   (e.g., `https://market-server.example.com/api`)
//!
//! ## Optional
//! - `MARKET_API_TIMEOUT_SECS` - Per-request timeout in seconds (default: 30)

use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),
    /// An environment variable is set but unusable.
    #[error("invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    /// The HTTP client could not be built from this configuration.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend API.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a configuration with defaults for everything but the URL.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: concat!("market-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` first in binaries that want `.env` support.
    ///
    /// # Errors
    ///
    /// Returns an error if `MARKET_API_URL` is missing or not a valid URL,
    /// or if `MARKET_API_TIMEOUT_SECS` is set but not an integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url = std::env::var("MARKET_API_URL")
            .map_err(|_| ConfigError::MissingEnvVar("MARKET_API_URL".to_string()))?;
        let base_url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::InvalidEnvVar("MARKET_API_URL".to_string(), e.to_string()))?;

        let mut config = Self::new(base_url);

        if let Ok(raw_timeout) = std::env::var("MARKET_API_TIMEOUT_SECS") {
            let secs: u64 = raw_timeout.parse().map_err(|_| {
                ConfigError::InvalidEnvVar(
                    "MARKET_API_TIMEOUT_SECS".to_string(),
                    format!("not an integer: {raw_timeout}"),
                )
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
