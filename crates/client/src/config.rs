//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPFRONT_API_URL` - Base URL of the remote storefront API
//!
//! ## Optional
//! - `SHOPFRONT_STATE_DIR` - Directory for the persisted session and cart
//!   files; when unset the stores are in-memory only
//! - `SHOPFRONT_HTTP_TIMEOUT_SECS` - HTTP request timeout (default: 30)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// File name of the persisted session record inside the state directory.
pub const SESSION_FILE: &str = "session.json";

/// File name of the persisted cart inside the state directory.
pub const CART_FILE: &str = "cart.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client application configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the remote storefront API.
    pub api_url: Url,
    /// Directory holding the persisted session and cart files.
    pub state_dir: Option<PathBuf>,
    /// HTTP request timeout.
    pub http_timeout: Duration,
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

        let api_url = get_required_env("SHOPFRONT_API_URL")?
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SHOPFRONT_API_URL".to_string(), e.to_string())
            })?;
        let state_dir = get_optional_env("SHOPFRONT_STATE_DIR").map(PathBuf::from);
        let timeout_secs = get_env_or_default("SHOPFRONT_HTTP_TIMEOUT_SECS", "30")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SHOPFRONT_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            api_url,
            state_dir,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Path of the persisted session file, when a state directory is set.
    #[must_use]
    pub fn session_path(&self) -> Option<PathBuf> {
        self.state_dir.as_deref().map(|dir| dir.join(SESSION_FILE))
    }

    /// Path of the persisted cart file, when a state directory is set.
    #[must_use]
    pub fn cart_path(&self) -> Option<PathBuf> {
        self.state_dir.as_deref().map(|dir| dir.join(CART_FILE))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
