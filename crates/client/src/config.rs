//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SMARTCART_API_BASE_URL` - Base URL of the backend (purchase recording
//!   lives at `{base}/complete_purchase`)
//!
//! ## Optional
//! - `SMARTCART_PREDICT_API_URL` - Prediction endpoint
//!   (default: `{base}/predict_price`)
//! - `SMARTCART_CART_URL` - Cart page (default: `/cart`)
//! - `SMARTCART_LOGIN_URL` - Login page (default: `/login`)
//! - `SMARTCART_HOME_URL` - Home page; falls back to `/` when unset
//! - `SMARTCART_AUTHENTICATED` - Whether the surrounding page session is
//!   authenticated (default: false)
//! - `SMARTCART_STORAGE_PATH` - Local storage file
//!   (default: `smartcart-store.json`)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Home path used when no home URL is configured.
pub const DEFAULT_HOME_URL: &str = "/";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Explicit configuration passed into each component at construction.
///
/// The original page injected these as ambient globals (`isAuthenticated`,
/// endpoint and page URLs); here they travel as one owned object.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL; the purchase endpoint is resolved against it.
    pub api_base_url: Url,
    /// Full URL of the prediction endpoint.
    pub predict_api_url: String,
    /// Cart page location.
    pub cart_url: String,
    /// Login page location, used when checkout requires authentication.
    pub login_url: String,
    /// Home page location; [`DEFAULT_HOME_URL`] applies when unset.
    pub home_url: Option<String>,
    /// Whether the surrounding session is authenticated.
    pub authenticated: bool,
    /// File backing the local key-value store.
    pub storage_path: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the base URL is missing or unparsable, or if
    /// the authenticated flag is not a boolean.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base = get_required_env("SMARTCART_API_BASE_URL")?;
        let api_base_url = Url::parse(&base).map_err(|e| {
            ConfigError::InvalidEnvVar("SMARTCART_API_BASE_URL".to_string(), e.to_string())
        })?;

        let predict_api_url = get_env_or_default(
            "SMARTCART_PREDICT_API_URL",
            &format!("{}/predict_price", base.trim_end_matches('/')),
        );
        let authenticated = get_env_or_default("SMARTCART_AUTHENTICATED", "false")
            .parse::<bool>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SMARTCART_AUTHENTICATED".to_string(), e.to_string())
            })?;

        Ok(Self {
            api_base_url,
            predict_api_url,
            cart_url: get_env_or_default("SMARTCART_CART_URL", "/cart"),
            login_url: get_env_or_default("SMARTCART_LOGIN_URL", "/login"),
            home_url: get_optional_env("SMARTCART_HOME_URL"),
            authenticated,
            storage_path: PathBuf::from(get_env_or_default(
                "SMARTCART_STORAGE_PATH",
                "smartcart-store.json",
            )),
        })
    }

    /// The home URL, falling back to [`DEFAULT_HOME_URL`] when unset.
    #[must_use]
    pub fn home_url_or_default(&self) -> &str {
        self.home_url.as_deref().unwrap_or(DEFAULT_HOME_URL)
    }

    /// Full URL of the purchase-recording endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the path cannot be resolved against the base
    /// URL (cannot-be-a-base URLs).
    pub fn purchase_api_url(&self) -> Result<Url, ConfigError> {
        self.api_base_url.join("complete_purchase").map_err(|e| {
            ConfigError::InvalidEnvVar("SMARTCART_API_BASE_URL".to_string(), e.to_string())
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

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
