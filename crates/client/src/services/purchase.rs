//! Client for the purchase-recording endpoint.

use serde_json::Value;
use smartcart_core::{CartItem, PurchaseReceipt};
use thiserror::Error;

use crate::config::{ClientConfig, ConfigError};

/// Errors that can occur when recording a purchase.
#[derive(Debug, Error)]
pub enum PurchaseError {
    /// Endpoint URL could not be resolved from configuration.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a success response.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl PurchaseError {
    /// The message to surface to the user, without the variant framing.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(e) => e.to_string(),
            Self::Http(e) => e.to_string(),
            Self::Api { message, .. } => message.clone(),
            Self::Parse(message) => message.clone(),
        }
    }
}

/// Purchase-recording endpoint client.
#[derive(Clone)]
pub struct PurchaseClient {
    client: reqwest::Client,
    url: String,
}

impl PurchaseClient {
    /// Create a new purchase client for `{base}/complete_purchase`.
    ///
    /// # Errors
    ///
    /// Returns error if the endpoint URL cannot be resolved or the HTTP
    /// client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, PurchaseError> {
        let url = config.purchase_api_url()?;
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// POST the entire cart for recording.
    ///
    /// # Errors
    ///
    /// Returns [`PurchaseError`] for transport failures, non-success
    /// statuses (surfacing the endpoint's error message when the body has
    /// one), and unparsable success bodies.
    pub async fn complete(&self, cart_items: &[CartItem]) -> Result<PurchaseReceipt, PurchaseError> {
        tracing::info!(items = cart_items.len(), "Recording purchase");
        let body = serde_json::json!({ "cart_items": cart_items });
        let response = self.client.post(&self.url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or_else(|_| Value::Object(serde_json::Map::new()));
            let message = body.get("error").and_then(Value::as_str).map_or_else(
                || format!("Failed to record purchase: {}", status.as_u16()),
                ToString::to_string,
            );
            return Err(PurchaseError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| PurchaseError::Parse(e.to_string()))
    }
}
