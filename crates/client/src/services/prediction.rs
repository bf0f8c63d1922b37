//! Client for the price-prediction endpoint.

use serde_json::Value;
use smartcart_core::{Prediction, PredictionRequest};
use thiserror::Error;

use crate::config::ClientConfig;

/// Errors that can occur when requesting a prediction.
#[derive(Debug, Error)]
pub enum PredictionError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// A transport-level success whose body carries an explicit error field.
    #[error("Prediction rejected: {0}")]
    Rejected(String),

    /// Failed to parse a success response.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl PredictionError {
    /// The message to surface to the user, without the variant framing.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Http(e) => e.to_string(),
            Self::Api { message, .. } | Self::Rejected(message) => message.clone(),
            Self::Parse(message) => message.clone(),
        }
    }
}

/// Prediction endpoint client.
#[derive(Clone)]
pub struct PredictionClient {
    client: reqwest::Client,
    url: String,
}

impl PredictionClient {
    /// Create a new prediction client from the configured endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, PredictionError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            url: config.predict_api_url.clone(),
        })
    }

    /// POST the assembled request body and interpret the response.
    ///
    /// A non-success status surfaces the error body's `error` field when one
    /// can be parsed (a malformed or absent body degrades to an empty
    /// object), else a status-coded message. A success body carrying an
    /// `error` field is treated as a rejection despite the transport-level
    /// success.
    ///
    /// # Errors
    ///
    /// Returns [`PredictionError`] for transport failures, non-success
    /// statuses, embedded errors, and unparsable success bodies.
    pub async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<Prediction, PredictionError> {
        tracing::debug!(url = %self.url, "Requesting price prediction");
        let response = self.client.post(&self.url).json(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or_else(|_| Value::Object(serde_json::Map::new()));
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .map_or_else(
                    || format!("HTTP error! Status: {}", status.as_u16()),
                    ToString::to_string,
                );
            return Err(PredictionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| PredictionError::Parse(e.to_string()))?;

        if let Some(error) = body.get("error").and_then(Value::as_str) {
            return Err(PredictionError::Rejected(error.to_string()));
        }

        serde_json::from_value(body).map_err(|e| PredictionError::Parse(e.to_string()))
    }
}
