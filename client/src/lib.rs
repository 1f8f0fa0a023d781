use std::sync::Arc;

pub use crate::config::{ClientConfig, ConfigError};
pub use crate::http::Client;
pub use crate::responses::*;

pub mod api;
pub mod config;
pub mod http;
pub mod responses;

/// Used when a failure carries no message of its own.
pub const FALLBACK_MESSAGE: &str = "Network request failed";

/// The single error shape every failed call resolves to.
///
/// `status` is `0` when no HTTP response was ever received and the real
/// status code otherwise.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ClientError {
    message: String,
    status: u16,
    details: Option<ErrorDetails>,
}

#[derive(Debug, Clone)]
pub enum ErrorDetails {
    /// Error body that parsed as JSON.
    Json(serde_json::Value),
    /// Error body that was not valid JSON.
    Text(String),
    /// The underlying failure, when it happened before a usable response.
    Failure(Arc<Failure>),
}

/// Causes of a call failing outside of a non-success HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum Failure {
    #[error("{0}")]
    Transport(Box<dyn std::error::Error + Send + Sync>),
    #[error("Failed to serialize request body: {0}")]
    Serialize(serde_json::Error),
    #[error("Failed to decode response: {0}")]
    Decode(serde_json::Error),
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error(transparent)]
    Normalized(#[from] ClientError),
}

pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    pub fn new(message: impl Into<String>, status: u16, details: Option<ErrorDetails>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            message
        };
        Self {
            message,
            status,
            details,
        }
    }

    /// Normalize a failure that happened before any response existed.
    ///
    /// An already normalized error is returned as is.
    pub fn from_failure(failure: impl Into<Failure>) -> Self {
        match failure.into() {
            Failure::Normalized(err) => err,
            failure => Self::new(
                failure.to_string(),
                0,
                Some(ErrorDetails::Failure(Arc::new(failure))),
            ),
        }
    }

    /// Build the error for a response whose status is outside 2xx.
    pub(crate) fn from_status(status: u16, status_text: &str, body: &str) -> Self {
        let reason = if status_text.is_empty() {
            reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|code| code.canonical_reason())
                .unwrap_or_default()
        } else {
            status_text
        };
        let message = format!("HTTP {} {}", status, reason);
        Self::new(message.trim_end(), status, parse_details(body))
    }

    /// A 2xx response whose body could not be decoded.
    pub(crate) fn decode(status: u16, err: serde_json::Error) -> Self {
        Self::new(
            format!("Failed to decode response (HTTP {}): {}", status, err),
            status,
            Some(ErrorDetails::Failure(Arc::new(Failure::Decode(err)))),
        )
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn details(&self) -> Option<&ErrorDetails> {
        self.details.as_ref()
    }

    /// True when no HTTP response was received.
    pub fn is_transport(&self) -> bool {
        self.status == 0
    }

    pub fn failure(&self) -> Option<&Failure> {
        self.details.as_ref().and_then(ErrorDetails::as_failure)
    }
}

impl ErrorDetails {
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ErrorDetails::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ErrorDetails::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_failure(&self) -> Option<&Failure> {
        match self {
            ErrorDetails::Failure(failure) => Some(failure),
            _ => None,
        }
    }

    /// The backend's `{"error": "..."}` body, if that is what came back.
    pub fn error_response(&self) -> Option<ErrorResponse> {
        self.as_json().and_then(|value| serde_json::from_value(value.clone()).ok())
    }
}

impl From<Failure> for ClientError {
    fn from(failure: Failure) -> Self {
        ClientError::from_failure(failure)
    }
}

impl From<reqwest::Error> for Failure {
    fn from(err: reqwest::Error) -> Self {
        Failure::Transport(Box::new(err))
    }
}

// Strict JSON first, raw text otherwise. Never fails.
fn parse_details(body: &str) -> Option<ErrorDetails> {
    if body.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => Some(ErrorDetails::Json(value)),
        Err(_) => Some(ErrorDetails::Text(body.to_string())),
    }
}
