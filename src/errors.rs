//! Client-side error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Caught before any request was sent.
    #[error("{0}")]
    Validation(String),

    #[error("Catalog service error (status {status_code}): {message}")]
    Status {
        status_code: u16,
        message: String,
    },

    #[error("Failed to decode service response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Session storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Transport-class failures collapse to a single generic notice in the UI.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::Network(_) | ClientError::Status { .. } | ClientError::Decode(_)
        )
    }

    /// Text shown to the user for this failure.
    pub fn notice(&self) -> String {
        match self {
            ClientError::Validation(message) => message.clone(),
            e if e.is_transport() => NETWORK_ERROR.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<anyhow::Error> for ClientError {
    fn from(err: anyhow::Error) -> Self {
        ClientError::Config(err.to_string())
    }
}

/// Generic notice for any request that did not produce a usable response.
pub const NETWORK_ERROR: &str = "Network error";

pub type Result<T> = std::result::Result<T, ClientError>;
