//! Error types for the connect crate.

use thiserror::Error;

/// Result type alias for connect operations.
pub type Result<T> = std::result::Result<T, ConnectError>;

/// Errors that can occur talking to the hosted data service.
///
/// The offline queue treats every remote failure as one failed attempt, so
/// no retry classification is carried here; the variants exist for logging
/// and for callers outside the queue.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error response from the data service
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid request (missing required data, etc.)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication error (missing or invalid credentials)
    #[error("Authentication error: {0}")]
    Auth(String),
}

impl ConnectError {
    /// Create an API error from status and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }
}

impl From<ConnectError> for grindlog_core::errors::Error {
    fn from(err: ConnectError) -> Self {
        match err {
            ConnectError::InvalidRequest(message) => {
                grindlog_core::errors::Error::InvalidInput(message)
            }
            other => grindlog_core::errors::Error::Remote(other.to_string()),
        }
    }
}
