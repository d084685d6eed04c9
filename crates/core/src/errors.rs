//! Error types shared across the core crate.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the core services.
#[derive(Debug, Error)]
pub enum Error {
    /// Local durable storage failed to read or write.
    #[error("storage error: {0}")]
    Storage(String),

    /// The remote data service rejected or failed an operation. The queue
    /// treats every remote failure the same way, so the message is carried
    /// for logging only.
    #[error("remote error: {0}")]
    Remote(String),

    /// JSON serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A mutation payload was malformed (e.g. update without an `id`).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Create a remote error
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote(message.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
