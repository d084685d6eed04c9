//! Error types for the sqlite storage crate.

use thiserror::Error;

/// Errors raised by the local key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying SQLite failure
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The connection mutex was poisoned by a panicking writer.
    #[error("storage connection lock is poisoned")]
    LockPoisoned,
}

impl From<StorageError> for grindlog_core::errors::Error {
    fn from(err: StorageError) -> Self {
        grindlog_core::errors::Error::Storage(err.to_string())
    }
}
