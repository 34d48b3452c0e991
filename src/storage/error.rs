//! Storage error types
//!
//! Defines all errors that can occur while reading the observation store.

use thiserror::Error;

/// Errors that can occur in the storage layer
#[derive(Error, Debug)]
pub enum StorageError {
    /// SQLite open, prepare or query failed
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Stored data does not follow the expected schema or format
    #[error("Corrupt data: {0}")]
    Corruption(String),

    /// The blocking task running a store call failed
    #[error("Task error: {0}")]
    Task(String),

    /// Store could not be set up from its configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<tokio::task::JoinError> for StorageError {
    fn from(err: tokio::task::JoinError) -> Self {
        StorageError::Task(err.to_string())
    }
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
