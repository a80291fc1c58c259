//! Error types for the storage layer.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Error reported by the ledger backend.
    #[error("{0}")]
    Backend(String),

    /// Key or composite key component is not allowed.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Rich query string could not be parsed.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// A result iterator failed part-way through.
    #[error("{0}")]
    Iterator(String),

    /// A lock around in-memory state was poisoned by a panicking writer.
    #[error("world state lock poisoned")]
    Poisoned,
}
