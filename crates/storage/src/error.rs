//! Error types for external collaborator clients.

use thiserror::Error;

/// Result type for client operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    /// Blob store request failed
    #[error("Storage error: {0}")]
    ObjectStore(String),

    /// Downstream notification could not be published
    #[error("Publish failed: {0}")]
    Publish(String),

    /// Upstream download failed (network error or non-success status)
    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
