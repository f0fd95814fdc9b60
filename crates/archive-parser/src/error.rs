//! Error types for archive decoding.

use thiserror::Error;

/// Result type for archive decoding.
pub type ArchiveResult<T> = Result<T, ArchiveError>;

#[derive(Error, Debug)]
pub enum ArchiveError {
    /// File I/O error (temporary files for HDF5 reads)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Content does not parse as the expected container
    #[error("Malformed archive: {0}")]
    Malformed(String),

    /// A required array or dataset is not in the container
    #[error("Missing array: {0}")]
    MissingArray(String),
}
