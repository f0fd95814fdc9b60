//! Error types for the pipeline crate.

use thiserror::Error;

use archive_parser::ArchiveError;
use raster::RasterError;
use storage::StorageError;
use tiff_common::CommonError;

/// Errors that abort processing of a record.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Unknown event type: {0}")]
    UnknownEventType(String),

    #[error("Record has no Type attribute")]
    MissingEventType,

    #[error("Malformed event: {0}")]
    MalformedEvent(String),

    #[error("Failed to fetch {url}: {message}")]
    UpstreamFetch { url: String, message: String },

    #[error("Malformed archive: {0}")]
    MalformedArchive(String),

    #[error("Required array missing: {0}")]
    MissingArray(String),

    #[error("Invalid ice data: {0}")]
    InvalidIceData(String),

    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Encoding failed: {0}")]
    Encoding(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Notification failed: {0}")]
    Notify(String),

    #[error("{0} of {1} records failed")]
    RecordsFailed(usize, usize),
}

/// Result type for pipeline operations.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

impl From<CommonError> for PipelineError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::UnknownEventType(value) => PipelineError::UnknownEventType(value),
            CommonError::InvalidTime(msg) | CommonError::MalformedEvent(msg) => {
                PipelineError::MalformedEvent(msg)
            }
        }
    }
}

impl From<ArchiveError> for PipelineError {
    fn from(err: ArchiveError) -> Self {
        match err {
            ArchiveError::MissingArray(name) => PipelineError::MissingArray(name),
            ArchiveError::Malformed(msg) => PipelineError::MalformedArchive(msg),
            ArchiveError::Io(e) => PipelineError::MalformedArchive(format!("I/O error: {}", e)),
        }
    }
}

impl From<RasterError> for PipelineError {
    fn from(err: RasterError) -> Self {
        PipelineError::Encoding(err.to_string())
    }
}

impl From<StorageError> for PipelineError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Fetch { url, message } => PipelineError::UpstreamFetch { url, message },
            StorageError::Publish(msg) => PipelineError::Notify(msg),
            other => PipelineError::Storage(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_errors_map_by_kind() {
        let fetch: PipelineError = StorageError::Fetch {
            url: "https://a/f.npz".to_string(),
            message: "404".to_string(),
        }
        .into();
        assert!(matches!(fetch, PipelineError::UpstreamFetch { .. }));

        let publish: PipelineError = StorageError::Publish("denied".to_string()).into();
        assert!(matches!(publish, PipelineError::Notify(_)));

        let put: PipelineError = StorageError::ObjectStore("timeout".to_string()).into();
        assert!(matches!(put, PipelineError::Storage(_)));
    }

    #[test]
    fn test_archive_errors_map_by_kind() {
        let missing: PipelineError = ArchiveError::MissingArray("AirTemperature".into()).into();
        assert!(matches!(missing, PipelineError::MissingArray(name) if name == "AirTemperature"));

        let malformed: PipelineError = ArchiveError::Malformed("bad zip".into()).into();
        assert!(matches!(malformed, PipelineError::MalformedArchive(_)));
    }

    #[test]
    fn test_records_failed_message() {
        assert_eq!(
            PipelineError::RecordsFailed(1, 3).to_string(),
            "1 of 3 records failed"
        );
    }
}
