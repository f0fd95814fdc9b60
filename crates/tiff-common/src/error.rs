//! Error types for shared pipeline types.

use thiserror::Error;

/// Result type alias using CommonError.
pub type CommonResult<T> = Result<T, CommonError>;

/// Errors raised while interpreting inbound events and their payloads.
#[derive(Debug, Error)]
pub enum CommonError {
    #[error("Unknown event type: {0}")]
    UnknownEventType(String),

    #[error("Invalid time specification: {0}")]
    InvalidTime(String),

    #[error("Malformed event: {0}")]
    MalformedEvent(String),
}

impl From<serde_json::Error> for CommonError {
    fn from(err: serde_json::Error) -> Self {
        CommonError::MalformedEvent(format!("JSON error: {}", err))
    }
}
