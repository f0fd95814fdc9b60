//! Error types for raster operations.

use thiserror::Error;

/// Result type for raster operations.
pub type RasterResult<T> = Result<T, RasterError>;

#[derive(Error, Debug)]
pub enum RasterError {
    /// Data does not describe a 2-D grid of the stated shape
    #[error("Invalid raster shape: {0}")]
    InvalidShape(String),

    /// TIFF serialization failed
    #[error("TIFF encoding failed: {0}")]
    Encoding(String),
}

impl From<::tiff::TiffError> for RasterError {
    fn from(err: ::tiff::TiffError) -> Self {
        RasterError::Encoding(err.to_string())
    }
}
