//! Pipeline behaviour settings.

use raster::TiffCompression;

use crate::classifier::MissingTypePolicy;
use crate::retention::DEFAULT_RETENTION;

/// Settings shared by both pipelines.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Handling of records without a `Type` attribute
    pub missing_type: MissingTypePolicy,
    /// Compression for every raster written
    pub compression: TiffCompression,
    /// Number of "latest" listings kept in `v2/`
    pub retention: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            missing_type: MissingTypePolicy::default(),
            compression: TiffCompression::AdobeDeflate,
            retention: DEFAULT_RETENTION,
        }
    }
}
