//! Ice pipeline: one sea-ice fraction raster per release.

use bytes::Bytes;
use tracing::{info, instrument};

use raster::{encode_tiff, flipud, Raster};
use tiff_common::{ice_key, IceDataEvent, TransferKind, TransferMessage};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::services::Services;

/// Rows of a validated ice raster.
pub const ICE_HEIGHT: usize = 3600;
/// Columns of a validated ice raster.
pub const ICE_WIDTH: usize = 7200;

/// Fill value for unmeasured cells (land, outside coverage).
const NO_DATA: i8 = -128;

/// Check that every value is a percentage or the no-data marker.
pub fn validate_ice_fraction(raster: &Raster<i8>) -> PipelineResult<()> {
    match raster
        .data()
        .iter()
        .position(|&v| v != NO_DATA && !(0..=100).contains(&v))
    {
        Some(index) => Err(PipelineError::InvalidIceData(format!(
            "value {} at row {}, column {} is outside 0..=100",
            raster.data()[index],
            index / raster.width().max(1),
            index % raster.width().max(1)
        ))),
        None => Ok(()),
    }
}

/// Validate, remap no-data to 0 (no ice), narrow to u8 and check the
/// expected `shape` as `(rows, cols)`.
pub fn prepare_ice_raster(raw: &Raster<i8>, shape: (usize, usize)) -> PipelineResult<Raster<u8>> {
    validate_ice_fraction(raw)?;

    let fraction = raw.map(|&v| if v == NO_DATA { 0u8 } else { v as u8 });

    if fraction.shape() != shape {
        return Err(PipelineError::ShapeMismatch {
            expected: shape,
            actual: fraction.shape(),
        });
    }

    Ok(fraction)
}

pub struct IcePipeline {
    services: Services,
    config: PipelineConfig,
}

impl IcePipeline {
    pub fn new(services: Services, config: PipelineConfig) -> Self {
        Self { services, config }
    }

    /// Render and announce the ice raster of a release.
    #[instrument(skip(self, event), fields(url = %event.ice_url, release = %event.ice_release))]
    pub async fn run(&self, event: &IceDataEvent) -> PipelineResult<String> {
        self.run_with_shape(event, (ICE_HEIGHT, ICE_WIDTH)).await
    }

    /// [`IcePipeline::run`] with a different expected grid shape.
    pub async fn run_with_shape(
        &self,
        event: &IceDataEvent,
        shape: (usize, usize),
    ) -> PipelineResult<String> {
        let data = self.services.source.fetch(&event.ice_url).await?;
        let raw = self.services.ice.read_ice_fraction(&data)?;
        drop(data);

        let fraction = prepare_ice_raster(&raw, shape)?;
        let oriented = flipud(&fraction);
        let tiff = encode_tiff(&oriented, self.config.compression)?;

        let key = ice_key(&event.ice_release);
        info!(bucket = %self.services.store.bucket(), key = %key, size = tiff.len(), "Writing ice raster");
        self.services.store.put(&key, Bytes::from(tiff)).await?;

        let message =
            TransferMessage::new(TransferKind::Ice, self.services.store.bucket(), key.clone());
        self.services.notifier.publish(&message).await?;

        Ok(key)
    }
}
