//! Raster handling for the TIFF generation pipeline.
//!
//! - [`Raster`]: row-major 2-D grid with its shape
//! - [`transform`]: grid reorientation (roll, vertical flip)
//! - [`tiff`]: TIFF encoding with planar-configuration metadata

pub mod error;
pub mod grid;
pub mod tiff;
pub mod transform;

pub use error::{RasterError, RasterResult};
pub use grid::Raster;
pub use self::tiff::{encode_tiff, TiffCompression, TiffSample};
pub use transform::{flipud, roll_and_flipud};
