//! TIFF encoding for single-band rasters.
//!
//! Every image carries `PlanarConfiguration = 2` (separate planes). Weather
//! parameters are written as 32-bit IEEE float gray, ice fraction as 8-bit
//! gray. Output is deterministic for a given raster and compression mode.

use std::io::{Cursor, Seek, Write};

use ::tiff::encoder::colortype::{self, ColorType};
use ::tiff::encoder::compression::{Compression, Deflate, Uncompressed};
use ::tiff::encoder::{ImageEncoder, TiffEncoder, TiffKindStandard, TiffValue};
use ::tiff::tags::Tag;
use tracing::debug;

use crate::error::{RasterError, RasterResult};
use crate::grid::Raster;

/// PlanarConfiguration value for "separate" planes.
pub const PLANAR_SEPARATE: u16 = 2;

/// Compression applied to the image strips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TiffCompression {
    #[default]
    None,
    /// Deflate, TIFF compression tag 8 ("tiff_adobe_deflate")
    AdobeDeflate,
}

impl TiffCompression {
    /// Parse a compression name as used by imaging libraries.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "" | "raw" | "none" => Some(TiffCompression::None),
            "tiff_adobe_deflate" | "adobe_deflate" | "deflate" => {
                Some(TiffCompression::AdobeDeflate)
            }
            _ => None,
        }
    }
}

/// Sample types that can be written as a gray TIFF.
pub trait TiffSample: Copy + Sized {
    #[doc(hidden)]
    fn encode(raster: &Raster<Self>, compression: TiffCompression) -> RasterResult<Vec<u8>>;
}

impl TiffSample for f32 {
    fn encode(raster: &Raster<Self>, compression: TiffCompression) -> RasterResult<Vec<u8>> {
        write_image::<colortype::Gray32Float>(raster, compression)
    }
}

impl TiffSample for u8 {
    fn encode(raster: &Raster<Self>, compression: TiffCompression) -> RasterResult<Vec<u8>> {
        write_image::<colortype::Gray8>(raster, compression)
    }
}

/// Encode a raster as TIFF bytes.
pub fn encode_tiff<T: TiffSample>(
    raster: &Raster<T>,
    compression: TiffCompression,
) -> RasterResult<Vec<u8>> {
    if raster.width() == 0 || raster.height() == 0 {
        return Err(RasterError::Encoding(format!(
            "cannot encode empty {}x{} raster",
            raster.height(),
            raster.width()
        )));
    }

    let bytes = T::encode(raster, compression)?;

    debug!(
        width = raster.width(),
        height = raster.height(),
        compression = ?compression,
        size = bytes.len(),
        "Encoded TIFF"
    );

    Ok(bytes)
}

fn write_image<C>(raster: &Raster<C::Inner>, compression: TiffCompression) -> RasterResult<Vec<u8>>
where
    C: ColorType,
    [C::Inner]: TiffValue,
{
    let width = dimension(raster.width())?;
    let height = dimension(raster.height())?;
    let mut buffer = Cursor::new(Vec::new());

    {
        let mut encoder = TiffEncoder::new(&mut buffer)?;
        match compression {
            TiffCompression::None => {
                let image =
                    encoder.new_image_with_compression::<C, _>(width, height, Uncompressed)?;
                write_separate(image, raster.data())?;
            }
            TiffCompression::AdobeDeflate => {
                let image = encoder.new_image_with_compression::<C, _>(
                    width,
                    height,
                    Deflate::default(),
                )?;
                write_separate(image, raster.data())?;
            }
        }
    }

    Ok(buffer.into_inner())
}

fn write_separate<W, C, D>(
    mut image: ImageEncoder<'_, W, C, TiffKindStandard, D>,
    data: &[C::Inner],
) -> RasterResult<()>
where
    W: Write + Seek,
    C: ColorType,
    D: Compression,
    [C::Inner]: TiffValue,
{
    image
        .encoder()
        .write_tag(Tag::PlanarConfiguration, PLANAR_SEPARATE)?;
    image.write_data(data)?;
    Ok(())
}

fn dimension(value: usize) -> RasterResult<u32> {
    u32::try_from(value)
        .map_err(|_| RasterError::Encoding(format!("dimension {} exceeds TIFF limits", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compression_names() {
        assert_eq!(
            TiffCompression::from_name("tiff_adobe_deflate"),
            Some(TiffCompression::AdobeDeflate)
        );
        assert_eq!(TiffCompression::from_name(""), Some(TiffCompression::None));
        assert_eq!(TiffCompression::from_name("lzw"), None);
        assert_eq!(TiffCompression::default(), TiffCompression::None);
    }

    #[test]
    fn test_tiff_header() {
        let raster = Raster::new(vec![0u8; 16], 4, 4).unwrap();
        let bytes = encode_tiff(&raster, TiffCompression::None).unwrap();
        // Little-endian classic TIFF
        assert_eq!(&bytes[..4], &[0x49, 0x49, 0x2A, 0x00]);
    }

    #[test]
    fn test_empty_raster_is_rejected() {
        let raster: Raster<f32> = Raster::new(Vec::new(), 0, 10).unwrap();
        assert!(matches!(
            encode_tiff(&raster, TiffCompression::AdobeDeflate),
            Err(RasterError::Encoding(_))
        ));
    }
}
