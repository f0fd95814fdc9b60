//! Sea-ice fraction reading from HDF5 (netCDF-4) files.
//!
//! The netcdf library needs a file path, so downloaded bytes go to a
//! temporary file first. The container reads lazily from that file: it is
//! closed before the file is removed, and the returned raster is an owned
//! copy that stays valid after both are gone.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Once;

use tracing::debug;

use raster::Raster;

use crate::error::{ArchiveError, ArchiveResult};

/// Dataset holding the ice fraction in percent, `-128` for no data.
pub const SEA_ICE_FRACTION: &str = "sea_ice_fraction";

/// Silence HDF5's automatic error printing to stderr.
///
/// The C library prints diagnostics even for conditions the caller handles
/// (missing optional attributes, probing for datasets). Safe to call more
/// than once.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 with null handler and client data disables
        // automatic printing for the default error stack.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Reads the raw (unvalidated) ice fraction band from downloaded bytes.
pub trait IceDecoder: Send + Sync {
    fn read_ice_fraction(&self, data: &[u8]) -> ArchiveResult<Raster<i8>>;
}

/// HDF5 reader returning the first band of a `[band, rows, cols]` dataset.
#[derive(Debug, Clone)]
pub struct Hdf5IceDecoder {
    dataset: String,
    temp_dir: PathBuf,
}

impl Default for Hdf5IceDecoder {
    fn default() -> Self {
        Self::new(SEA_ICE_FRACTION)
    }
}

impl Hdf5IceDecoder {
    pub fn new(dataset: impl Into<String>) -> Self {
        Self {
            dataset: dataset.into(),
            temp_dir: optimal_temp_dir(),
        }
    }

    pub fn with_temp_dir(mut self, temp_dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = temp_dir.into();
        self
    }
}

impl IceDecoder for Hdf5IceDecoder {
    fn read_ice_fraction(&self, data: &[u8]) -> ArchiveResult<Raster<i8>> {
        silence_hdf5_errors();

        let mut backing = tempfile::Builder::new()
            .prefix("ice_")
            .suffix(".nc")
            .tempfile_in(&self.temp_dir)?;
        backing.write_all(data)?;
        backing.flush()?;

        let band = {
            let file = netcdf::open(backing.path())
                .map_err(|e| ArchiveError::Malformed(format!("Failed to open HDF5: {}", e)))?;
            read_first_band(&file, &self.dataset)?
            // container closed here
        };

        backing.close()?;

        debug!(
            dataset = %self.dataset,
            rows = band.height(),
            cols = band.width(),
            "Read ice fraction band"
        );

        Ok(band)
    }
}

fn read_first_band(file: &netcdf::File, dataset: &str) -> ArchiveResult<Raster<i8>> {
    let variable = file
        .variable(dataset)
        .ok_or_else(|| ArchiveError::MissingArray(dataset.to_string()))?;

    let dims: Vec<usize> = variable.dimensions().iter().map(|d| d.len()).collect();

    let (rows, cols) = match dims.as_slice() {
        [bands, rows, cols] if *bands > 0 => (*rows, *cols),
        [0, _, _] => {
            return Err(ArchiveError::Malformed(format!("{} has no bands", dataset)));
        }
        other => {
            return Err(ArchiveError::Malformed(format!(
                "{} has {} dimensions, expected 3",
                dataset,
                other.len()
            )));
        }
    };

    let values: Vec<i8> = variable
        .get_values::<i8, _>((0usize, .., ..))
        .map_err(|e| ArchiveError::Malformed(format!("Failed to read {}: {}", dataset, e)))?;

    Raster::new(values, cols, rows).map_err(|e| ArchiveError::Malformed(e.to_string()))
}

/// Memory-backed tmpfs when available, the system temp directory otherwise.
fn optimal_temp_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        let shm = std::path::Path::new("/dev/shm");
        if shm.is_dir() && tempfile::tempfile_in(shm).is_ok() {
            return shm.to_path_buf();
        }
    }

    std::env::temp_dir()
}
