//! Forecast archives: NumPy `.npz` containers of named 2-D arrays.

use std::collections::BTreeSet;
use std::io::Cursor;

use bytes::Bytes;
use npyz::npz::NpzArchive;
use npyz::{DType, NpyFile, Order};
use tracing::debug;

use raster::Raster;

use crate::error::{ArchiveError, ArchiveResult};

/// Read access to the arrays of an opened archive.
///
/// The archive owns the downloaded bytes; dropping it releases them.
pub trait NamedArrays: Send {
    /// Names of every array in the archive.
    fn names(&self) -> Vec<String>;

    /// Whether an array with this name exists. Optional arrays are checked
    /// with this before reading.
    fn contains(&self, name: &str) -> bool;

    /// Read a 2-D float array. Fails with [`ArchiveError::MissingArray`] when
    /// the name is absent.
    fn read_f32(&mut self, name: &str) -> ArchiveResult<Raster<f32>>;
}

/// Opens downloaded archive bytes.
pub trait ArchiveDecoder: Send + Sync {
    fn open(&self, data: Bytes) -> ArchiveResult<Box<dyn NamedArrays>>;
}

/// Decoder for `.npz` archives as written by `numpy.savez[_compressed]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NpzArchiveDecoder;

impl ArchiveDecoder for NpzArchiveDecoder {
    fn open(&self, data: Bytes) -> ArchiveResult<Box<dyn NamedArrays>> {
        Ok(Box::new(NpzArchiveFile::open(data)?))
    }
}

/// An opened `.npz` archive.
pub struct NpzArchiveFile {
    archive: NpzArchive<Cursor<Bytes>>,
    names: BTreeSet<String>,
}

impl NpzArchiveFile {
    pub fn open(data: Bytes) -> ArchiveResult<Self> {
        let size = data.len();
        let archive = NpzArchive::new(Cursor::new(data))
            .map_err(|e| ArchiveError::Malformed(format!("not an npz archive: {}", e)))?;
        let names: BTreeSet<String> = archive.array_names().map(str::to_string).collect();

        debug!(size = size, arrays = ?names, "Opened npz archive");

        Ok(Self { archive, names })
    }
}

impl NamedArrays for NpzArchiveFile {
    fn names(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }

    fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    fn read_f32(&mut self, name: &str) -> ArchiveResult<Raster<f32>> {
        let npy = self
            .archive
            .by_name(name)
            .map_err(|e| ArchiveError::Malformed(format!("Failed to read {}: {}", name, e)))?
            .ok_or_else(|| ArchiveError::MissingArray(name.to_string()))?;

        read_npy_f32(name, npy)
    }
}

fn read_npy_f32<R: std::io::Read>(name: &str, npy: NpyFile<R>) -> ArchiveResult<Raster<f32>> {
    if matches!(npy.order(), Order::Fortran) {
        return Err(ArchiveError::Malformed(format!(
            "{} is stored in Fortran order",
            name
        )));
    }

    let shape = npy
        .shape()
        .iter()
        .map(|&dim| usize::try_from(dim))
        .collect::<Result<Vec<usize>, _>>()
        .map_err(|_| ArchiveError::Malformed(format!("{} has an oversized dimension", name)))?;

    let dtype = match npy.dtype() {
        DType::Plain(type_str) => type_str.to_string(),
        other => {
            return Err(ArchiveError::Malformed(format!(
                "{} has unsupported dtype {:?}",
                name, other
            )))
        }
    };

    // Some producers write doubles; narrow them the way imaging libraries do.
    let data: Vec<f32> = if dtype.ends_with("f8") {
        npy.into_vec::<f64>()
            .map_err(|e| ArchiveError::Malformed(format!("Failed to decode {}: {}", name, e)))?
            .into_iter()
            .map(|v| v as f32)
            .collect()
    } else {
        npy.into_vec::<f32>()
            .map_err(|e| ArchiveError::Malformed(format!("Failed to decode {}: {}", name, e)))?
    };

    Raster::from_shape(&shape, data).map_err(|e| ArchiveError::Malformed(format!("{}: {}", name, e)))
}
