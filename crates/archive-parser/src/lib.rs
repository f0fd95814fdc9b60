//! Archive decoders for the TIFF generation pipeline.
//!
//! Two upstream formats are read:
//!
//! - **Forecast archives**: NumPy `.npz` containers holding one 2-D `float32`
//!   array per weather parameter (`SeaSurfaceTemperature`,
//!   `SeaSurfacePressure`, `AirTemperature`, optionally `Visibility`).
//! - **Sea-ice files**: HDF5 (netCDF-4) files with a `sea_ice_fraction`
//!   dataset of shape `[time, lat, lon]` stored as signed bytes.
//!
//! Both sit behind small traits so the pipeline can be tested without real
//! archives.

pub mod error;
pub mod ice;
pub mod npz;

pub use error::{ArchiveError, ArchiveResult};
pub use ice::{silence_hdf5_errors, Hdf5IceDecoder, IceDecoder, SEA_ICE_FRACTION};
pub use npz::{ArchiveDecoder, NamedArrays, NpzArchiveDecoder};
