//! TIFF generation pipeline.
//!
//! Turns inbound SNS notifications into TIFF rasters and listing manifests
//! in the blob store, then notifies downstream consumers.
//!
//! # Architecture
//!
//! - [`EventClassifier`] picks the payload schema of each record
//! - [`WeatherPipeline`] renders every parameter of a forecast response and
//!   writes the listing manifest
//! - [`IcePipeline`] renders a single sea-ice fraction raster
//! - [`RetentionCleaner`] prunes old "latest" listings
//! - [`Handler`] ties them together per invocation
//!
//! External systems are reached through the capability traits in
//! `storage` and `archive-parser`, bundled in [`Services`].

pub mod classifier;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod handler;
pub mod ice;
pub mod retention;
pub mod services;
pub mod weather;

// Re-exports
pub use classifier::{EventClassifier, MissingTypePolicy};
pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use fetcher::ArchiveFetcher;
pub use handler::{Handler, InvocationReport, RecordOutcome};
pub use ice::{prepare_ice_raster, validate_ice_fraction, IcePipeline, ICE_HEIGHT, ICE_WIDTH};
pub use retention::{RetentionCleaner, DEFAULT_RETENTION};
pub use services::Services;
pub use weather::{WeatherPipeline, WeatherRunSummary};
