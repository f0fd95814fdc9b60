//! Shared wiring for pipeline integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use archive_parser::{ArchiveError, ArchiveResult, IceDecoder, NpzArchiveDecoder};
use bytes::Bytes;
use raster::Raster;
use test_utils::{
    create_temperature_grid, create_test_grid, MemoryBlobStore, NpzBuilder, RecordingNotifier,
    StaticSource, TEST_BUCKET,
};
use tiff_pipeline::Services;

pub const WIDTH: usize = 8;
pub const HEIGHT: usize = 4;

/// Ice decoder returning a fixed band, or failing when none is set.
pub struct StaticIceDecoder(pub Option<Raster<i8>>);

impl IceDecoder for StaticIceDecoder {
    fn read_ice_fraction(&self, _data: &[u8]) -> ArchiveResult<Raster<i8>> {
        self.0
            .clone()
            .ok_or_else(|| ArchiveError::MissingArray("sea_ice_fraction".to_string()))
    }
}

pub struct Harness {
    pub store: Arc<MemoryBlobStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub source: Arc<StaticSource>,
    pub services: Services,
}

pub fn harness(source: StaticSource, ice: Option<Raster<i8>>) -> Harness {
    harness_with_notifier(source, ice, RecordingNotifier::new())
}

pub fn harness_with_notifier(
    source: StaticSource,
    ice: Option<Raster<i8>>,
    notifier: RecordingNotifier,
) -> Harness {
    let store = Arc::new(MemoryBlobStore::new(TEST_BUCKET));
    let notifier = Arc::new(notifier);
    let source = Arc::new(source);

    let services = Services {
        store: store.clone(),
        notifier: notifier.clone(),
        source: source.clone(),
        archives: Arc::new(NpzArchiveDecoder),
        ice: Arc::new(StaticIceDecoder(ice)),
    };

    Harness {
        store,
        notifier,
        source,
        services,
    }
}

/// Forecast archive with every parameter array.
pub fn full_archive() -> Bytes {
    NpzBuilder::new()
        .array_f32(
            "SeaSurfaceTemperature",
            WIDTH,
            HEIGHT,
            create_temperature_grid(WIDTH, HEIGHT),
        )
        .array_f32("SeaSurfacePressure", WIDTH, HEIGHT, create_test_grid(WIDTH, HEIGHT))
        .array_f32(
            "AirTemperature",
            WIDTH,
            HEIGHT,
            create_temperature_grid(WIDTH, HEIGHT),
        )
        .array_f32("Visibility", WIDTH, HEIGHT, vec![10_000.0; WIDTH * HEIGHT])
        .compressed()
        .build()
}

/// Forecast archive without the optional visibility array.
pub fn archive_without_visibility() -> Bytes {
    NpzBuilder::new()
        .array_f32(
            "SeaSurfaceTemperature",
            WIDTH,
            HEIGHT,
            create_temperature_grid(WIDTH, HEIGHT),
        )
        .array_f32("SeaSurfacePressure", WIDTH, HEIGHT, create_test_grid(WIDTH, HEIGHT))
        .array_f32(
            "AirTemperature",
            WIDTH,
            HEIGHT,
            create_temperature_grid(WIDTH, HEIGHT),
        )
        .build()
}

pub const F000: &str = "https://weather.example.com/2023031500/f000.npz";
pub const F003: &str = "https://weather.example.com/2023031500/f003.npz";
pub const ANALYSIS: &str = "2023-03-15T00:00:00";

/// Two-file forecast response for analysis 2023-03-15 00Z.
pub fn two_file_response() -> String {
    test_utils::forecast_response(
        ANALYSIS,
        vec![
            test_utils::forecast_file(F000, ANALYSIS, "2023-03-15T00:00:00"),
            test_utils::forecast_file(F003, ANALYSIS, "2023-03-15T03:00:00"),
        ],
    )
}
