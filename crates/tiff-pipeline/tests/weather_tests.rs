//! End-to-end tests for the weather pipeline against in-memory collaborators.

mod common;

use bytes::Bytes;
use common::*;
use test_utils::{RecordingNotifier, StaticSource, TEST_BUCKET};
use tiff_common::{ForecastResponse, Listing, TransferKind};
use tiff_pipeline::{PipelineConfig, PipelineError, WeatherPipeline};

fn pipeline(h: &Harness) -> WeatherPipeline {
    WeatherPipeline::new(h.services.clone(), PipelineConfig::default())
}

fn response() -> ForecastResponse {
    ForecastResponse::from_json(&two_file_response()).unwrap()
}

#[tokio::test]
async fn test_two_files_all_parameters() {
    let h = harness(
        StaticSource::new()
            .with(F000, full_archive())
            .with(F003, full_archive()),
        None,
    );

    let summary = pipeline(&h).run(&response()).await.unwrap();

    let tif_puts: Vec<String> = h
        .store
        .put_keys()
        .into_iter()
        .filter(|k| k.ends_with(".tif"))
        .collect();
    assert_eq!(
        tif_puts,
        vec![
            "v2/2023031500/seaTemperature2023031500.tif",
            "v2/2023031500/airPressure2023031500.tif",
            "v2/2023031500/airTemperature2023031500.tif",
            "v2/2023031500/visibility2023031500.tif",
            "v2/2023031500/airPressure2023031503.tif",
            "v2/2023031500/airTemperature2023031503.tif",
            "v2/2023031500/visibility2023031503.tif",
        ]
    );
    assert_eq!(summary.raster_keys, tif_puts);

    // Listing written twice with identical bytes
    let listing_puts: Vec<String> = h
        .store
        .put_keys()
        .into_iter()
        .filter(|k| k.ends_with(".json"))
        .collect();
    assert_eq!(
        listing_puts,
        vec![
            "v2/list-2023031500.json",
            "v2/listings/list-2023031500.json"
        ]
    );
    let latest = h.store.object("v2/list-2023031500.json").unwrap();
    let historic = h.store.object("v2/listings/list-2023031500.json").unwrap();
    assert_eq!(latest, historic);

    // One tiff publish pointing at the latest listing
    let messages = h.notifier.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].kind, TransferKind::Tiff);
    assert_eq!(messages[0].bucket_name, TEST_BUCKET);
    assert_eq!(messages[0].blob_file, "v2/list-2023031500.json");
    assert_eq!(summary.listing_key, "v2/list-2023031500.json");
}

#[tokio::test]
async fn test_listing_contents() {
    let h = harness(
        StaticSource::new()
            .with(F000, full_archive())
            .with(F003, archive_without_visibility()),
        None,
    );

    pipeline(&h).run(&response()).await.unwrap();

    let body = h.store.object("v2/list-2023031500.json").unwrap();
    let listing: Listing = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        listing.sea_temperature,
        "v2/2023031500/seaTemperature2023031500.tif"
    );
    assert_eq!(listing.forecast.len(), 2);
    assert_eq!(
        listing.forecast[0].visibility.as_deref(),
        Some("v2/2023031500/visibility2023031500.tif")
    );
    assert_eq!(listing.forecast[1].visibility, None);
    assert_eq!(
        listing.forecast[1].air_pressure,
        "v2/2023031500/airPressure2023031503.tif"
    );

    let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(value["forecast"][1]["visibility"].is_null());
    assert!(value["forecast"][0]["airTemperature"].is_string());
}

#[tokio::test]
async fn test_first_archive_fetched_once() {
    let h = harness(
        StaticSource::new()
            .with(F000, full_archive())
            .with(F003, full_archive()),
        None,
    );

    pipeline(&h).run(&response()).await.unwrap();

    assert_eq!(h.source.fetch_count(F000), 1);
    assert_eq!(h.source.fetch_count(F003), 1);
}

#[tokio::test]
async fn test_rasters_are_tiff() {
    let h = harness(
        StaticSource::new()
            .with(F000, full_archive())
            .with(F003, full_archive()),
        None,
    );

    pipeline(&h).run(&response()).await.unwrap();

    let raster = h
        .store
        .object("v2/2023031500/airPressure2023031503.tif")
        .unwrap();
    assert_eq!(&raster[..4], b"II*\0");
}

#[tokio::test]
async fn test_cleanup_after_publish() {
    let h = harness(
        StaticSource::new()
            .with(F000, full_archive())
            .with(F003, full_archive()),
        None,
    );
    for day in 1..=9 {
        h.store.insert(
            format!("v2/list-202303{:02}00.json", day),
            Bytes::from_static(b"{}"),
        );
        h.store.insert(
            format!("v2/listings/list-202303{:02}00.json", day),
            Bytes::from_static(b"{}"),
        );
    }

    let summary = pipeline(&h).run(&response()).await.unwrap();

    // 9 seeded + 1 new = 10, retention 8
    assert_eq!(
        summary.pruned,
        vec!["v2/list-2023030100.json", "v2/list-2023030200.json"]
    );
    assert_eq!(h.store.deleted_keys(), summary.pruned);
    assert!(h.store.object("v2/list-2023031500.json").is_some());
    assert!(h.store.object("v2/listings/list-2023030100.json").is_some());
}

#[tokio::test]
async fn test_rerun_overwrites_same_keys() {
    let h = harness(
        StaticSource::new()
            .with(F000, full_archive())
            .with(F003, full_archive()),
        None,
    );
    let pipeline = pipeline(&h);

    pipeline.run(&response()).await.unwrap();
    let keys_after_first = h.store.keys();
    let listing_first = h.store.object("v2/list-2023031500.json").unwrap();

    pipeline.run(&response()).await.unwrap();
    assert_eq!(h.store.keys(), keys_after_first);
    assert_eq!(
        h.store.object("v2/list-2023031500.json").unwrap(),
        listing_first
    );
}

#[tokio::test]
async fn test_write_failure_aborts_before_listing() {
    let h = harness(
        StaticSource::new()
            .with(F000, full_archive())
            .with(F003, full_archive()),
        None,
    );
    h.store.fail_puts_matching("visibility2023031503");

    let result = pipeline(&h).run(&response()).await;

    assert!(matches!(result, Err(PipelineError::Storage(_))));
    assert!(h.store.put_keys().iter().all(|k| !k.ends_with(".json")));
    assert!(h.notifier.messages().is_empty());
}

#[tokio::test]
async fn test_fetch_failure_is_upstream_error() {
    let h = harness(StaticSource::new().with(F000, full_archive()), None);

    let result = pipeline(&h).run(&response()).await;

    assert!(matches!(
        result,
        Err(PipelineError::UpstreamFetch { url, .. }) if url == F003
    ));
    assert!(h.notifier.messages().is_empty());
}

#[tokio::test]
async fn test_non_archive_body_is_malformed() {
    let h = harness(
        StaticSource::new().with(F000, Bytes::from_static(b"<html>gateway timeout</html>")),
        None,
    );

    let result = pipeline(&h).run(&response()).await;

    assert!(matches!(result, Err(PipelineError::MalformedArchive(_))));
    assert!(h.store.put_keys().is_empty());
}

#[tokio::test]
async fn test_missing_required_array() {
    let archive = test_utils::NpzBuilder::new()
        .array_f32("SeaSurfaceTemperature", WIDTH, HEIGHT, vec![280.0; WIDTH * HEIGHT])
        .build();
    let h = harness(StaticSource::new().with(F000, archive), None);

    let result = pipeline(&h).run(&response()).await;

    assert!(matches!(
        result,
        Err(PipelineError::MissingArray(name)) if name == "SeaSurfacePressure"
    ));
}

#[tokio::test]
async fn test_empty_file_list_is_malformed() {
    let h = harness(StaticSource::new(), None);
    let response =
        ForecastResponse::from_json(&test_utils::forecast_response(ANALYSIS, vec![])).unwrap();

    let result = pipeline(&h).run(&response).await;

    assert!(matches!(result, Err(PipelineError::MalformedEvent(_))));
    assert_eq!(h.source.total_fetches(), 0);
}

#[tokio::test]
async fn test_publish_failure_is_notify_error() {
    let h = harness_with_notifier(
        StaticSource::new()
            .with(F000, full_archive())
            .with(F003, full_archive()),
        None,
        RecordingNotifier::failing(),
    );

    let result = pipeline(&h).run(&response()).await;

    assert!(matches!(result, Err(PipelineError::Notify(_))));
    // Cleanup only runs after a successful publish
    assert!(h.store.deleted_keys().is_empty());
}
