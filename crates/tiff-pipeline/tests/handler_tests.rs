//! Tests for per-record dispatch.

mod common;

use bytes::Bytes;
use common::*;
use raster::Raster;
use test_utils::{ice_event, single_record_event, sns_event, sns_record, StaticSource};
use tiff_common::{SnsEvent, TransferKind};
use tiff_pipeline::{
    Handler, MissingTypePolicy, PipelineConfig, PipelineError, RecordOutcome, ICE_HEIGHT,
    ICE_WIDTH,
};

const ICE_URL: &str = "https://ice.example.com/20230315-sea-ice.nc";

fn parse(body: &str) -> SnsEvent {
    serde_json::from_str(body).unwrap()
}

fn full_band() -> Raster<i8> {
    Raster::new(vec![-128i8; ICE_HEIGHT * ICE_WIDTH], ICE_WIDTH, ICE_HEIGHT).unwrap()
}

fn weather_source() -> StaticSource {
    StaticSource::new()
        .with(F000, full_archive())
        .with(F003, full_archive())
}

#[tokio::test]
async fn test_untyped_record_runs_weather() {
    let h = harness(weather_source(), None);
    let handler = Handler::new(h.services.clone(), PipelineConfig::default());

    let event = parse(&single_record_event(None, &two_file_response()));
    let outcomes = handler.handle(&event).await.into_result().unwrap();

    assert_eq!(
        outcomes,
        vec![RecordOutcome::Weather {
            listing_key: "v2/list-2023031500.json".to_string()
        }]
    );
    assert_eq!(h.notifier.messages()[0].kind, TransferKind::Tiff);
}

#[tokio::test]
async fn test_ice_record() {
    let h = harness(
        StaticSource::new().with(ICE_URL, Bytes::from_static(b"hdf5")),
        Some(full_band()),
    );
    let handler = Handler::new(h.services.clone(), PipelineConfig::default());

    let body = ice_event(ICE_URL, "2023-03-15T00:00:00");
    let event = parse(&single_record_event(Some("Ice"), &body));
    let outcomes = handler.handle(&event).await.into_result().unwrap();

    assert_eq!(
        outcomes,
        vec![RecordOutcome::Ice {
            key: "v2/ice/20230315.tif".to_string()
        }]
    );
}

#[tokio::test]
async fn test_failed_record_does_not_block_later_records() {
    let h = harness(
        StaticSource::new().with(ICE_URL, Bytes::from_static(b"hdf5")),
        Some(full_band()),
    );
    let handler = Handler::new(h.services.clone(), PipelineConfig::default());

    let body = ice_event(ICE_URL, "2023-03-15T00:00:00");
    let event = parse(&sns_event(vec![
        sns_record(Some("Bogus"), &body),
        sns_record(Some("Ice"), &body),
    ]));
    let report = handler.handle(&event).await;

    assert_eq!(report.failures(), 1);
    assert!(matches!(
        &report.outcomes[0],
        Err(PipelineError::UnknownEventType(value)) if value == "Bogus"
    ));
    assert!(report.outcomes[1].is_ok());
    assert_eq!(h.store.put_keys(), vec!["v2/ice/20230315.tif"]);

    assert!(matches!(
        report.into_result(),
        Err(PipelineError::RecordsFailed(1, 2))
    ));
}

#[tokio::test]
async fn test_malformed_body() {
    let h = harness(StaticSource::new(), None);
    let handler = Handler::new(h.services.clone(), PipelineConfig::default());

    let event = parse(&single_record_event(Some("Weather"), "not json"));
    let report = handler.handle(&event).await;

    assert!(matches!(
        &report.outcomes[0],
        Err(PipelineError::MalformedEvent(_))
    ));
}

#[tokio::test]
async fn test_weather_body_under_ice_type_is_malformed() {
    let h = harness(weather_source(), None);
    let handler = Handler::new(h.services.clone(), PipelineConfig::default());

    let event = parse(&single_record_event(Some("Ice"), &two_file_response()));
    let report = handler.handle(&event).await;

    assert!(matches!(
        &report.outcomes[0],
        Err(PipelineError::MalformedEvent(_))
    ));
    assert_eq!(h.source.total_fetches(), 0);
}

#[tokio::test]
async fn test_reject_policy_fails_untyped_record() {
    let h = harness(weather_source(), None);
    let config = PipelineConfig {
        missing_type: MissingTypePolicy::Reject,
        ..Default::default()
    };
    let handler = Handler::new(h.services.clone(), config);

    let event = parse(&single_record_event(None, &two_file_response()));
    let report = handler.handle(&event).await;

    assert!(matches!(
        report.into_result(),
        Err(PipelineError::RecordsFailed(1, 1))
    ));
    assert!(h.store.put_keys().is_empty());
}

#[tokio::test]
async fn test_empty_envelope() {
    let h = harness(StaticSource::new(), None);
    let handler = Handler::new(h.services.clone(), PipelineConfig::default());

    let report = handler.handle(&parse(&sns_event(vec![]))).await;
    assert!(report.into_result().unwrap().is_empty());
}
