//! Per-invocation dispatch of SNS records to the pipelines.

use tracing::{error, info, instrument};

use tiff_common::{EventKind, ForecastResponse, IceDataEvent, SnsEvent, SnsRecord};

use crate::classifier::EventClassifier;
use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::ice::IcePipeline;
use crate::services::Services;
use crate::weather::WeatherPipeline;

/// Successful result of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Weather run; "latest" listing key
    Weather { listing_key: String },
    /// Ice run; raster key
    Ice { key: String },
}

/// Results of every record of an invocation, in record order.
#[derive(Debug, Default)]
pub struct InvocationReport {
    pub outcomes: Vec<PipelineResult<RecordOutcome>>,
}

impl InvocationReport {
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_err()).count()
    }

    /// Fail with [`PipelineError::RecordsFailed`] if any record failed.
    pub fn into_result(self) -> PipelineResult<Vec<RecordOutcome>> {
        let total = self.outcomes.len();
        let failed = self.failures();
        if failed > 0 {
            return Err(PipelineError::RecordsFailed(failed, total));
        }
        self.outcomes.into_iter().collect()
    }
}

/// Entry point invoked once per notification envelope.
pub struct Handler {
    classifier: EventClassifier,
    weather: WeatherPipeline,
    ice: IcePipeline,
}

impl Handler {
    pub fn new(services: Services, config: PipelineConfig) -> Self {
        Self {
            classifier: EventClassifier::new(config.missing_type),
            weather: WeatherPipeline::new(services.clone(), config.clone()),
            ice: IcePipeline::new(services, config),
        }
    }

    /// Process every record in order. A failing record is logged and does
    /// not stop later records.
    #[instrument(skip(self, event), fields(records = event.records.len()))]
    pub async fn handle(&self, event: &SnsEvent) -> InvocationReport {
        let mut report = InvocationReport::default();

        for (index, record) in event.records.iter().enumerate() {
            let outcome = self.handle_record(record).await;
            match &outcome {
                Ok(result) => info!(record = index, outcome = ?result, "Record processed"),
                Err(e) => error!(
                    record = index,
                    message_id = %record.sns.message_id,
                    error = %e,
                    "Record failed"
                ),
            }
            report.outcomes.push(outcome);
        }

        report
    }

    /// Classify, parse and run a single record.
    pub async fn handle_record(&self, record: &SnsRecord) -> PipelineResult<RecordOutcome> {
        let kind = self.classifier.classify(record)?;
        let body = &record.sns.message;

        match kind {
            EventKind::Weather => {
                let response = ForecastResponse::from_json(body)?;
                let summary = self.weather.run(&response).await?;
                info!(
                    rasters = summary.raster_keys.len(),
                    pruned = summary.pruned.len(),
                    "Weather run complete"
                );
                Ok(RecordOutcome::Weather {
                    listing_key: summary.listing_key,
                })
            }
            EventKind::Ice => {
                let event = IceDataEvent::from_json(body)?;
                let key = self.ice.run(&event).await?;
                Ok(RecordOutcome::Ice { key })
            }
        }
    }
}
