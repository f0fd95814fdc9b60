//! Weather pipeline: every parameter of a forecast response to TIFF, plus
//! the listing manifest that indexes them.

use bytes::Bytes;
use tracing::{info, instrument};

use archive_parser::NamedArrays;
use raster::{encode_tiff, roll_and_flipud};
use tiff_common::{
    historic_listing_key, latest_listing_key, weather_key, ForecastResponse, ForecastTiffFiles,
    Listing, Timestamp, TransferKind, TransferMessage, WeatherParameter, LATEST_LISTING_PREFIX,
};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::fetcher::ArchiveFetcher;
use crate::retention::RetentionCleaner;
use crate::services::Services;

/// Outcome of one weather run.
#[derive(Debug, Clone)]
pub struct WeatherRunSummary {
    pub analysis_date: Timestamp,
    /// Raster keys in write order
    pub raster_keys: Vec<String>,
    /// "latest" listing key announced downstream
    pub listing_key: String,
    /// Listings removed by retention
    pub pruned: Vec<String>,
}

pub struct WeatherPipeline {
    services: Services,
    fetcher: ArchiveFetcher,
    cleaner: RetentionCleaner,
    config: PipelineConfig,
}

impl WeatherPipeline {
    pub fn new(services: Services, config: PipelineConfig) -> Self {
        let fetcher = ArchiveFetcher::new(services.source.clone(), services.archives.clone());
        let cleaner = RetentionCleaner::new(services.store.clone(), config.retention);
        Self {
            services,
            fetcher,
            cleaner,
            config,
        }
    }

    /// Render, index and announce a forecast response.
    ///
    /// Any failure aborts the run before the listing is written, so no
    /// partial listing is ever published. All keys are deterministic and
    /// a redelivered run overwrites the same objects.
    #[instrument(skip(self, response), fields(analysis = %response.analysis_date(), files = response.files.len()))]
    pub async fn run(&self, response: &ForecastResponse) -> PipelineResult<WeatherRunSummary> {
        let analysis = response.analysis_date();
        let first = response.files.first().ok_or_else(|| {
            PipelineError::MalformedEvent("forecast response lists no files".to_string())
        })?;

        info!("Creating TIFF files");
        let mut raster_keys = Vec::new();

        // Sea temperature is response-wide: written once, from the first file.
        let mut first_archive = self.fetcher.fetch(&first.url).await?;
        let sea_key = weather_key(
            analysis,
            &first.response_forecast_date,
            WeatherParameter::SeaTemperature,
        );
        self.write_parameter(first_archive.as_mut(), WeatherParameter::SeaTemperature, &sea_key)
            .await?;
        raster_keys.push(sea_key.clone());

        let mut listing = Listing::new(sea_key);
        let mut pending_first = Some(first_archive);

        for file in &response.files {
            let mut archive = match pending_first.take() {
                Some(archive) => archive,
                None => self.fetcher.fetch(&file.url).await?,
            };
            let forecast = &file.response_forecast_date;

            let pressure_key = weather_key(analysis, forecast, WeatherParameter::AirPressure);
            self.write_parameter(archive.as_mut(), WeatherParameter::AirPressure, &pressure_key)
                .await?;
            raster_keys.push(pressure_key.clone());

            let air_temp_key = weather_key(analysis, forecast, WeatherParameter::AirTemperature);
            self.write_parameter(archive.as_mut(), WeatherParameter::AirTemperature, &air_temp_key)
                .await?;
            raster_keys.push(air_temp_key.clone());

            let visibility_key = if archive.contains(WeatherParameter::Visibility.array_name()) {
                let key = weather_key(analysis, forecast, WeatherParameter::Visibility);
                self.write_parameter(archive.as_mut(), WeatherParameter::Visibility, &key)
                    .await?;
                raster_keys.push(key.clone());
                Some(key)
            } else {
                info!(url = %file.url, "No visibility array");
                None
            };

            listing.push(ForecastTiffFiles {
                air_pressure: pressure_key,
                air_temperature: air_temp_key,
                visibility: visibility_key,
                date: *forecast,
            });
        }

        let listing_key = self.write_listing(analysis, &listing).await?;

        let message = TransferMessage::new(
            TransferKind::Tiff,
            self.services.store.bucket(),
            listing_key.clone(),
        );
        self.services.notifier.publish(&message).await?;
        info!(listing = %listing_key, "Published listing");

        let pruned = self.cleaner.clean(LATEST_LISTING_PREFIX).await?;

        Ok(WeatherRunSummary {
            analysis_date: *analysis,
            raster_keys,
            listing_key,
            pruned,
        })
    }

    async fn write_parameter(
        &self,
        archive: &mut dyn NamedArrays,
        parameter: WeatherParameter,
        key: &str,
    ) -> PipelineResult<()> {
        let data = archive.read_f32(parameter.array_name())?;
        let oriented = roll_and_flipud(&data);
        let tiff = encode_tiff(&oriented, self.config.compression)?;

        info!(key = %key, parameter = %parameter, size = tiff.len(), "Writing raster");
        self.services.store.put(key, Bytes::from(tiff)).await?;
        Ok(())
    }

    /// Write the listing to the "latest" and "historic" keys with identical
    /// bytes; returns the "latest" key.
    async fn write_listing(&self, analysis: &Timestamp, listing: &Listing) -> PipelineResult<String> {
        let body = listing
            .to_json_bytes()
            .map_err(|e| PipelineError::Encoding(format!("Failed to serialize listing: {}", e)))?;
        let body = Bytes::from(body);

        let latest = latest_listing_key(analysis);
        let historic = historic_listing_key(analysis);

        self.services.store.put(&latest, body.clone()).await?;
        self.services.store.put(&historic, body).await?;

        info!(latest = %latest, historic = %historic, entries = listing.forecast.len(), "Wrote listing");
        Ok(latest)
    }
}
