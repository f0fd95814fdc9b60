//! Startup configuration, read once per cold start.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use archive_parser::{Hdf5IceDecoder, NpzArchiveDecoder};
use raster::TiffCompression;
use storage::{HttpSource, HttpSourceConfig, ObjectStorage, ObjectStorageConfig, SnsNotifier};
use tiff_pipeline::{MissingTypePolicy, PipelineConfig, Services, DEFAULT_RETENTION};

#[derive(Parser, Debug, Clone)]
#[command(name = "tiff-lambda")]
#[command(about = "Renders weather and sea-ice archives to TIFF on SNS notifications")]
pub struct Args {
    /// Target bucket for rasters and listings
    #[arg(long, env = "AWS__S3BUCKETNAME")]
    pub bucket: String,

    /// SNS topic announcing created files
    #[arg(long, env = "AWS__WEATHERFILECREATEDARN")]
    pub topic_arn: String,

    /// Kind assumed for records without a Type attribute (weather, ice, reject)
    #[arg(long, env = "EVENT_TYPE_WHEN_MISSING", default_value = "weather")]
    pub event_type_when_missing: MissingTypePolicy,

    /// Raster compression (tiff_adobe_deflate or none)
    #[arg(long, env = "TIFF_COMPRESSION", default_value = "tiff_adobe_deflate")]
    pub compression: String,

    /// "Latest" listings kept in the bucket
    #[arg(long, env = "LISTING_RETENTION", default_value_t = DEFAULT_RETENTION)]
    pub retention: usize,

    /// Upstream request timeout in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value = "300")]
    pub http_timeout_secs: u64,

    /// Upstream retry attempts (redelivery is left to SNS when 0)
    #[arg(long, env = "HTTP_MAX_RETRIES", default_value = "0")]
    pub http_max_retries: u32,

    /// Custom S3 endpoint (MinIO/LocalStack)
    #[arg(long, env = "S3_ENDPOINT")]
    pub s3_endpoint: Option<String>,

    /// Allow plain HTTP to the S3 endpoint
    #[arg(long, env = "S3_ALLOW_HTTP")]
    pub s3_allow_http: bool,

    /// Log format (json or text)
    #[arg(long, env = "LOG_FORMAT", default_value = "json")]
    pub log_format: String,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        let compression = TiffCompression::from_name(&self.compression)
            .ok_or_else(|| anyhow!("unsupported TIFF compression '{}'", self.compression))?;

        Ok(PipelineConfig {
            missing_type: self.event_type_when_missing,
            compression,
            retention: self.retention,
        })
    }

    pub fn storage_config(&self) -> ObjectStorageConfig {
        ObjectStorageConfig {
            endpoint: self.s3_endpoint.clone(),
            allow_http: self.s3_allow_http,
            ..ObjectStorageConfig::new(&self.bucket)
        }
    }

    pub fn http_config(&self) -> HttpSourceConfig {
        HttpSourceConfig {
            request_timeout: Duration::from_secs(self.http_timeout_secs),
            max_retries: self.http_max_retries,
            ..Default::default()
        }
    }
}

/// Build the production collaborators.
pub async fn build_services(args: &Args) -> Result<Services> {
    let store = ObjectStorage::new(&args.storage_config()).context("object storage")?;
    let notifier = SnsNotifier::from_env(&args.topic_arn)
        .await
        .context("SNS notifier")?;
    let source = HttpSource::new(args.http_config()).context("HTTP source")?;

    Ok(Services {
        store: Arc::new(store),
        notifier: Arc::new(notifier),
        source: Arc::new(source),
        archives: Arc::new(NpzArchiveDecoder),
        ice: Arc::new(Hdf5IceDecoder::default()),
    })
}
