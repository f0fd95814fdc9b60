//! Upstream archive downloads over HTTP.
//!
//! Whole bodies are buffered in memory; archives are tens of megabytes at
//! most. Failed attempts are retried with exponential backoff when
//! `max_retries > 0`.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::error::{StorageError, StorageResult};

/// Fetches the full body behind a URL.
#[async_trait]
pub trait ByteSource: Send + Sync {
    async fn fetch(&self, url: &str) -> StorageResult<Bytes>;
}

/// Configuration for the HTTP source.
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    /// HTTP request timeout
    pub request_timeout: Duration,
    /// Maximum number of retry attempts (0 disables retrying)
    pub max_retries: u32,
    /// Initial retry delay (doubles each retry)
    pub initial_retry_delay: Duration,
    /// Maximum retry delay
    pub max_retry_delay: Duration,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(300),
            max_retries: 0,
            initial_retry_delay: Duration::from_secs(2),
            max_retry_delay: Duration::from_secs(30),
        }
    }
}

/// [`ByteSource`] backed by a shared reqwest client.
pub struct HttpSource {
    client: Client,
    config: HttpSourceConfig,
}

impl HttpSource {
    pub fn new(config: HttpSourceConfig) -> StorageResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(Duration::from_secs(30))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| {
                StorageError::InvalidConfig(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    async fn fetch_once(&self, url: &str) -> StorageResult<Bytes> {
        let fetch_error = |message: String| StorageError::Fetch {
            url: url.to_string(),
            message,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?
            .error_for_status()
            .map_err(|e| fetch_error(e.to_string()))?;

        response
            .bytes()
            .await
            .map_err(|e| fetch_error(format!("Failed to read body: {}", e)))
    }
}

#[async_trait]
impl ByteSource for HttpSource {
    #[instrument(skip(self), fields(url = %url))]
    async fn fetch(&self, url: &str) -> StorageResult<Bytes> {
        let mut retry_count = 0;
        let mut delay = self.config.initial_retry_delay;

        loop {
            match self.fetch_once(url).await {
                Ok(bytes) => {
                    debug!(size = bytes.len(), "Downloaded");
                    return Ok(bytes);
                }
                Err(e) => {
                    retry_count += 1;
                    if retry_count > self.config.max_retries {
                        return Err(e);
                    }

                    warn!(
                        error = %e,
                        retry = retry_count,
                        max_retries = self.config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "Download failed, retrying"
                    );

                    tokio::time::sleep(delay).await;
                    delay = std::cmp::min(delay * 2, self.config.max_retry_delay);
                }
            }
        }
    }
}
