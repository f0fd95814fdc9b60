//! Downstream notifications on an SNS topic.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use tracing::{debug, instrument};

use tiff_common::TransferMessage;

use crate::error::{StorageError, StorageResult};

/// Publishes "file created" messages to downstream consumers.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn publish(&self, message: &TransferMessage) -> StorageResult<()>;
}

/// Notifier backed by an SNS topic.
pub struct SnsNotifier {
    client: aws_sdk_sns::Client,
    topic_arn: String,
}

impl SnsNotifier {
    pub fn new(client: aws_sdk_sns::Client, topic_arn: impl Into<String>) -> Self {
        Self {
            client,
            topic_arn: topic_arn.into(),
        }
    }

    /// Build a client from the standard AWS environment (region, credentials).
    pub async fn from_env(topic_arn: impl Into<String>) -> StorageResult<Self> {
        let topic_arn = topic_arn.into();
        if topic_arn.is_empty() {
            return Err(StorageError::InvalidConfig(
                "notification topic ARN is empty".to_string(),
            ));
        }

        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Ok(Self::new(aws_sdk_sns::Client::new(&config), topic_arn))
    }

    pub fn topic_arn(&self) -> &str {
        &self.topic_arn
    }
}

#[async_trait]
impl Notifier for SnsNotifier {
    #[instrument(skip(self, message), fields(topic = %self.topic_arn, blob_file = %message.blob_file))]
    async fn publish(&self, message: &TransferMessage) -> StorageResult<()> {
        let body = serde_json::to_string(message)
            .map_err(|e| StorageError::Publish(format!("Failed to serialize message: {}", e)))?;

        let output = self
            .client
            .publish()
            .topic_arn(&self.topic_arn)
            .message(body)
            .send()
            .await
            .map_err(|e| StorageError::Publish(format!("SNS publish failed: {}", e)))?;

        debug!(message_id = ?output.message_id(), "Published notification");
        Ok(())
    }
}
