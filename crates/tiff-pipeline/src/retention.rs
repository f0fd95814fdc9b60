//! Pruning of "latest" listing manifests.

use std::sync::Arc;

use storage::BlobStore;
use tracing::{info, instrument};

use crate::error::PipelineResult;

/// Number of "latest" listings kept.
pub const DEFAULT_RETENTION: usize = 8;

/// Deletes the oldest objects under a prefix beyond a retention count.
///
/// Keys embed zero-padded timestamps, so lexicographic order is
/// chronological. Deletes are safe to repeat.
pub struct RetentionCleaner {
    store: Arc<dyn BlobStore>,
    retention: usize,
}

impl RetentionCleaner {
    pub fn new(store: Arc<dyn BlobStore>, retention: usize) -> Self {
        Self { store, retention }
    }

    pub fn retention(&self) -> usize {
        self.retention
    }

    /// Prune `prefix`, returning the deleted keys oldest first.
    #[instrument(skip(self), fields(retention = self.retention))]
    pub async fn clean(&self, prefix: &str) -> PipelineResult<Vec<String>> {
        let mut keys = self.store.list(prefix).await?;
        keys.sort();

        let excess = keys.len().saturating_sub(self.retention);
        let mut deleted = Vec::with_capacity(excess);

        for key in keys.into_iter().take(excess) {
            info!(key = %key, "Removing listing");
            self.store.delete(&key).await?;
            deleted.push(key);
        }

        Ok(deleted)
    }
}
