//! Object storage interface for generated rasters and listings (S3/MinIO).

use async_trait::async_trait;
use bytes::Bytes;
use object_store::{aws::AmazonS3Builder, memory::InMemory, path::Path, ObjectStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::error::{StorageError, StorageResult};

/// Blob store capability used by the pipelines.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Bucket the keys live in (reported downstream).
    fn bucket(&self) -> &str;

    /// Write bytes to a key, replacing any existing object.
    async fn put(&self, key: &str, data: Bytes) -> StorageResult<()>;

    /// Read an object.
    async fn get(&self, key: &str) -> StorageResult<Bytes>;

    /// Keys starting with `prefix` (plain string prefix), in lexicographic order.
    ///
    /// Only the prefix's own directory is listed, so `v2/list-` never
    /// returns keys under `v2/listings/`.
    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>>;

    /// Delete an object.
    async fn delete(&self, key: &str) -> StorageResult<()>;
}

/// Configuration for object storage connection.
///
/// Credentials and region come from the standard `AWS_*` environment
/// variables (the Lambda execution role on AWS).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectStorageConfig {
    /// Bucket name
    pub bucket: String,
    /// Custom S3 endpoint (MinIO/LocalStack); AWS when unset
    pub endpoint: Option<String>,
    /// Region override
    pub region: Option<String>,
    /// Allow HTTP (for local MinIO)
    pub allow_http: bool,
}

impl ObjectStorageConfig {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            endpoint: None,
            region: None,
            allow_http: false,
        }
    }
}

/// Object storage client.
pub struct ObjectStorage {
    store: Arc<dyn ObjectStore>,
    bucket: String,
}

impl ObjectStorage {
    /// Create a new S3 client from config.
    pub fn new(config: &ObjectStorageConfig) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env().with_bucket_name(&config.bucket);

        if let Some(endpoint) = &config.endpoint {
            builder = builder.with_endpoint(endpoint);
        }
        if let Some(region) = &config.region {
            builder = builder.with_region(region);
        }
        if config.allow_http {
            builder = builder.with_allow_http(true);
        }

        let store = builder.build().map_err(|e| {
            StorageError::ObjectStore(format!("Failed to create S3 client: {}", e))
        })?;

        Ok(Self::with_store(Arc::new(store), &config.bucket))
    }

    /// Wrap an existing store.
    pub fn with_store(store: Arc<dyn ObjectStore>, bucket: impl Into<String>) -> Self {
        Self {
            store,
            bucket: bucket.into(),
        }
    }

    /// Process-local store, for tests and dry runs.
    pub fn in_memory(bucket: impl Into<String>) -> Self {
        Self::with_store(Arc::new(InMemory::new()), bucket)
    }
}

#[async_trait]
impl BlobStore for ObjectStorage {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    #[instrument(skip(self, data), fields(bucket = %self.bucket, key = %key))]
    async fn put(&self, key: &str, data: Bytes) -> StorageResult<()> {
        let location = Path::from(key);
        debug!(size = data.len(), "Writing object");

        self.store
            .put(&location, data.into())
            .await
            .map_err(|e| StorageError::ObjectStore(format!("Failed to write {}: {}", key, e)))?;

        Ok(())
    }

    #[instrument(skip(self), fields(bucket = %self.bucket, key = %key))]
    async fn get(&self, key: &str) -> StorageResult<Bytes> {
        let location = Path::from(key);

        let result = self
            .store
            .get(&location)
            .await
            .map_err(|e| StorageError::ObjectStore(format!("Failed to read {}: {}", key, e)))?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| StorageError::ObjectStore(format!("Failed to read bytes: {}", e)))?;

        debug!(size = bytes.len(), "Read object");
        Ok(bytes)
    }

    #[instrument(skip(self), fields(bucket = %self.bucket, prefix = %prefix))]
    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>> {
        // object_store prefixes are whole path segments; split off the
        // partial file-name part and filter on it.
        let (directory, name_prefix) = match prefix.rsplit_once('/') {
            Some((directory, name_prefix)) => (Some(Path::from(directory)), name_prefix),
            None => (None, prefix),
        };

        let listing = self
            .store
            .list_with_delimiter(directory.as_ref())
            .await
            .map_err(|e| StorageError::ObjectStore(format!("List failed: {}", e)))?;

        let mut keys: Vec<String> = listing
            .objects
            .into_iter()
            .filter(|meta| {
                meta.location
                    .filename()
                    .is_some_and(|name| name.starts_with(name_prefix))
            })
            .map(|meta| meta.location.to_string())
            .collect();
        keys.sort();

        debug!(count = keys.len(), "Listed objects");
        Ok(keys)
    }

    #[instrument(skip(self), fields(bucket = %self.bucket, key = %key))]
    async fn delete(&self, key: &str) -> StorageResult<()> {
        let location = Path::from(key);

        self.store
            .delete(&location)
            .await
            .map_err(|e| StorageError::ObjectStore(format!("Failed to delete {}: {}", key, e)))?;

        Ok(())
    }
}
