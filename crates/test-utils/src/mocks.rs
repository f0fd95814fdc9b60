//! Recording in-memory implementations of the storage capabilities.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use bytes::Bytes;

use storage::{BlobStore, ByteSource, Notifier, StorageError, StorageResult};
use tiff_common::TransferMessage;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Blob store that keeps objects in a map and records every write.
#[derive(Default)]
pub struct MemoryBlobStore {
    bucket: String,
    objects: Mutex<BTreeMap<String, Bytes>>,
    puts: Mutex<Vec<String>>,
    deletes: Mutex<Vec<String>>,
    fail_puts: Mutex<Option<String>>,
}

impl MemoryBlobStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            ..Default::default()
        }
    }

    /// Seed an object without recording a put.
    pub fn insert(&self, key: impl Into<String>, data: impl Into<Bytes>) {
        lock(&self.objects).insert(key.into(), data.into());
    }

    /// Fail every put whose key contains `pattern`.
    pub fn fail_puts_matching(&self, pattern: impl Into<String>) {
        *lock(&self.fail_puts) = Some(pattern.into());
    }

    /// Keys written, in call order (repeats included).
    pub fn put_keys(&self) -> Vec<String> {
        lock(&self.puts).clone()
    }

    /// Keys deleted, in call order.
    pub fn deleted_keys(&self) -> Vec<String> {
        lock(&self.deletes).clone()
    }

    /// Current keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        lock(&self.objects).keys().cloned().collect()
    }

    pub fn object(&self, key: &str) -> Option<Bytes> {
        lock(&self.objects).get(key).cloned()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn put(&self, key: &str, data: Bytes) -> StorageResult<()> {
        if let Some(pattern) = lock(&self.fail_puts).as_deref() {
            if key.contains(pattern) {
                return Err(StorageError::ObjectStore(format!("injected failure for {}", key)));
            }
        }

        lock(&self.puts).push(key.to_string());
        lock(&self.objects).insert(key.to_string(), data);
        Ok(())
    }

    async fn get(&self, key: &str) -> StorageResult<Bytes> {
        self.object(key)
            .ok_or_else(|| StorageError::ObjectStore(format!("{} not found", key)))
    }

    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>> {
        Ok(lock(&self.objects)
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        lock(&self.deletes).push(key.to_string());
        lock(&self.objects).remove(key);
        Ok(())
    }
}

/// Notifier that records published messages.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<TransferMessage>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose every publish fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn messages(&self) -> Vec<TransferMessage> {
        lock(&self.messages).clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn publish(&self, message: &TransferMessage) -> StorageResult<()> {
        if self.fail {
            return Err(StorageError::Publish("injected failure".to_string()));
        }
        lock(&self.messages).push(message.clone());
        Ok(())
    }
}

/// Byte source serving fixed bodies by URL and counting fetches.
#[derive(Default)]
pub struct StaticSource {
    bodies: HashMap<String, Bytes>,
    fetches: Mutex<HashMap<String, usize>>,
    total: AtomicUsize,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: impl Into<String>, body: impl Into<Bytes>) -> Self {
        self.bodies.insert(url.into(), body.into());
        self
    }

    /// Number of fetches of one URL.
    pub fn fetch_count(&self, url: &str) -> usize {
        lock(&self.fetches).get(url).copied().unwrap_or(0)
    }

    /// Number of fetches across all URLs.
    pub fn total_fetches(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ByteSource for StaticSource {
    async fn fetch(&self, url: &str) -> StorageResult<Bytes> {
        self.total.fetch_add(1, Ordering::SeqCst);
        *lock(&self.fetches).entry(url.to_string()).or_insert(0) += 1;

        self.bodies.get(url).cloned().ok_or_else(|| StorageError::Fetch {
            url: url.to_string(),
            message: "HTTP status client error (404 Not Found)".to_string(),
        })
    }
}
