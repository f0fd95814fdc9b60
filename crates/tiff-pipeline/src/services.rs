//! Bundle of external collaborators, built once per process.

use std::sync::Arc;

use archive_parser::{ArchiveDecoder, IceDecoder};
use storage::{BlobStore, ByteSource, Notifier};

/// Capability handles shared by the pipelines.
#[derive(Clone)]
pub struct Services {
    pub store: Arc<dyn BlobStore>,
    pub notifier: Arc<dyn Notifier>,
    pub source: Arc<dyn ByteSource>,
    pub archives: Arc<dyn ArchiveDecoder>,
    pub ice: Arc<dyn IceDecoder>,
}
