//! Clients for the external collaborators of the TIFF pipeline.
//!
//! Provides capability traits and their production implementations:
//! - [`BlobStore`]: object storage (S3/MinIO) via `object_store`
//! - [`Notifier`]: downstream SNS topic
//! - [`ByteSource`]: upstream archive downloads over HTTP

pub mod error;
pub mod http;
pub mod notifier;
pub mod object_store;

pub use self::object_store::{BlobStore, ObjectStorage, ObjectStorageConfig};
pub use error::{StorageError, StorageResult};
pub use http::{ByteSource, HttpSource, HttpSourceConfig};
pub use notifier::{Notifier, SnsNotifier};
