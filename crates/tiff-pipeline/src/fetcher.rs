//! Download-and-open of forecast archives.

use std::sync::Arc;

use archive_parser::{ArchiveDecoder, NamedArrays};
use storage::ByteSource;
use tracing::{debug, instrument};

use crate::error::PipelineResult;

/// Fetches a forecast archive over HTTP and exposes its named arrays.
///
/// The returned archive owns the downloaded bytes; they are released when
/// it is dropped, on success or failure alike.
#[derive(Clone)]
pub struct ArchiveFetcher {
    source: Arc<dyn ByteSource>,
    decoder: Arc<dyn ArchiveDecoder>,
}

impl ArchiveFetcher {
    pub fn new(source: Arc<dyn ByteSource>, decoder: Arc<dyn ArchiveDecoder>) -> Self {
        Self { source, decoder }
    }

    #[instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> PipelineResult<Box<dyn NamedArrays>> {
        let data = self.source.fetch(url).await?;
        let archive = self.decoder.open(data)?;
        debug!(arrays = ?archive.names(), "Archive ready");
        Ok(archive)
    }
}
