//! Archive service: one spawned build per download.

use std::io;
use std::sync::Arc;

use bytes::Bytes;
use imgvault_core::{ArchiveRequest, ResourceFetcherPort};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, info, warn};

use crate::batch::BatchOrchestrator;
use crate::config::ArchiveConfig;
use crate::error::{ArchiveError, ArchiveResult};
use crate::fetcher::HttpFetcher;

/// MIME type of every archive body.
pub const ARCHIVE_CONTENT_TYPE: &str = "application/zip";

/// Chunks in flight between the encoder and the HTTP body.
const BODY_CHANNEL_CAPACITY: usize = 8;

/// Byte stream of one archive. An `Err` item means the archive was aborted.
pub type ArchiveBody = ReceiverStream<io::Result<Bytes>>;

/// A started download: response metadata plus the body stream.
pub struct ArchiveDownload {
    pub file_name: String,
    pub body: ArchiveBody,
}

impl ArchiveDownload {
    /// `Content-Disposition` value for this download.
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename={}", self.file_name)
    }
}

/// Starts archive builds and hands their bodies to the transport.
#[derive(Clone)]
pub struct ArchiveService {
    orchestrator: BatchOrchestrator,
    config: ArchiveConfig,
}

impl ArchiveService {
    pub fn new(fetcher: Arc<dyn ResourceFetcherPort>, config: ArchiveConfig) -> Self {
        Self {
            orchestrator: BatchOrchestrator::new(fetcher, config.clone()),
            config,
        }
    }

    /// Build a service backed by [`HttpFetcher`].
    pub fn from_config(config: ArchiveConfig) -> ArchiveResult<Self> {
        config.validate()?;
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::new(Arc::new(fetcher), config))
    }

    pub fn config(&self) -> &ArchiveConfig {
        &self.config
    }

    /// Start building `request` in the background.
    ///
    /// Errors returned here happen before any byte is produced. Anything that
    /// goes wrong later surfaces as an `Err` item in the body stream. Dropping
    /// the body stops the build at its next send.
    pub fn start(&self, request: ArchiveRequest) -> ArchiveResult<ArchiveDownload> {
        self.config.validate()?;

        let (tx, rx) = mpsc::channel(BODY_CHANNEL_CAPACITY);
        let orchestrator = self.orchestrator.clone();

        tokio::spawn(async move {
            match orchestrator.build(request, tx).await {
                Ok(summary) => info!(
                    requested = summary.requested,
                    appended = summary.appended,
                    failed = summary.failed,
                    "Archive stream complete"
                ),
                Err(ArchiveError::SinkClosed) => {
                    warn!("Client went away before the archive was complete");
                }
                Err(e) => error!(error = %e, "Archive stream aborted"),
            }
        });

        Ok(ArchiveDownload {
            file_name: self.config.file_name().to_string(),
            body: ReceiverStream::new(rx),
        })
    }
}
