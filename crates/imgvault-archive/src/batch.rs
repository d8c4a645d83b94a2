//! Batch orchestration: fetch → name → append for one archive request.

use std::sync::Arc;

use futures_util::{StreamExt, stream};
use imgvault_core::{
    ArchiveEntry, ArchiveRequest, FetchOutcome, FetchedResource, ResourceFetcherPort,
};
use tracing::{debug, warn};

use crate::config::ArchiveConfig;
use crate::error::{ArchiveError, ArchiveResult};
use crate::naming::allocate_name;
use crate::stream::{ArchiveSink, ArchiveStream};

/// What happened to one archive request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub requested: usize,
    pub appended: usize,
    pub failed: usize,
}

/// Drives one archive build.
///
/// Fetches are dispatched concurrently up to the configured limit, but their
/// outcomes are consumed in input order by a single loop, which is the only
/// writer to the [`ArchiveStream`].
#[derive(Clone)]
pub struct BatchOrchestrator {
    fetcher: Arc<dyn ResourceFetcherPort>,
    config: ArchiveConfig,
}

impl BatchOrchestrator {
    pub fn new(fetcher: Arc<dyn ResourceFetcherPort>, config: ArchiveConfig) -> Self {
        Self { fetcher, config }
    }

    /// Stream every fetchable URL of `request` into `sink` as one archive.
    ///
    /// Individual fetch failures are logged and skipped. The archive is
    /// finalized even when nothing could be fetched. An error return means the
    /// stream itself broke; the sink has then been aborted or is gone. A gone
    /// receiver is noticed while waiting on fetches, and pending fetches are
    /// dropped with the build.
    pub async fn build(
        &self,
        request: ArchiveRequest,
        sink: ArchiveSink,
    ) -> ArchiveResult<BatchSummary> {
        let mut archive = ArchiveStream::open(sink, self.config.compression_level())?;
        let mut summary = BatchSummary {
            requested: request.len(),
            ..BatchSummary::default()
        };

        // Dropping this stream cancels fetches that have not completed yet.
        let mut outcomes = stream::iter(request.into_urls().into_iter().enumerate())
            .map(|(index, url)| {
                let fetcher = Arc::clone(&self.fetcher);
                async move {
                    match fetcher.fetch(&url).await {
                        Ok(body) => FetchOutcome::Success(FetchedResource::new(body, index)),
                        Err(cause) => FetchOutcome::Failure {
                            source_index: index,
                            cause,
                        },
                    }
                }
            })
            .buffered(self.config.max_concurrent_fetches());

        loop {
            let outcome = tokio::select! {
                biased;
                () = archive.closed() => {
                    debug!(
                        appended = summary.appended,
                        failed = summary.failed,
                        "Client went away, abandoning archive build"
                    );
                    return Err(ArchiveError::SinkClosed);
                }
                outcome = outcomes.next() => outcome,
            };
            let Some(outcome) = outcome else { break };

            match outcome {
                FetchOutcome::Success(resource) => {
                    let name = allocate_name(&resource.extension);
                    debug!(
                        index = resource.source_index,
                        name = %name,
                        bytes = resource.bytes.len(),
                        "Appending archive entry"
                    );
                    if let Err(e) = archive
                        .append(ArchiveEntry::new(name, resource.bytes))
                        .await
                    {
                        archive.abort(&e.to_string()).await;
                        return Err(e);
                    }
                    summary.appended += 1;
                }
                FetchOutcome::Failure {
                    source_index,
                    cause,
                } => {
                    warn!(
                        image = source_index + 1,
                        error = %cause,
                        "Skipping image that could not be fetched"
                    );
                    summary.failed += 1;
                }
            }
        }
        drop(outcomes);

        archive.finalize().await?;
        Ok(summary)
    }
}
