//! Remote resource fetcher port.

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

use crate::domain::FetchedBody;

/// Why a single resource could not be retrieved.
///
/// Each variant carries the URL so a log line is self-contained.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The origin answered with a non-success status.
    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },

    /// No response within the configured timeout.
    #[error("timed out fetching {url}")]
    Timeout { url: String },

    /// Body exceeded the per-resource size limit.
    #[error("{url} exceeds the {limit} byte limit")]
    TooLarge { url: String, limit: u64 },

    /// DNS, connect, TLS or body-read failure.
    #[error("failed to fetch {url}: {message}")]
    Transport { url: String, message: String },
}

/// Port for retrieving one remote resource and sniffing its type.
///
/// Implementations perform a single attempt, buffer the full body and
/// never retry.
#[async_trait]
pub trait ResourceFetcherPort: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<FetchedBody, FetchError>;
}
