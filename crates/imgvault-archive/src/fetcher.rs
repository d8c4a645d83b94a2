//! HTTP resource fetcher.

use std::error::Error as _;

use async_trait::async_trait;
use bytes::BytesMut;
use imgvault_core::{FetchError, FetchedBody, ResourceFetcherPort};
use url::Url;

use crate::config::ArchiveConfig;
use crate::error::ArchiveResult;
use crate::sniff::extension_or_fallback;

/// Fetches a whole resource into memory with a single GET.
///
/// The `reqwest::Client` (and its connection pool) is shared by every
/// archive built through the same fetcher.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    max_bytes: u64,
}

impl HttpFetcher {
    /// Build a fetcher whose client enforces the configured timeout.
    pub fn new(config: &ArchiveConfig) -> ArchiveResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.fetch_timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self::with_client(client, config.max_resource_bytes))
    }

    /// Use an existing client, e.g. one shared with other adapters.
    pub fn with_client(client: reqwest::Client, max_bytes: u64) -> Self {
        Self { client, max_bytes }
    }

    async fn read_body(&self, url: &Url, mut response: reqwest::Response) -> Result<BytesMut, FetchError> {
        if let Some(len) = response.content_length() {
            if len > self.max_bytes {
                return Err(self.too_large(url));
            }
        }

        let mut body = BytesMut::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| transport_error(url, &e))? {
            if (body.len() + chunk.len()) as u64 > self.max_bytes {
                return Err(self.too_large(url));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }

    fn too_large(&self, url: &Url) -> FetchError {
        FetchError::TooLarge {
            url: url.to_string(),
            limit: self.max_bytes,
        }
    }
}

#[async_trait]
impl ResourceFetcherPort for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedBody, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| transport_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = self.read_body(url, response).await?.freeze();
        let extension = extension_or_fallback(&bytes).to_string();
        Ok(FetchedBody { bytes, extension })
    }
}

/// Map a reqwest failure, keeping the whole source chain in the message.
fn transport_error(url: &Url, err: &reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::Timeout {
            url: url.to_string(),
        };
    }

    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    FetchError::Transport {
        url: url.to_string(),
        message,
    }
}
