//! HTTP backend abstraction for the Cloudinary API.
//!
//! The client is generic over [`HttpBackend`] so tests can swap in canned
//! responses. The production backend is a single-attempt reqwest client
//! authenticating with HTTP basic auth.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::CloudinaryConfig;
use crate::error::{CloudinaryError, CloudinaryResult};
use crate::models::ApiErrorBody;

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that exchange JSON with the API.
///
/// This is an implementation detail - external code should use the
/// `MediaStorePort` trait.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// GET a URL and deserialize the JSON body.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> CloudinaryResult<T>;

    /// POST a JSON body and deserialize the JSON response.
    async fn post_json<T, B>(&self, url: &Url, body: &B) -> CloudinaryResult<T>
    where
        T: DeserializeOwned + Send,
        B: Serialize + Sync;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
pub struct ReqwestBackend {
    client: reqwest::Client,
    api_key: String,
    api_secret: String,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &CloudinaryConfig) -> CloudinaryResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        })
    }

    async fn read_json<T: DeserializeOwned>(
        url: &Url,
        response: reqwest::Response,
    ) -> CloudinaryResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        // The body usually says why; fall back to the reason phrase.
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body).map_or_else(
            |_| {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string()
            },
            |b| b.error.message,
        );
        debug!(status = status.as_u16(), url = %url, message = %message, "Cloudinary request failed");

        Err(CloudinaryError::ApiRequestFailed {
            status: status.as_u16(),
            url: url.to_string(),
            message,
        })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> CloudinaryResult<T> {
        let response = self
            .client
            .get(url.as_str())
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .send()
            .await?;
        Self::read_json(url, response).await
    }

    async fn post_json<T, B>(&self, url: &Url, body: &B) -> CloudinaryResult<T>
    where
        T: DeserializeOwned + Send,
        B: Serialize + Sync,
    {
        let response = self
            .client
            .post(url.as_str())
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .json(body)
            .send()
            .await?;
        Self::read_json(url, response).await
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    /// One request seen by the fake backend.
    #[derive(Debug, Clone)]
    pub struct Recorded {
        pub method: &'static str,
        pub url: Url,
        pub body: Option<serde_json::Value>,
    }

    /// A fake HTTP backend that returns canned responses by URL substring.
    ///
    /// Patterns are checked in insertion order; unmatched URLs answer 404.
    #[derive(Default)]
    pub struct FakeBackend {
        responses: Vec<(String, Result<serde_json::Value, u16>)>,
        requests: Mutex<Vec<Recorded>>,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Answer URLs containing `url_contains` with `json`.
        pub fn with_response(mut self, url_contains: &str, json: serde_json::Value) -> Self {
            self.responses.push((url_contains.to_string(), Ok(json)));
            self
        }

        /// Answer URLs containing `url_contains` with an error status.
        pub fn with_status(mut self, url_contains: &str, status: u16) -> Self {
            self.responses.push((url_contains.to_string(), Err(status)));
            self
        }

        pub fn requests(&self) -> Vec<Recorded> {
            self.requests.lock().unwrap().clone()
        }

        fn respond<T: DeserializeOwned>(&self, recorded: Recorded) -> CloudinaryResult<T> {
            let url = recorded.url.to_string();
            self.requests.lock().unwrap().push(recorded);

            let canned = self
                .responses
                .iter()
                .find(|(pattern, _)| url.contains(pattern.as_str()))
                .map_or(Err(404), |(_, response)| response.clone());

            match canned {
                Ok(json) => serde_json::from_value(json).map_err(Into::into),
                Err(status) => Err(CloudinaryError::ApiRequestFailed {
                    status,
                    url,
                    message: format!("canned status {status}"),
                }),
            }
        }
    }

    #[async_trait]
    impl HttpBackend for FakeBackend {
        async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> CloudinaryResult<T> {
            self.respond(Recorded {
                method: "GET",
                url: url.clone(),
                body: None,
            })
        }

        async fn post_json<T, B>(&self, url: &Url, body: &B) -> CloudinaryResult<T>
        where
            T: DeserializeOwned + Send,
            B: Serialize + Sync,
        {
            self.respond(Recorded {
                method: "POST",
                url: url.clone(),
                body: Some(serde_json::to_value(body)?),
            })
        }
    }
}
