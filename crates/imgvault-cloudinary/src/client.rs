//! Cloudinary client for listing, looking up and searching image assets.

use imgvault_core::{ListQuery, TagQuery, TagSearchQuery};
use tracing::debug;
use url::Url;

use crate::config::CloudinaryConfig;
use crate::error::{CloudinaryError, CloudinaryResult};
use crate::http::{HttpBackend, ReqwestBackend};
use crate::models::{ApiConfig, CloudinaryResource, ResourcesResponse, SearchRequest, tags_expression};
use crate::url::{build_resource_url, build_resources_url, build_search_url, build_tag_url};

// ============================================================================
// Type Aliases
// ============================================================================

/// Default Cloudinary client using the reqwest HTTP backend.
pub type DefaultCloudinaryClient = CloudinaryClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the Cloudinary Admin and Search APIs.
///
/// Generic over the HTTP backend so tests can run without a network. Use
/// [`DefaultCloudinaryClient`] in production.
pub struct CloudinaryClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) config: ApiConfig,
}

impl DefaultCloudinaryClient {
    /// Create a new client with the given configuration.
    pub fn new(config: &CloudinaryConfig) -> CloudinaryResult<Self> {
        if !config.is_complete() {
            return Err(CloudinaryError::Configuration {
                message: "cloud name, API key and API secret are all required".to_string(),
            });
        }
        let internal_config = Self::to_internal_config(config)?;
        let backend = ReqwestBackend::new(config)?;
        Ok(Self {
            backend,
            config: internal_config,
        })
    }

    fn to_internal_config(config: &CloudinaryConfig) -> CloudinaryResult<ApiConfig> {
        let base = config.base_url.trim_end_matches('/');
        let account_url = Url::parse(&format!("{base}/{}/", config.cloud_name.trim()))?;
        Ok(ApiConfig { account_url })
    }
}

impl<B: HttpBackend> CloudinaryClient<B> {
    /// Create a new client with a custom backend.
    #[cfg(test)]
    pub(crate) const fn with_backend(config: ApiConfig, backend: B) -> Self {
        Self { backend, config }
    }

    /// One page of uploaded images whose public id starts with the folder.
    pub(crate) async fn list_resources(&self, query: &ListQuery) -> CloudinaryResult<ResourcesResponse> {
        let url = build_resources_url(&self.config, query)?;
        debug!(url = %url, "Listing resources");
        self.backend.get_json(&url).await
    }

    /// Details of one uploaded image.
    pub(crate) async fn resource(&self, public_id: &str) -> CloudinaryResult<CloudinaryResource> {
        let url = build_resource_url(&self.config, public_id)?;
        debug!(url = %url, "Fetching resource");
        match self.backend.get_json(&url).await {
            Err(CloudinaryError::ApiRequestFailed { status: 404, .. }) => {
                Err(CloudinaryError::ResourceNotFound {
                    public_id: public_id.to_string(),
                })
            }
            other => other,
        }
    }

    /// One page of images carrying a tag, tags included.
    pub(crate) async fn resources_by_tag(&self, query: &TagQuery) -> CloudinaryResult<ResourcesResponse> {
        let url = build_tag_url(&self.config, query)?;
        debug!(url = %url, "Listing resources by tag");
        self.backend.get_json(&url).await
    }

    /// One page of search results for images in a folder carrying every tag.
    pub(crate) async fn search_tags(&self, query: &TagSearchQuery) -> CloudinaryResult<ResourcesResponse> {
        let url = build_search_url(&self.config)?;
        let request = SearchRequest {
            expression: tags_expression(&query.folder, &query.tags),
            max_results: query.limit,
            with_field: vec!["tags"],
            next_cursor: query.cursor.clone(),
        };
        debug!(expression = %request.expression, "Searching resources");
        self.backend.post_json(&url, &request).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::http::testing::FakeBackend;
    use serde_json::json;

    pub fn test_config() -> ApiConfig {
        ApiConfig {
            account_url: Url::parse("https://api.cloudinary.com/v1_1/demo/").unwrap(),
        }
    }

    pub fn fake_resource_json(public_id: &str) -> serde_json::Value {
        json!({
            "public_id": public_id,
            "secure_url": format!("https://res.cloudinary.com/demo/image/upload/{public_id}.png"),
            "format": "png",
            "width": 100,
            "height": 50,
            "created_at": "2024-02-01T10:00:00Z"
        })
    }

    #[test]
    fn test_default_client_creation() {
        let client = DefaultCloudinaryClient::new(&CloudinaryConfig::new("demo", "key", "secret"))
            .unwrap();
        assert_eq!(
            client.config.account_url.as_str(),
            "https://api.cloudinary.com/v1_1/demo/"
        );
    }

    #[test]
    fn test_client_requires_credentials() {
        let result = DefaultCloudinaryClient::new(&CloudinaryConfig::new("demo", "key", ""));
        assert!(matches!(result, Err(CloudinaryError::Configuration { .. })));
    }

    #[test]
    fn test_client_rejects_bad_base_url() {
        let config = CloudinaryConfig::new("demo", "key", "secret").with_base_url("not a url");
        assert!(matches!(
            DefaultCloudinaryClient::new(&config),
            Err(CloudinaryError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_resource_404_becomes_not_found() {
        let client = CloudinaryClient::with_backend(
            test_config(),
            FakeBackend::new().with_status("gallery/missing", 404),
        );
        let err = client.resource("gallery/missing").await.unwrap_err();
        assert!(matches!(
            err,
            CloudinaryError::ResourceNotFound { ref public_id } if public_id == "gallery/missing"
        ));
    }

    #[tokio::test]
    async fn test_search_posts_expression() {
        let backend = FakeBackend::new().with_response("resources/search", json!({"resources": []}));
        let client = CloudinaryClient::with_backend(test_config(), backend);

        client
            .search_tags(&TagSearchQuery {
                folder: "gallery".to_string(),
                tags: vec!["red".to_string(), "car".to_string()],
                limit: 20,
                cursor: Some("c1".to_string()),
            })
            .await
            .unwrap();

        let requests = client.backend.requests();
        let body = requests[0].body.as_ref().unwrap();
        assert_eq!(
            body["expression"],
            "folder:gallery AND resource_type:image AND tags=red AND tags=car"
        );
        assert_eq!(body["max_results"], 20);
        assert_eq!(body["next_cursor"], "c1");
    }
}
