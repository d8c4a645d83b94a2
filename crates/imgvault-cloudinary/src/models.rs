//! Internal API types for the Cloudinary Admin and Search APIs.
//!
//! External consumers should use the port DTOs defined in `imgvault-core`.

use serde::{Deserialize, Serialize};
use url::Url;

/// Internal configuration derived from `CloudinaryConfig`.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// `{base_url}/{cloud_name}/`, always ending in a slash.
    pub account_url: Url,
}

/// One resource as returned by the listing, lookup and search endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct CloudinaryResource {
    pub public_id: String,
    #[serde(default)]
    pub secure_url: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub created_at: String,
    /// Only present when requested (`tags=true`) or on search results.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Page of resources. `total_count` is only reported by some endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourcesResponse {
    #[serde(default)]
    pub resources: Vec<CloudinaryResource>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

/// Body of `POST /resources/search`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub expression: String,
    pub max_results: u32,
    pub with_field: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// `{"error": {"message": "..."}}`, the shape of every API error body.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
}

/// Search expression matching images in `folder` that carry every tag.
pub fn tags_expression(folder: &str, tags: &[String]) -> String {
    let mut expression = format!("folder:{folder} AND resource_type:image");
    for tag in tags {
        expression.push_str(" AND tags=");
        expression.push_str(tag);
    }
    expression
}
