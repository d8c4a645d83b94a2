//! Port trait implementation for `CloudinaryClient`.
//!
//! Implements the core-owned `MediaStorePort` trait, converting between
//! Cloudinary API types and core DTOs.

use async_trait::async_trait;
use imgvault_core::{
    ImageAsset, ImagePage, ListQuery, MediaPortError, MediaPortResult, MediaStorePort, TagQuery,
    TagSearchQuery,
};

use crate::client::CloudinaryClient;
use crate::error::CloudinaryError;
use crate::http::HttpBackend;
use crate::models::{CloudinaryResource, ResourcesResponse};

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `CloudinaryError` to core `MediaPortError`.
fn map_error(err: CloudinaryError) -> MediaPortError {
    match err {
        CloudinaryError::ApiRequestFailed {
            status, message, ..
        } => match status {
            401 | 403 => MediaPortError::Unauthorized,
            // Cloudinary signals rate limiting with 420.
            420 | 429 => MediaPortError::RateLimited,
            _ => MediaPortError::Upstream { message },
        },
        CloudinaryError::ResourceNotFound { public_id } => MediaPortError::NotFound { public_id },
        CloudinaryError::Configuration { message } => MediaPortError::Configuration { message },
        CloudinaryError::Network(e) => MediaPortError::Upstream {
            message: e.to_string(),
        },
        CloudinaryError::InvalidUrl(e) => MediaPortError::Configuration {
            message: e.to_string(),
        },
        CloudinaryError::JsonParse(e) => MediaPortError::InvalidResponse {
            message: e.to_string(),
        },
    }
}

// ============================================================================
// Type Conversions
// ============================================================================

/// Convert a Cloudinary resource to a core `ImageAsset`.
///
/// With `with_tags`, a missing tag list becomes an empty one.
fn to_asset(resource: CloudinaryResource, with_tags: bool) -> ImageAsset {
    ImageAsset {
        public_id: resource.public_id,
        url: resource.secure_url,
        format: resource.format,
        width: resource.width,
        height: resource.height,
        created: resource.created_at,
        tags: with_tags.then(|| resource.tags.unwrap_or_default()),
    }
}

fn to_page(response: ResourcesResponse, with_tags: bool) -> ImagePage {
    ImagePage {
        assets: response
            .resources
            .into_iter()
            .map(|r| to_asset(r, with_tags))
            .collect(),
        // An empty cursor means the same as none.
        next_cursor: response.next_cursor.filter(|c| !c.is_empty()),
        total: response.total_count,
    }
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl<B: HttpBackend + Send + Sync> MediaStorePort for CloudinaryClient<B> {
    async fn list_images(&self, query: &ListQuery) -> MediaPortResult<ImagePage> {
        let response = self.list_resources(query).await.map_err(map_error)?;
        Ok(to_page(response, false))
    }

    async fn get_image(&self, public_id: &str) -> MediaPortResult<ImageAsset> {
        let resource = self.resource(public_id).await.map_err(map_error)?;
        Ok(to_asset(resource, false))
    }

    async fn list_by_tag(&self, query: &TagQuery) -> MediaPortResult<ImagePage> {
        let response = self.resources_by_tag(query).await.map_err(map_error)?;
        Ok(to_page(response, true))
    }

    async fn search_by_tags(&self, query: &TagSearchQuery) -> MediaPortResult<ImagePage> {
        let response = self.search_tags(query).await.map_err(map_error)?;
        Ok(to_page(response, true))
    }
}
