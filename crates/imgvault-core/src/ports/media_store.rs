//! Media-asset store port.
//!
//! The implementation lives in `imgvault-cloudinary`.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{ImageAsset, ImagePage, ListQuery, TagQuery, TagSearchQuery};

/// Errors from media store operations.
///
/// Implementation-specific errors (HTTP, JSON) are mapped to these.
#[derive(Debug, Error)]
pub enum MediaPortError {
    /// The requested asset does not exist.
    #[error("Resource not found: {public_id}")]
    NotFound { public_id: String },

    /// Credentials were rejected.
    #[error("Media store rejected the credentials")]
    Unauthorized,

    /// API rate limit exceeded.
    #[error("Rate limit exceeded, try again later")]
    RateLimited,

    /// Network failure or unexpected status from the store.
    #[error("Media store request failed: {message}")]
    Upstream { message: String },

    /// The store answered with something we could not decode.
    #[error("Invalid media store response: {message}")]
    InvalidResponse { message: String },

    /// Client misconfiguration (bad base URL, missing credentials).
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Result type alias for media store operations.
pub type MediaPortResult<T> = Result<T, MediaPortError>;

/// Port trait for the media-asset store.
///
/// - Uses core-owned DTOs, not store API types
/// - Cursors are opaque tokens produced by the store
#[async_trait]
pub trait MediaStorePort: Send + Sync {
    /// List image assets whose public id starts with the folder prefix.
    async fn list_images(&self, query: &ListQuery) -> MediaPortResult<ImagePage>;

    /// Fetch a single asset by its full public id (`folder/name`).
    async fn get_image(&self, public_id: &str) -> MediaPortResult<ImageAsset>;

    /// List image assets carrying one tag. Assets include their tags.
    async fn list_by_tag(&self, query: &TagQuery) -> MediaPortResult<ImagePage>;

    /// List image assets in a folder carrying every tag in the query.
    async fn search_by_tags(&self, query: &TagSearchQuery) -> MediaPortResult<ImagePage>;
}
