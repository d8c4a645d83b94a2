//! Data Transfer Objects (DTOs) for the HTTP API contract.
//!
//! Success bodies always carry `"success": true`; optional fields are omitted
//! rather than sent as `null`.

use imgvault_core::{ImageAsset, ImagePage};
use serde::Serialize;

/// A page (or the whole) of a media listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    pub success: bool,
    pub data: Vec<ImageAsset>,
    /// Continuation cursor; pass it back as `cursor` (or `page`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl PageResponse {
    pub fn page(page: ImagePage) -> Self {
        Self {
            success: true,
            data: page.assets,
            next_page: page.next_cursor,
            total: page.total,
            tag: None,
            tags: None,
        }
    }

    /// A complete listing; `total` is the number of assets returned.
    pub fn all(assets: Vec<ImageAsset>) -> Self {
        Self {
            success: true,
            total: Some(assets.len() as u64),
            data: assets,
            next_page: None,
            tag: None,
            tags: None,
        }
    }

    #[must_use]
    pub fn with_tag(mut self, tag: String) -> Self {
        self.tag = Some(tag);
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }
}

/// A single asset.
#[derive(Debug, Serialize)]
pub struct AssetResponse {
    pub success: bool,
    pub data: ImageAsset,
}

impl AssetResponse {
    pub const fn new(asset: ImageAsset) -> Self {
        Self {
            success: true,
            data: asset,
        }
    }
}
