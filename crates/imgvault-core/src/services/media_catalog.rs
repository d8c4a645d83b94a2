//! Media catalog service - query use cases over the media store port.

use std::sync::Arc;

use serde::Deserialize;

use super::media_pages::MediaPages;
use crate::domain::{ImageAsset, ImagePage, ListQuery, TagQuery, TagSearchQuery};
use crate::ports::{CoreError, MediaStorePort};

/// Default page size for folder listings.
pub const DEFAULT_LIST_LIMIT: u32 = 10;
/// Default page size for tag listings.
pub const DEFAULT_TAG_LIMIT: u32 = 20;
/// Page size used when walking a whole folder.
pub const FULL_LISTING_PAGE_SIZE: u32 = 100;
/// Largest page the store accepts.
pub const MAX_LIMIT: u32 = 500;

/// Pagination parameters as they arrive on the query string.
///
/// `cursor` is the store's opaque continuation token. `page` is accepted for
/// older clients that echoed `nextPage` back as `page`: a non-numeric value is
/// treated as a cursor, a page number is ignored because the store has no
/// page-number addressing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub cursor: Option<String>,
    pub limit: Option<String>,
}

impl PageParams {
    /// Effective continuation cursor.
    pub fn cursor(&self) -> Option<String> {
        if let Some(cursor) = self.cursor.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            return Some(cursor.to_string());
        }
        self.page
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty() && p.parse::<u64>().is_err())
            .map(str::to_string)
    }

    /// Parsed page size, `default` when absent.
    pub fn limit_or(&self, default: u32) -> Result<u32, CoreError> {
        let Some(raw) = self.limit.as_deref().map(str::trim) else {
            return Ok(default);
        };
        match raw.parse::<u32>() {
            Ok(limit) if (1..=MAX_LIMIT).contains(&limit) => Ok(limit),
            _ => Err(CoreError::Validation(format!(
                "limit must be an integer between 1 and {MAX_LIMIT}"
            ))),
        }
    }
}

/// Query facade over the media store.
///
/// Thin: it resolves defaults and pagination, then delegates to the port.
pub struct MediaCatalog {
    store: Arc<dyn MediaStorePort>,
}

impl MediaCatalog {
    pub fn new(store: Arc<dyn MediaStorePort>) -> Self {
        Self { store }
    }

    /// One page of a folder listing.
    pub async fn list(&self, folder: &str, params: &PageParams) -> Result<ImagePage, CoreError> {
        let query = ListQuery {
            folder: folder.to_string(),
            limit: params.limit_or(DEFAULT_LIST_LIMIT)?,
            cursor: params.cursor(),
        };
        Ok(self.store.list_images(&query).await?)
    }

    /// A single asset addressed as `folder/image_id`.
    pub async fn get(&self, folder: &str, image_id: &str) -> Result<ImageAsset, CoreError> {
        let public_id = format!("{folder}/{image_id}");
        Ok(self.store.get_image(&public_id).await?)
    }

    /// Lazy page walk over a whole folder.
    pub fn pages(&self, folder: &str) -> MediaPages<'_> {
        MediaPages::new(self.store.as_ref(), folder, FULL_LISTING_PAGE_SIZE)
    }

    /// Every asset in the folder.
    pub async fn all(&self, folder: &str) -> Result<Vec<ImageAsset>, CoreError> {
        Ok(self.pages(folder).collect_all().await?)
    }

    /// One page of assets carrying `tag`.
    pub async fn by_tag(
        &self,
        folder: &str,
        tag: &str,
        params: &PageParams,
    ) -> Result<ImagePage, CoreError> {
        let query = TagQuery {
            folder: folder.to_string(),
            tag: tag.to_string(),
            limit: params.limit_or(DEFAULT_TAG_LIMIT)?,
            cursor: params.cursor(),
        };
        let mut page = self.store.list_by_tag(&query).await?;
        for asset in &mut page.assets {
            asset.tags.get_or_insert_with(Vec::new);
        }
        Ok(page)
    }

    /// One page of assets carrying every tag in the comma-separated `tags`.
    ///
    /// Returns the parsed tag list alongside the page.
    pub async fn by_tags(
        &self,
        folder: &str,
        tags: Option<&str>,
        params: &PageParams,
    ) -> Result<(Vec<String>, ImagePage), CoreError> {
        let tags = parse_tags(tags.unwrap_or_default());
        if tags.is_empty() {
            return Err(CoreError::Validation("Tags parameter is required".to_string()));
        }

        let query = TagSearchQuery {
            folder: folder.to_string(),
            tags: tags.clone(),
            limit: params.limit_or(DEFAULT_TAG_LIMIT)?,
            cursor: params.cursor(),
        };
        let mut page = self.store.search_by_tags(&query).await?;
        for asset in &mut page.assets {
            asset.tags.get_or_insert_with(Vec::new);
        }
        Ok((tags, page))
    }
}

/// Split a comma-separated tag list, trimming whitespace and dropping blanks.
fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
