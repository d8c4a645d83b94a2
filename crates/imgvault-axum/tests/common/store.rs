//! In-memory media store for route tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use imgvault_core::{
    ImageAsset, ImagePage, ListQuery, MediaPortError, MediaPortResult, MediaStorePort, TagQuery,
    TagSearchQuery,
};

pub fn asset(public_id: &str) -> ImageAsset {
    ImageAsset {
        public_id: public_id.to_string(),
        url: format!("https://res.example.com/{public_id}.png"),
        format: "png".to_string(),
        width: 64,
        height: 32,
        created: "2024-02-01T10:00:00Z".to_string(),
        tags: None,
    }
}

/// Pages keyed by cursor (`""` is the first page). Every call is recorded.
#[derive(Default)]
pub struct FakeMediaStore {
    pages: HashMap<String, ImagePage>,
    pub fail: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeMediaStore {
    pub fn with_page(mut self, cursor: &str, ids: &[&str], next: Option<&str>) -> Self {
        self.pages.insert(
            cursor.to_string(),
            ImagePage {
                assets: ids.iter().map(|id| asset(id)).collect(),
                next_cursor: next.map(str::to_string),
                total: Some(ids.len() as u64),
            },
        );
        self
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn page(&self, call: String, cursor: Option<&str>) -> MediaPortResult<ImagePage> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            return Err(MediaPortError::Upstream {
                message: "store unavailable".to_string(),
            });
        }
        Ok(self
            .pages
            .get(cursor.unwrap_or_default())
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl MediaStorePort for FakeMediaStore {
    async fn list_images(&self, query: &ListQuery) -> MediaPortResult<ImagePage> {
        self.page(
            format!(
                "list:{}:{}:{}",
                query.folder,
                query.limit,
                query.cursor.as_deref().unwrap_or("-")
            ),
            query.cursor.as_deref(),
        )
    }

    async fn get_image(&self, public_id: &str) -> MediaPortResult<ImageAsset> {
        self.calls.lock().unwrap().push(format!("get:{public_id}"));
        if self.fail || public_id.ends_with("missing") {
            return Err(MediaPortError::NotFound {
                public_id: public_id.to_string(),
            });
        }
        Ok(asset(public_id))
    }

    async fn list_by_tag(&self, query: &TagQuery) -> MediaPortResult<ImagePage> {
        self.page(
            format!("tag:{}:{}:{}", query.folder, query.tag, query.limit),
            query.cursor.as_deref(),
        )
    }

    async fn search_by_tags(&self, query: &TagSearchQuery) -> MediaPortResult<ImagePage> {
        self.page(
            format!("tags:{}:{}:{}", query.folder, query.tags.join("+"), query.limit),
            query.cursor.as_deref(),
        )
    }
}
