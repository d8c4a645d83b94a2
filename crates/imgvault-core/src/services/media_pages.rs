//! Cursor-following page producer.

use crate::domain::{ImageAsset, ImagePage, ListQuery};
use crate::ports::{MediaPortResult, MediaStorePort};

/// Upper bound on pages walked by one listing.
const MAX_PAGES: usize = 1_000;

/// Largest up-front allocation made from a store-reported total.
const RESERVE_LIMIT: usize = 10_000;

#[derive(Debug)]
enum Cursor {
    Start,
    Next(String),
    Done,
}

/// Lazily yields folder pages by following the store's opaque cursor.
///
/// Each call to [`next_page`](Self::next_page) performs at most one store
/// request. The walk stops when the store omits a cursor, after the first
/// error, or after `MAX_PAGES` pages.
pub struct MediaPages<'a> {
    store: &'a dyn MediaStorePort,
    folder: String,
    page_size: u32,
    cursor: Cursor,
    pages: usize,
}

impl<'a> MediaPages<'a> {
    pub fn new(store: &'a dyn MediaStorePort, folder: impl Into<String>, page_size: u32) -> Self {
        Self {
            store,
            folder: folder.into(),
            page_size,
            cursor: Cursor::Start,
            pages: 0,
        }
    }

    /// Fetch the next page, or `None` once the listing is exhausted.
    pub async fn next_page(&mut self) -> Option<MediaPortResult<ImagePage>> {
        let cursor = match std::mem::replace(&mut self.cursor, Cursor::Done) {
            Cursor::Done => return None,
            Cursor::Start => None,
            Cursor::Next(token) => Some(token),
        };

        if self.pages >= MAX_PAGES {
            tracing::warn!(
                folder = %self.folder,
                pages = self.pages,
                "Stopping folder walk at page limit"
            );
            return None;
        }

        let query = ListQuery {
            folder: self.folder.clone(),
            limit: self.page_size,
            cursor,
        };

        let page = match self.store.list_images(&query).await {
            Ok(page) => page,
            Err(e) => return Some(Err(e)),
        };
        self.pages += 1;

        if let Some(next) = page.next_cursor.as_ref().filter(|c| !c.is_empty()) {
            self.cursor = Cursor::Next(next.clone());
        }
        Some(Ok(page))
    }

    /// Drain every page into one vector.
    pub async fn collect_all(mut self) -> MediaPortResult<Vec<ImageAsset>> {
        let mut assets = Vec::new();
        while let Some(page) = self.next_page().await {
            let page = page?;
            // The reported total is a hint from the store, so cap it.
            if let Some(total) = page.total {
                let total = usize::try_from(total).unwrap_or(usize::MAX).min(RESERVE_LIMIT);
                assets.reserve(total.saturating_sub(assets.len()));
            }
            assets.extend(page.assets);
        }
        Ok(assets)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeStore;
    use super::*;

    #[tokio::test]
    async fn follows_cursor_until_exhausted() {
        let store = FakeStore::default()
            .with_page("", &["f/a", "f/b"], Some("c1"))
            .with_page("c1", &["f/c"], Some("c2"))
            .with_page("c2", &["f/d"], None);

        let assets = MediaPages::new(&store, "f", 100).collect_all().await.unwrap();
        let ids: Vec<_> = assets.iter().map(|a| a.public_id.as_str()).collect();
        assert_eq!(ids, ["f/a", "f/b", "f/c", "f/d"]);

        let seen = store.seen.lock().unwrap().clone();
        assert_eq!(seen, ["list:f:100:", "list:f:100:c1", "list:f:100:c2"]);
    }

    #[tokio::test]
    async fn yields_pages_lazily() {
        let store = FakeStore::default()
            .with_page("", &["f/a"], Some("c1"))
            .with_page("c1", &["f/b"], None);

        let mut pages = MediaPages::new(&store, "f", 1);
        let first = pages.next_page().await.unwrap().unwrap();
        assert_eq!(first.assets.len(), 1);
        assert_eq!(store.seen.lock().unwrap().len(), 1);

        let second = pages.next_page().await.unwrap().unwrap();
        assert_eq!(second.assets[0].public_id, "f/b");
        assert!(pages.next_page().await.is_none());
        assert!(pages.next_page().await.is_none());
    }

    #[tokio::test]
    async fn empty_cursor_ends_walk() {
        let store = FakeStore::default().with_page("", &["f/a"], Some(""));
        let assets = MediaPages::new(&store, "f", 100).collect_all().await.unwrap();
        assert_eq!(assets.len(), 1);
    }

    #[tokio::test]
    async fn propagates_store_error() {
        let store = FakeStore {
            fail: true,
            ..FakeStore::default()
        };
        let result = MediaPages::new(&store, "f", 100).collect_all().await;
        assert!(result.is_err());
    }
}
