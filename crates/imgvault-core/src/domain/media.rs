//! Media asset types exposed by the query endpoints.

use serde::{Deserialize, Serialize};

/// One image stored in the media-asset store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAsset {
    pub public_id: String,
    /// HTTPS delivery URL.
    pub url: String,
    pub format: String,
    pub width: u32,
    pub height: u32,
    /// Upload timestamp as reported by the store (RFC 3339).
    pub created: String,
    /// Only populated by tag queries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// A page of assets plus the opaque continuation cursor, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImagePage {
    pub assets: Vec<ImageAsset>,
    pub next_cursor: Option<String>,
    /// Total match count when the store reports one.
    pub total: Option<u64>,
}

/// Folder listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub folder: String,
    pub limit: u32,
    pub cursor: Option<String>,
}

/// Single-tag listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagQuery {
    pub folder: String,
    pub tag: String,
    pub limit: u32,
    pub cursor: Option<String>,
}

/// Listing restricted to assets carrying *all* of `tags`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSearchQuery {
    pub folder: String,
    pub tags: Vec<String>,
    pub limit: u32,
    pub cursor: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_serializes_camel_case_and_omits_missing_tags() {
        let asset = ImageAsset {
            public_id: "gallery/cat".into(),
            url: "https://res.example.com/cat.png".into(),
            format: "png".into(),
            width: 640,
            height: 480,
            created: "2024-02-01T10:00:00Z".into(),
            tags: None,
        };

        let json = serde_json::to_value(&asset).unwrap();
        assert_eq!(json["publicId"], "gallery/cat");
        assert_eq!(json["width"], 640);
        assert!(json.get("tags").is_none());
    }

    #[test]
    fn asset_serializes_tags_when_present() {
        let asset = ImageAsset {
            public_id: "gallery/dog".into(),
            url: "https://res.example.com/dog.jpg".into(),
            format: "jpg".into(),
            width: 1,
            height: 1,
            created: "2024-02-01T10:00:00Z".into(),
            tags: Some(vec![]),
        };

        let json = serde_json::to_value(&asset).unwrap();
        assert_eq!(json["tags"], serde_json::json!([]));
    }
}
