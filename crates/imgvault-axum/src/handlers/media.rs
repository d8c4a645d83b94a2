//! Media handlers - folder listings, single assets and tag queries.

use axum::Json;
use axum::extract::{Path, Query, State};
use imgvault_core::PageParams;
use serde::Deserialize;

use crate::dto::{AssetResponse, PageResponse};
use crate::error::HttpError;
use crate::state::AppState;

const LIST_FAILED: &str = "Error fetching images";
const GET_FAILED: &str = "Error fetching image from Cloudinary";
const ALL_FAILED: &str = "Error fetching images from Cloudinary";

/// Query string of the multi-tag route.
#[derive(Debug, Deserialize)]
pub struct TagsParams {
    pub tags: Option<String>,
    #[serde(flatten)]
    pub page: PageParams,
}

/// One page of a folder listing.
pub async fn list(
    State(state): State<AppState>,
    Path(folder): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<PageResponse>, HttpError> {
    let page = state
        .media
        .list(&folder, &params)
        .await
        .map_err(HttpError::context(LIST_FAILED))?;
    Ok(Json(PageResponse::page(page)))
}

/// One asset, addressed as `folder/image_id`.
pub async fn get(
    State(state): State<AppState>,
    Path((folder, image_id)): Path<(String, String)>,
) -> Result<Json<AssetResponse>, HttpError> {
    let asset = state
        .media
        .get(&folder, &image_id)
        .await
        .map_err(HttpError::context(GET_FAILED))?;
    Ok(Json(AssetResponse::new(asset)))
}

/// Every asset in a folder, following cursors until the store runs out.
pub async fn all(
    State(state): State<AppState>,
    Path(folder): Path<String>,
) -> Result<Json<PageResponse>, HttpError> {
    let assets = state
        .media
        .all(&folder)
        .await
        .map_err(HttpError::context(ALL_FAILED))?;
    Ok(Json(PageResponse::all(assets)))
}

/// One page of assets carrying a tag.
pub async fn by_tag(
    State(state): State<AppState>,
    Path((folder, tag)): Path<(String, String)>,
    Query(params): Query<PageParams>,
) -> Result<Json<PageResponse>, HttpError> {
    let page = state
        .media
        .by_tag(&folder, &tag, &params)
        .await
        .map_err(HttpError::context(LIST_FAILED))?;
    Ok(Json(PageResponse::page(page).with_tag(tag)))
}

/// One page of assets carrying every tag in `?tags=a,b`.
pub async fn by_tags(
    State(state): State<AppState>,
    Path(folder): Path<String>,
    Query(params): Query<TagsParams>,
) -> Result<Json<PageResponse>, HttpError> {
    let (tags, page) = state
        .media
        .by_tags(&folder, params.tags.as_deref(), &params.page)
        .await
        .map_err(HttpError::context(LIST_FAILED))?;
    Ok(Json(PageResponse::page(page).with_tags(tags)))
}
