//! URL construction helpers for the Cloudinary Admin API.
//!
//! Pure functions so every endpoint is built the same way and can be tested
//! without a network.

use imgvault_core::{ListQuery, TagQuery};
use url::Url;

use crate::error::{CloudinaryError, CloudinaryResult};
use crate::models::ApiConfig;

/// Append path segments to the account URL. Segments are percent-encoded.
fn endpoint<'a>(
    config: &ApiConfig,
    segments: impl IntoIterator<Item = &'a str>,
) -> CloudinaryResult<Url> {
    let mut url = config.account_url.clone();
    url.path_segments_mut()
        .map_err(|()| CloudinaryError::Configuration {
            message: format!("base URL cannot carry a path: {}", config.account_url),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// `GET resources/image/upload?prefix=..&max_results=..[&next_cursor=..]`
pub fn build_resources_url(config: &ApiConfig, query: &ListQuery) -> CloudinaryResult<Url> {
    let mut url = endpoint(config, ["resources", "image", "upload"])?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs
            .append_pair("prefix", &query.folder)
            .append_pair("max_results", &query.limit.to_string());
        if let Some(cursor) = &query.cursor {
            pairs.append_pair("next_cursor", cursor);
        }
    }
    Ok(url)
}

/// `GET resources/image/upload/{public_id}`; slashes in the id stay separators.
pub fn build_resource_url(config: &ApiConfig, public_id: &str) -> CloudinaryResult<Url> {
    endpoint(
        config,
        ["resources", "image", "upload"]
            .into_iter()
            .chain(public_id.split('/')),
    )
}

/// `GET resources/image/tags/{tag}?prefix=..&max_results=..&tags=true[&next_cursor=..]`
pub fn build_tag_url(config: &ApiConfig, query: &TagQuery) -> CloudinaryResult<Url> {
    let mut url = endpoint(config, ["resources", "image", "tags", query.tag.as_str()])?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs
            .append_pair("prefix", &query.folder)
            .append_pair("max_results", &query.limit.to_string())
            .append_pair("tags", "true");
        if let Some(cursor) = &query.cursor {
            pairs.append_pair("next_cursor", cursor);
        }
    }
    Ok(url)
}

/// `POST resources/search`
pub fn build_search_url(config: &ApiConfig) -> CloudinaryResult<Url> {
    endpoint(config, ["resources", "search"])
}
