//! Download handler - streams a ZIP of remote images.

use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::Response;
use imgvault_archive::ARCHIVE_CONTENT_TYPE;
use imgvault_core::{ArchiveRequest, MISSING_IMAGES_MESSAGE};
use serde_json::Value;
use tracing::info;

use crate::error::{HttpError, ZIP_FAILED_MESSAGE};
use crate::state::AppState;

/// Pull the URL strings out of `{ "images": [...] }`.
///
/// Anything other than a JSON object whose `images` is an array of strings is
/// rejected with the same message.
fn image_urls(body: Result<Json<Value>, JsonRejection>) -> Result<Vec<String>, HttpError> {
    let missing = || HttpError::BadRequest(MISSING_IMAGES_MESSAGE.to_string());

    let Json(value) = body.map_err(|_| missing())?;
    let images = value
        .get("images")
        .and_then(Value::as_array)
        .ok_or_else(missing)?;

    images
        .iter()
        .map(|v| v.as_str().map(str::to_string).ok_or_else(missing))
        .collect()
}

/// `POST /api/download/download-images`
///
/// Validation failures are answered with 400 before any fetch starts. Once
/// headers are out, failures can only abort the body.
pub async fn download_images(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, HttpError> {
    let urls = image_urls(body)?;
    let request = ArchiveRequest::new(&urls).map_err(HttpError::context(ZIP_FAILED_MESSAGE))?;

    info!(count = request.len(), "Streaming image archive");
    let download = state.archive.start(request)?;

    Response::builder()
        .header(CONTENT_TYPE, ARCHIVE_CONTENT_TYPE)
        .header(CONTENT_DISPOSITION, download.content_disposition())
        .body(Body::from_stream(download.body))
        .map_err(|e| HttpError::Internal {
            message: ZIP_FAILED_MESSAGE.to_string(),
            error: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn urls(value: Value) -> Result<Vec<String>, HttpError> {
        image_urls(Ok(Json(value)))
    }

    #[test]
    fn accepts_an_array_of_strings() {
        assert_eq!(
            urls(json!({"images": ["https://a/1.png", "https://a/2.png"]})).unwrap(),
            ["https://a/1.png", "https://a/2.png"]
        );
    }

    #[test]
    fn rejects_missing_or_non_array_images() {
        for body in [
            json!({}),
            json!({"images": "not-an-array"}),
            json!({"images": null}),
            json!(["https://a/1.png"]),
        ] {
            assert!(
                matches!(urls(body.clone()), Err(HttpError::BadRequest(ref m)) if m == MISSING_IMAGES_MESSAGE),
                "{body}"
            );
        }
    }

    #[test]
    fn rejects_non_string_elements() {
        assert!(matches!(
            urls(json!({"images": ["https://a/1.png", 7]})),
            Err(HttpError::BadRequest(_))
        ));
    }

    #[test]
    fn empty_array_passes_extraction() {
        // Emptiness is rejected by ArchiveRequest, with the same message.
        assert!(urls(json!({"images": []})).unwrap().is_empty());
    }
}
