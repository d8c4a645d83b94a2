//! A throwaway origin server for archive tests.

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;

pub const PNG_ONE: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR-one";
pub const PNG_TWO: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR-two";
pub const JPEG: &[u8] = b"\xFF\xD8\xFF\xE0\0\x10JFIF\0-photo";
pub const TEXT: &[u8] = b"definitely not an image";

/// Bind an origin on an ephemeral port and return its base URL.
pub async fn spawn() -> String {
    let app = Router::new()
        .route("/one.png", get(|| async { PNG_ONE }))
        .route("/two.png", get(|| async { PNG_TWO }))
        .route("/photo", get(|| async { JPEG }))
        .route("/notes.txt", get(|| async { TEXT }))
        .route("/missing.png", get(|| async { StatusCode::NOT_FOUND }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}
