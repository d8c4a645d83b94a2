//! Shared helpers for imgvault-axum integration tests.

// Each test binary uses a different subset.
#![allow(dead_code)]

pub mod origin;
pub mod store;

use std::io::{Cursor, Read};
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use imgvault_archive::{ArchiveConfig, ArchiveService};
use imgvault_axum::{AxumContext, CorsConfig, create_router};
use imgvault_core::MediaStorePort;
use tower::ServiceExt;

/// Router over `store` and a real HTTP archive service.
pub fn app(store: Arc<dyn MediaStorePort>) -> Router {
    let archive = ArchiveService::from_config(ArchiveConfig::default()).unwrap();
    create_router(AxumContext::new(store, archive), &CorsConfig::AllowAll)
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Decode an archive into `(name, content)` pairs in container order.
pub fn unzip(bytes: Vec<u8>) -> Vec<(String, Vec<u8>)> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("valid zip");
    (0..archive.len())
        .map(|i| {
            let mut file = archive.by_index(i).unwrap();
            let mut content = Vec::new();
            file.read_to_end(&mut content).unwrap();
            (file.name().to_string(), content)
        })
        .collect()
}
