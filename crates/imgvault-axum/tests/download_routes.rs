//! Integration tests for the archive download route.

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;

use common::origin::{self, JPEG, PNG_ONE, PNG_TWO, TEXT};
use common::store::FakeMediaStore;
use common::{app, body_bytes, body_json, post_json, unzip};

const ROUTE: &str = "/api/download/download-images";

fn router() -> axum::Router {
    app(Arc::new(FakeMediaStore::default()))
}

async fn download(urls: &[String]) -> Vec<(String, Vec<u8>)> {
    let body = json!({ "images": urls }).to_string();
    let response = post_json(router(), ROUTE, &body).await;
    assert_eq!(response.status(), StatusCode::OK);
    unzip(body_bytes(response).await)
}

#[tokio::test]
async fn two_pngs_stream_as_named_entries() {
    let base = origin::spawn().await;
    let body = json!({ "images": [format!("{base}/one.png"), format!("{base}/two.png")] });

    let response = post_json(router(), ROUTE, &body.to_string()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "application/zip");
    assert_eq!(
        response.headers()["content-disposition"],
        "attachment; filename=images.zip"
    );

    let files = unzip(body_bytes(response).await);
    assert_eq!(files.len(), 2);
    for (name, _) in &files {
        let (id, ext) = name.split_once('.').unwrap();
        assert_eq!(id.len(), 16);
        assert_eq!(ext, "png");
    }
    assert_eq!(files[0].1, PNG_ONE);
    assert_eq!(files[1].1, PNG_TWO);
}

#[tokio::test]
async fn extension_comes_from_content_not_url() {
    let base = origin::spawn().await;
    let files = download(&[format!("{base}/photo"), format!("{base}/notes.txt")]).await;

    assert_eq!(files.len(), 2);
    assert!(files[0].0.ends_with(".jpg"));
    assert_eq!(files[0].1, JPEG);
    // Unrecognized content falls back to jpg.
    assert!(files[1].0.ends_with(".jpg"));
    assert_eq!(files[1].1, TEXT);
}

#[tokio::test]
async fn failed_url_is_omitted() {
    let base = origin::spawn().await;
    let files = download(&[
        format!("{base}/one.png"),
        format!("{base}/missing.png"),
        format!("{base}/two.png"),
    ])
    .await;

    let contents: Vec<_> = files.into_iter().map(|(_, c)| c).collect();
    assert_eq!(contents, [PNG_ONE.to_vec(), PNG_TWO.to_vec()]);
}

#[tokio::test]
async fn all_failures_yield_an_empty_archive() {
    let base = origin::spawn().await;
    let files = download(&[format!("{base}/missing.png")]).await;
    assert!(files.is_empty());
}

#[tokio::test]
async fn repeated_downloads_use_fresh_names() {
    let base = origin::spawn().await;
    let urls = [format!("{base}/one.png"), format!("{base}/two.png")];

    let first = download(&urls).await;
    let second = download(&urls).await;

    let names: HashSet<_> = first.iter().map(|(n, _)| n.clone()).collect();
    assert!(second.iter().all(|(n, _)| !names.contains(n)));

    let mut a: Vec<_> = first.into_iter().map(|(_, c)| c).collect();
    let mut b: Vec<_> = second.into_iter().map(|(_, c)| c).collect();
    a.sort();
    b.sort();
    assert_eq!(a, b);
}

#[tokio::test]
async fn invalid_bodies_are_rejected_before_streaming() {
    for body in [
        r#"{"images": []}"#,
        r#"{"images": "not-an-array"}"#,
        r#"{"images": [1, 2]}"#,
        r#"{}"#,
        "this is not json",
    ] {
        let response = post_json(router(), ROUTE, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");

        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Please provide an array of image URLs", "{body}");
    }
}

#[tokio::test]
async fn relative_url_is_rejected_with_its_index() {
    let response = post_json(
        router(),
        ROUTE,
        r#"{"images": ["https://example.com/a.png", "/b.png"]}"#,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Invalid image URL at index 1: /b.png");
}
