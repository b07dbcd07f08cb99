//! Authentication integration tests.
//!
//! A rejected caller must never cause a store read or a TMS upload.

use axum::body::Body;
use axum::http::{header::WWW_AUTHENTICATE, Request, StatusCode};

use super::test_utils::{
    jpeg_bytes, send_json, test_router, upload_request, MockObjectStore, RecordingUploader,
    TEST_TOKEN,
};

fn request_with_auth(authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/upload-image?s3_file_name=pod.jpg&order_id=1001");
    if let Some(value) = authorization {
        builder = builder.header("Authorization", value);
    }
    builder.body(Body::empty()).unwrap()
}

fn mocks() -> (MockObjectStore, RecordingUploader) {
    (
        MockObjectStore::new().with_object("pod.jpg", jpeg_bytes(), "image/jpeg"),
        RecordingUploader::new(),
    )
}

#[tokio::test]
async fn test_missing_header_rejected_with_challenge() {
    let (store, uploader) = mocks();
    let router = test_router(store.clone(), uploader.clone());

    let (status, headers, body) = send_json(router, request_with_auth(None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(headers.get(WWW_AUTHENTICATE).unwrap(), "Bearer");
    assert_eq!(body["error"], "unauthorized");
    assert_eq!(store.fetch_count(), 0);
    assert_eq!(uploader.upload_count(), 0);
}

#[tokio::test]
async fn test_wrong_token_rejected() {
    let (store, uploader) = mocks();
    let router = test_router(store.clone(), uploader.clone());

    let (status, headers, _) =
        send_json(router, request_with_auth(Some("Bearer not-the-token"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(headers.contains_key(WWW_AUTHENTICATE));
    assert_eq!(store.fetch_count(), 0);
    assert_eq!(uploader.upload_count(), 0);
}

#[tokio::test]
async fn test_wrong_scheme_rejected() {
    let (store, uploader) = mocks();
    let router = test_router(store.clone(), uploader.clone());

    let basic = format!("Basic {}", TEST_TOKEN);
    let (status, _, _) = send_json(router, request_with_auth(Some(&basic))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(store.fetch_count(), 0);
}

#[tokio::test]
async fn test_bare_token_rejected() {
    let (store, uploader) = mocks();
    let router = test_router(store.clone(), uploader.clone());

    let (status, _, _) = send_json(router, request_with_auth(Some(TEST_TOKEN))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(store.fetch_count(), 0);
}

#[tokio::test]
async fn test_auth_checked_before_parameters() {
    let (store, uploader) = mocks();
    let router = test_router(store.clone(), uploader.clone());

    let request = Request::builder()
        .method("POST")
        .uri("/upload-image")
        .body(Body::empty())
        .unwrap();

    let (status, _, _) = send_json(router, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_token_accepted() {
    let (store, uploader) = mocks();
    let router = test_router(store.clone(), uploader.clone());

    let (status, _, _) = send_json(router, upload_request("pod.jpg", "1001")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(store.fetch_count(), 1);
    assert_eq!(uploader.upload_count(), 1);
}

#[tokio::test]
async fn test_lowercase_scheme_accepted() {
    let (store, uploader) = mocks();
    let router = test_router(store, uploader.clone());

    let value = format!("bearer {}", TEST_TOKEN);
    let (status, _, _) = send_json(router, request_with_auth(Some(&value))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(uploader.upload_count(), 1);
}
