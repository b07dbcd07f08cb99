//! Test utilities for integration tests.
//!
//! This module provides mock stores and uploaders that track their calls, and
//! small axum servers standing in for S3 and the McLeod web service.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use bytes::Bytes;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use s3_tms_relay::error::{StoreError, UploadError};
use s3_tms_relay::store::{FetchedObject, ObjectStore};
use s3_tms_relay::tms::DocumentUploader;
use s3_tms_relay::{create_router, RelayService, RouterConfig};

pub const TEST_TOKEN: &str = "test-api-token";
pub const TEST_BUCKET: &str = "driver-uploads";

/// Bytes that look like the start of a JPEG.
pub fn jpeg_bytes() -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0];
    data.extend((0..2048u32).map(|i| (i % 251) as u8));
    data.extend([0xFF, 0xD9]);
    data
}

// =============================================================================
// Mock Object Store
// =============================================================================

/// A mock object store that serves pre-configured objects and counts fetches.
#[derive(Clone)]
pub struct MockObjectStore {
    objects: Arc<HashMap<String, FetchedObject>>,
    fetch_count: Arc<AtomicUsize>,
    fault: Option<StoreError>,
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self {
            objects: Arc::new(HashMap::new()),
            fetch_count: Arc::new(AtomicUsize::new(0)),
            fault: None,
        }
    }

    pub fn with_object(mut self, key: &str, data: Vec<u8>, content_type: &str) -> Self {
        Arc::make_mut(&mut self.objects)
            .insert(key.to_string(), FetchedObject::new(data, content_type));
        self
    }

    /// Fail every fetch with `fault`.
    pub fn failing(mut self, fault: StoreError) -> Self {
        self.fault = Some(fault);
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

impl Default for MockObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn fetch(&self, key: &str) -> Result<FetchedObject, StoreError> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);

        if let Some(fault) = &self.fault {
            return Err(fault.clone());
        }

        self.objects
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                key: key.to_string(),
                bucket: TEST_BUCKET.to_string(),
            })
    }

    fn bucket(&self) -> &str {
        TEST_BUCKET
    }
}

// =============================================================================
// Recording Uploader
// =============================================================================

/// One call made to [`RecordingUploader`].
#[derive(Debug, Clone)]
pub struct RecordedUpload {
    pub order_id: String,
    pub data: Bytes,
    pub file_name: String,
}

/// A mock uploader that records every call and returns a fixed result.
#[derive(Clone)]
pub struct RecordingUploader {
    uploads: Arc<Mutex<Vec<RecordedUpload>>>,
    result: Result<Value, UploadError>,
}

impl RecordingUploader {
    pub fn new() -> Self {
        Self::responding(json!({ "status": "success" }))
    }

    pub fn responding(body: Value) -> Self {
        Self {
            uploads: Arc::new(Mutex::new(Vec::new())),
            result: Ok(body),
        }
    }

    pub fn failing(err: UploadError) -> Self {
        Self {
            uploads: Arc::new(Mutex::new(Vec::new())),
            result: Err(err),
        }
    }

    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

impl Default for RecordingUploader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentUploader for RecordingUploader {
    async fn upload(
        &self,
        order_id: &str,
        data: Bytes,
        file_name: &str,
    ) -> Result<Value, UploadError> {
        self.uploads.lock().unwrap().push(RecordedUpload {
            order_id: order_id.to_string(),
            data,
            file_name: file_name.to_string(),
        });
        self.result.clone()
    }
}

// =============================================================================
// Router Helpers
// =============================================================================

/// Build a router over the given mocks with the test token.
pub fn test_router(store: MockObjectStore, uploader: RecordingUploader) -> Router {
    create_router(
        RelayService::new(store, uploader),
        RouterConfig::new(TEST_TOKEN).with_tracing(false),
    )
}

/// Build an authenticated upload-image request.
pub fn upload_request(key: &str, order_id: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!(
            "/upload-image?s3_file_name={}&order_id={}",
            urlencoding::encode(key),
            urlencoding::encode(order_id)
        ))
        .header("Authorization", format!("Bearer {}", TEST_TOKEN))
        .body(Body::empty())
        .unwrap()
}

/// Send a request and return the status, headers and JSON body.
pub async fn send_json(router: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, headers, json)
}

/// Serve `router` on an ephemeral local port.
pub async fn spawn_server(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

// =============================================================================
// Fake McLeod Server
// =============================================================================

/// A request received by [`FakeMcLeod`].
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub row_type: String,
    pub order_id: String,
    pub document_type: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[derive(Clone)]
struct FakeMcLeodState {
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
    status: StatusCode,
    body: &'static str,
    delay: Duration,
}

/// A local HTTP server mimicking the McLeod document endpoint.
pub struct FakeMcLeod {
    pub base_url: String,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl FakeMcLeod {
    /// Start a server answering every upload with `status` and `body`.
    pub async fn start(status: StatusCode, body: &'static str) -> Self {
        Self::start_with_delay(status, body, Duration::ZERO).await
    }

    /// Start a server that waits `delay` before answering.
    pub async fn start_with_delay(status: StatusCode, body: &'static str, delay: Duration) -> Self {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let state = FakeMcLeodState {
            captured: Arc::clone(&captured),
            status,
            body,
            delay,
        };

        let router = Router::new()
            .route(
                "/ws/images/{row_type}/{order_id}/{document_type}",
                post(fake_mcleod_upload),
            )
            .with_state(state);

        let addr = spawn_server(router).await;

        Self {
            base_url: format!("http://{}/ws", addr),
            captured,
        }
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.captured.lock().unwrap().clone()
    }
}

async fn fake_mcleod_upload(
    State(state): State<FakeMcLeodState>,
    Path((row_type, order_id, document_type)): Path<(String, String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.captured.lock().unwrap().push(CapturedRequest {
        row_type,
        order_id,
        document_type,
        headers,
        body,
    });

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    (state.status, state.body).into_response()
}

// =============================================================================
// Fake S3 Server
// =============================================================================

/// A canned S3 response.
#[derive(Clone)]
pub struct S3Reply {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl S3Reply {
    pub fn object(content_type: &'static str, body: Vec<u8>) -> Self {
        Self {
            status: StatusCode::OK,
            content_type,
            body,
        }
    }

    pub fn error(status: StatusCode, code: &str, message: &str) -> Self {
        let body = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <Error><Code>{}</Code><Message>{}</Message><RequestId>test</RequestId></Error>",
            code, message
        );
        Self {
            status,
            content_type: "application/xml",
            body: body.into_bytes(),
        }
    }
}

#[derive(Clone)]
struct FakeS3State {
    objects: Arc<HashMap<String, S3Reply>>,
    requests: Arc<AtomicUsize>,
}

/// A local path-style S3 endpoint serving canned GetObject replies.
///
/// Keys without a canned reply answer `404 NoSuchKey`.
pub struct FakeS3 {
    pub endpoint: String,
    requests: Arc<AtomicUsize>,
}

impl FakeS3 {
    pub async fn start(objects: Vec<(&str, S3Reply)>) -> Self {
        let requests = Arc::new(AtomicUsize::new(0));
        let state = FakeS3State {
            objects: Arc::new(
                objects
                    .into_iter()
                    .map(|(key, reply)| (format!("{}/{}", TEST_BUCKET, key), reply))
                    .collect(),
            ),
            requests: Arc::clone(&requests),
        };

        let router = Router::new()
            .route("/{bucket}/{*key}", get(fake_s3_get))
            .with_state(state);

        let addr = spawn_server(router).await;

        Self {
            endpoint: format!("http://{}", addr),
            requests,
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

async fn fake_s3_get(
    State(state): State<FakeS3State>,
    Path((bucket, key)): Path<(String, String)>,
) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);

    let reply = state
        .objects
        .get(&format!("{}/{}", bucket, key))
        .cloned()
        .unwrap_or_else(|| {
            S3Reply::error(
                StatusCode::NOT_FOUND,
                "NoSuchKey",
                "The specified key does not exist.",
            )
        });

    Response::builder()
        .status(reply.status)
        .header("content-type", reply.content_type)
        .body(Body::from(reply.body))
        .unwrap()
}
