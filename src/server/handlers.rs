//! HTTP request handlers for the relay API.
//!
//! This module contains the Axum handlers for the upload-image operation and
//! health checks.
//!
//! # Endpoints
//!
//! - `POST /upload-image?s3_file_name={key}&order_id={id}` - Relay an image
//! - `GET /health` - Health check endpoint

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::error::{RelayError, StoreError, UploadError};
use crate::relay::{RelayService, UploadRequest};
use crate::store::ObjectStore;
use crate::tms::DocumentUploader;

/// Message returned with every successful upload.
pub const UPLOAD_SUCCESS_MESSAGE: &str = "File successfully uploaded to McLeod";

// =============================================================================
// Application State
// =============================================================================

/// Shared application state containing the relay service.
///
/// This is passed to all handlers via Axum's State extractor.
pub struct AppState<S, U> {
    /// The relay service for processing upload requests
    pub relay: Arc<RelayService<S, U>>,
}

impl<S, U> AppState<S, U>
where
    S: ObjectStore,
    U: DocumentUploader,
{
    /// Create a new application state with the given relay service.
    pub fn new(relay: RelayService<S, U>) -> Self {
        Self {
            relay: Arc::new(relay),
        }
    }
}

impl<S, U> Clone for AppState<S, U> {
    fn clone(&self) -> Self {
        Self {
            relay: Arc::clone(&self.relay),
        }
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// Query parameters for upload-image requests.
///
/// Missing parameters deserialize as empty strings and are rejected by
/// request validation with a JSON error.
#[derive(Debug, Deserialize)]
pub struct UploadImageParams {
    /// Key of the JPEG image in the S3 bucket
    #[serde(default)]
    pub s3_file_name: String,

    /// McLeod order id
    #[serde(default)]
    pub order_id: String,
}

impl From<UploadImageParams> for UploadRequest {
    fn from(params: UploadImageParams) -> Self {
        UploadRequest::new(params.s3_file_name, params.order_id)
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type identifier (e.g., "not_found", "invalid_content_type")
    pub error: String,

    /// Human-readable error detail
    pub detail: String,

    /// HTTP status code (included for convenience)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            detail: detail.into(),
            status: None,
        }
    }

    /// Create a new error response with status code.
    pub fn with_status(
        error: impl Into<String>,
        detail: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            error: error.into(),
            detail: detail.into(),
            status: Some(status.as_u16()),
        }
    }
}

/// Success envelope for upload-image.
#[derive(Debug, Serialize)]
pub struct UploadImageResponse {
    /// Always "success"
    pub status: String,

    /// Human-readable summary
    pub message: String,

    /// Echo of the S3 key
    pub s3_file: String,

    /// Echo of the order id
    pub order_id: String,

    /// Body returned by McLeod, or `{"status": "success"}` if it was empty
    pub mcleod_response: Value,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Convert RelayError to HTTP response.
///
/// This implementation logs errors appropriately based on their severity:
/// - 4xx errors are logged at WARN level (client errors), 404 at DEBUG
/// - 5xx errors are logged at ERROR level (server and upstream errors)
impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            // 400 Bad Request
            RelayError::InvalidQuery(_) | RelayError::MissingParameter(_) => {
                (StatusCode::BAD_REQUEST, "invalid_request", self.to_string())
            }

            RelayError::InvalidContentType { .. } => (
                StatusCode::BAD_REQUEST,
                "invalid_content_type",
                self.to_string(),
            ),

            // Object store
            RelayError::Store(store_err) => match store_err {
                StoreError::NotFound { key, .. } => (
                    StatusCode::NOT_FOUND,
                    "not_found",
                    format!("File {} not found in S3 bucket", key),
                ),
                StoreError::S3(msg) | StoreError::Connection(msg) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "storage_error",
                    format!("S3 error: {}", msg),
                ),
            },

            // Downstream TMS
            RelayError::Upload(upload_err) => match upload_err {
                // The TMS status and body are passed through unchanged
                UploadError::Downstream { status, .. } => (
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                    "downstream_error",
                    upload_err.to_string(),
                ),
                UploadError::Timeout { .. } => (
                    StatusCode::GATEWAY_TIMEOUT,
                    "downstream_timeout",
                    upload_err.to_string(),
                ),
                UploadError::Transport(_) => (
                    StatusCode::BAD_GATEWAY,
                    "downstream_unavailable",
                    upload_err.to_string(),
                ),
                UploadError::InvalidFileName(_) => (
                    StatusCode::BAD_REQUEST,
                    "invalid_file_name",
                    upload_err.to_string(),
                ),
            },
        };

        // Log errors based on severity
        if status.is_server_error() {
            error!(
                error_type = error_type,
                status = status.as_u16(),
                "Server error: {}",
                message
            );
        } else if status == StatusCode::NOT_FOUND {
            debug!(
                error_type = error_type,
                status = status.as_u16(),
                "Resource not found: {}",
                message
            );
        } else {
            warn!(
                error_type = error_type,
                status = status.as_u16(),
                "Client error: {}",
                message
            );
        }

        let error_response = ErrorResponse::with_status(error_type, message, status);

        (status, Json(error_response)).into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle upload-image requests.
///
/// # Endpoint
///
/// `POST /upload-image`
///
/// # Query Parameters
///
/// - `s3_file_name`: Key of the JPEG image in the configured bucket
/// - `order_id`: McLeod order the image is attached to
///
/// # Response
///
/// - `200 OK`: JSON success envelope with the McLeod response
/// - `400 Bad Request`: Malformed query, missing parameter, or the object is not a JPEG
/// - `401 Unauthorized`: Missing or wrong bearer token (auth middleware)
/// - `404 Not Found`: Object not in the bucket
/// - `500 Internal Server Error`: S3 failure
/// - McLeod's status: McLeod rejected the upload
/// - `502`/`504`: McLeod unreachable or too slow
pub async fn upload_image_handler<S, U>(
    State(state): State<AppState<S, U>>,
    query: Result<Query<UploadImageParams>, QueryRejection>,
) -> Result<Json<UploadImageResponse>, RelayError>
where
    S: ObjectStore + 'static,
    U: DocumentUploader + 'static,
{
    let Query(params) = query.map_err(|e| RelayError::InvalidQuery(e.body_text()))?;
    let request = UploadRequest::from(params);
    let outcome = state.relay.relay(&request).await?;

    Ok(Json(UploadImageResponse {
        status: "success".to_string(),
        message: UPLOAD_SUCCESS_MESSAGE.to_string(),
        s3_file: outcome.object_key,
        order_id: outcome.order_id,
        mcleod_response: outcome.response,
    }))
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
