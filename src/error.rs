use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when reading from the object store
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Object does not exist in the bucket
    #[error("Object not found: s3://{bucket}/{key}")]
    NotFound { key: String, bucket: String },

    /// Any other fault reported by S3 or an S3-compatible service
    #[error("S3 error: {0}")]
    S3(String),

    /// The object body could not be read to completion
    #[error("Connection error: {0}")]
    Connection(String),
}

/// Errors that can occur when uploading a document to the TMS
#[derive(Debug, Clone, Error)]
pub enum UploadError {
    /// The TMS answered with a non-success status
    #[error("McLeod API error: {body}")]
    Downstream { status: u16, body: String },

    /// The TMS did not answer within the configured bound
    #[error("McLeod API did not respond within {}s", timeout.as_secs())]
    Timeout { timeout: Duration },

    /// The TMS could not be reached at all
    #[error("McLeod API unreachable: {0}")]
    Transport(String),

    /// The file name cannot be carried in a Content-Disposition header
    #[error("File name cannot be used in an upload header: {0}")]
    InvalidFileName(String),
}

/// Errors surfaced by the upload-image operation.
///
/// Every variant is terminal for the current request and maps to exactly one
/// HTTP response (see `server::handlers`).
#[derive(Debug, Clone, Error)]
pub enum RelayError {
    /// The query string could not be decoded
    #[error("Invalid query string: {0}")]
    InvalidQuery(String),

    /// A required request parameter was absent or empty
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// The stored object is not declared as a JPEG
    #[error("File must be a JPEG image. Got content type: {content_type}")]
    InvalidContentType { content_type: String },

    /// Object store failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Downstream TMS failure
    #[error(transparent)]
    Upload(#[from] UploadError),
}
