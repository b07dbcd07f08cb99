use serde_json::Value;
use tracing::{debug, info};

use super::guard::check_content_type;
use crate::error::RelayError;
use crate::store::ObjectStore;
use crate::tms::DocumentUploader;

// =============================================================================
// Upload Request
// =============================================================================

/// A request to relay one stored image to one TMS order.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Key of the image in the object store
    pub object_key: String,

    /// TMS order the image is attached to
    pub order_id: String,
}

impl UploadRequest {
    pub fn new(object_key: impl Into<String>, order_id: impl Into<String>) -> Self {
        Self {
            object_key: object_key.into(),
            order_id: order_id.into(),
        }
    }

    /// Both identifiers must be non-empty.
    pub fn validate(&self) -> Result<(), RelayError> {
        if self.object_key.is_empty() {
            return Err(RelayError::MissingParameter("s3_file_name"));
        }
        if self.order_id.is_empty() {
            return Err(RelayError::MissingParameter("order_id"));
        }
        Ok(())
    }
}

// =============================================================================
// Upload Outcome
// =============================================================================

/// Result of a successful relay.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    /// Key of the image that was relayed
    pub object_key: String,

    /// Order the image was attached to
    pub order_id: String,

    /// Body returned by the TMS
    pub response: Value,
}

// =============================================================================
// Relay Service
// =============================================================================

/// Service relaying images from an object store to a TMS.
///
/// The pipeline is strictly linear:
/// 1. Validates the request identifiers
/// 2. Fetches the object from the store
/// 3. Rejects objects not declared as JPEG
/// 4. Uploads the unmodified bytes to the TMS
///
/// The service holds no per-request state; a single instance serves all
/// concurrent requests.
///
/// # Type Parameters
///
/// * `S` - The object store (e.g., [`crate::store::S3ObjectStore`])
/// * `U` - The document uploader (e.g., [`crate::tms::McLeodUploader`])
pub struct RelayService<S, U> {
    store: S,
    uploader: U,
}

impl<S, U> RelayService<S, U>
where
    S: ObjectStore,
    U: DocumentUploader,
{
    /// Create a new relay service.
    pub fn new(store: S, uploader: U) -> Self {
        Self { store, uploader }
    }

    /// Get a reference to the object store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get a reference to the uploader.
    pub fn uploader(&self) -> &U {
        &self.uploader
    }

    /// Relay one image.
    ///
    /// Each call performs a fresh upload; repeating a request attaches the
    /// document again.
    pub async fn relay(&self, request: &UploadRequest) -> Result<UploadOutcome, RelayError> {
        request.validate()?;

        let object = self.store.fetch(&request.object_key).await?;
        debug!(
            key = %request.object_key,
            content_type = %object.content_type,
            size = object.len(),
            "Object fetched, checking content type"
        );

        check_content_type(&object.content_type)?;

        let response = self
            .uploader
            .upload(&request.order_id, object.data, &request.object_key)
            .await?;

        info!(
            key = %request.object_key,
            order_id = %request.order_id,
            bucket = %self.store.bucket(),
            "Image relayed to McLeod"
        );

        Ok(UploadOutcome {
            object_key: request.object_key.clone(),
            order_id: request.order_id.clone(),
            response,
        })
    }
}
