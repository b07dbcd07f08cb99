use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderValue, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::credential::BearerCredential;
use super::document::{content_disposition, DocumentTarget, COMPANY_ID_HEADER, JPEG_CONTENT_TYPE};
use crate::error::UploadError;

/// Trait for attaching a JPEG document to a TMS order.
#[async_trait]
pub trait DocumentUploader: Send + Sync {
    /// Upload `data` as a document named `file_name` on order `order_id`.
    ///
    /// Returns the TMS response body on success. The body is forwarded to the
    /// caller unchanged, so implementations should not reinterpret it.
    async fn upload(
        &self,
        order_id: &str,
        data: Bytes,
        file_name: &str,
    ) -> Result<Value, UploadError>;
}

/// McLeod web-service implementation of [`DocumentUploader`].
///
/// Each upload is a single POST with the raw bytes as body; there are no
/// retries. The reqwest client is shared across requests.
#[derive(Clone)]
pub struct McLeodUploader {
    client: Client,
    target: DocumentTarget,
    company_id: String,
    api_key: BearerCredential,
    timeout: Duration,
}

impl McLeodUploader {
    /// Create a new uploader.
    ///
    /// # Arguments
    /// * `target` - Base URL and document classification
    /// * `company_id` - Value of the company identifier header
    /// * `api_key` - Optional bearer key for the TMS
    /// * `timeout` - Upper bound on a single upload
    pub fn new(
        target: DocumentTarget,
        company_id: impl Into<String>,
        api_key: BearerCredential,
        timeout: Duration,
    ) -> Result<Self, UploadError> {
        let client = Client::builder()
            .build()
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            target,
            company_id: company_id.into(),
            api_key,
            timeout,
        })
    }

    pub fn target(&self) -> &DocumentTarget {
        &self.target
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn classify(&self, err: reqwest::Error) -> UploadError {
        if err.is_timeout() {
            UploadError::Timeout {
                timeout: self.timeout,
            }
        } else {
            UploadError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl DocumentUploader for McLeodUploader {
    async fn upload(
        &self,
        order_id: &str,
        data: Bytes,
        file_name: &str,
    ) -> Result<Value, UploadError> {
        let disposition = HeaderValue::from_str(&content_disposition(file_name))
            .map_err(|_| UploadError::InvalidFileName(file_name.to_string()))?;

        let url = self.target.url_for(order_id);
        debug!(
            url = %url,
            size = data.len(),
            authenticated = self.api_key.is_present(),
            "Uploading document to McLeod"
        );

        let request = self
            .client
            .post(&url)
            .header(COMPANY_ID_HEADER, self.company_id.as_str())
            .header(CONTENT_TYPE, JPEG_CONTENT_TYPE)
            .header(CONTENT_DISPOSITION, disposition)
            .timeout(self.timeout)
            .body(data);

        let response = self
            .api_key
            .apply(request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();

        // Redirects reqwest does not follow (300, 304, ...) still count as accepted
        if status.as_u16() >= 400 {
            // Keep the TMS status even if its error body cannot be read
            let body = response.text().await.unwrap_or_default();
            warn!(
                status = status.as_u16(),
                order_id = %order_id,
                "McLeod rejected document upload"
            );
            return Err(UploadError::Downstream {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await.map_err(|e| self.classify(e))?;
        Ok(parse_success_body(&text))
    }
}

/// Interpret a successful TMS response body.
///
/// Empty bodies become `{"status": "success"}`; JSON bodies are returned as
/// parsed; anything else is returned as a JSON string.
pub fn parse_success_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return json!({ "status": "success" });
    }

    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
