use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_s3::Client;
use tracing::debug;

use super::{FetchedObject, ObjectStore};
use crate::error::StoreError;

/// S3-backed implementation of [`ObjectStore`].
///
/// Reads objects from a single bucket in S3 or an S3-compatible service
/// (MinIO, etc.). The object key supplied by the caller is used verbatim.
#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Create a new store for the given bucket.
    ///
    /// # Arguments
    /// * `client` - AWS S3 client to use for requests
    /// * `bucket` - S3 bucket name containing the images
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    fn not_found(&self, key: &str) -> StoreError {
        StoreError::NotFound {
            key: key.to_string(),
            bucket: self.bucket.clone(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn fetch(&self, key: &str) -> Result<FetchedObject, StoreError> {
        debug!(bucket = %self.bucket, key = %key, "Fetching object from S3");

        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                // GetObject reports a missing key as a modelled NoSuchKey error
                if let Some(service_err) = e.as_service_error() {
                    if service_err.is_no_such_key()
                        || matches!(service_err.code(), Some("NoSuchKey") | Some("NotFound"))
                    {
                        return self.not_found(key);
                    }
                }

                // Some S3-compatible services answer with a bare 404
                let status_is_404 = e
                    .raw_response()
                    .map(|r| r.status().as_u16() == 404)
                    .unwrap_or(false);

                if status_is_404 {
                    return self.not_found(key);
                }

                StoreError::S3(DisplayErrorContext(&e).to_string())
            })?;

        let content_type = resp.content_type().unwrap_or_default().to_string();

        let data = resp
            .body
            .collect()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?
            .into_bytes();

        debug!(
            key = %key,
            size = data.len(),
            content_type = %content_type,
            "Fetched object"
        );

        Ok(FetchedObject { data, content_type })
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }
}

/// Create an S3 client from static credentials with an optional custom endpoint.
///
/// Use a custom endpoint for S3-compatible services like MinIO:
/// ```ignore
/// let creds = Credentials::new("minioadmin", "minioadmin", None, None, "static");
/// let client = create_s3_client(Some("http://localhost:9000"), "us-east-1", creds, timeout).await;
/// ```
///
/// `timeout` bounds each S3 operation end to end, including the body download.
pub async fn create_s3_client(
    endpoint_url: Option<&str>,
    region: &str,
    credentials: Credentials,
    timeout: Duration,
) -> Client {
    let region = aws_config::Region::new(region.to_string());
    let timeout_config = aws_config::timeout::TimeoutConfig::builder()
        .operation_timeout(timeout)
        .build();

    let mut config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(region)
        .credentials_provider(credentials)
        .timeout_config(timeout_config);

    if let Some(endpoint) = endpoint_url {
        config_loader = config_loader.endpoint_url(endpoint);
    }

    let sdk_config = config_loader.load().await;

    // For S3-compatible services, we often need to use path-style addressing
    let s3_config = if endpoint_url.is_some() {
        aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build()
    } else {
        aws_sdk_s3::config::Builder::from(&sdk_config).build()
    };

    Client::from_conf(s3_config)
}
