//! # S3 TMS Relay
//!
//! An HTTP relay that fetches JPEG images from S3-compatible object storage
//! and attaches them as documents to McLeod TMS orders.
//!
//! ## Features
//!
//! - **Single operation**: `POST /upload-image` relays one object to one order
//! - **Bearer authentication**: Static API token, compared in constant time
//! - **Content-type guard**: Only objects declared as `image/jpeg` are forwarded
//! - **Verbatim passthrough**: Bytes go out unmodified; TMS errors come back unmodified
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`store`] - Object store trait and S3 implementation
//! - [`tms`] - McLeod document uploader
//! - [`relay`] - Fetch, guard and upload pipeline
//! - [`server`] - Axum-based HTTP server and routes
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use s3_tms_relay::{
//!     create_router, create_s3_client, BearerCredential, DocumentTarget, McLeodUploader,
//!     RelayService, RouterConfig, S3ObjectStore,
//! };
//! use aws_sdk_s3::config::Credentials;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Credentials::new("access", "secret", None, None, "static");
//!     let client =
//!         create_s3_client(None, "us-east-1", credentials, Duration::from_secs(30)).await;
//!     let store = S3ObjectStore::new(client, "driver-uploads");
//!
//!     let uploader = McLeodUploader::new(
//!         DocumentTarget::new("https://tms.example.com/ws"),
//!         "TMS",
//!         BearerCredential::none(),
//!         Duration::from_secs(60),
//!     )?;
//!
//!     let router = create_router(RelayService::new(store, uploader), RouterConfig::new("token"));
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//!     axum::serve(listener, router).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod relay;
pub mod server;
pub mod store;
pub mod tms;

// Re-export commonly used types
pub use config::Config;
pub use error::{RelayError, StoreError, UploadError};
pub use relay::{check_content_type, RelayService, UploadOutcome, UploadRequest};
pub use server::{
    auth_middleware, create_router, health_handler, upload_image_handler, AppState, AuthError,
    BearerAuth, ErrorResponse, HealthResponse, RouterConfig, UploadImageParams,
    UploadImageResponse,
};
pub use store::{create_s3_client, FetchedObject, ObjectStore, S3ObjectStore};
pub use tms::{
    content_disposition, BearerCredential, DocumentTarget, DocumentUploader, McLeodUploader,
};
