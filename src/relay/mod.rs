//! Relay pipeline.
//!
//! The relay service is the core of the upload-image operation. It sits
//! between the HTTP layer and the two external systems:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              HTTP Handlers              │
//! │        (bearer auth already done)       │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │              RelayService               │
//! │  validate → fetch → guard → upload      │
//! └──────────┬──────────────────┬───────────┘
//!            │                  │
//!            ▼                  ▼
//! ┌──────────────────┐ ┌──────────────────────┐
//! │   ObjectStore    │ │   DocumentUploader   │
//! │   (S3 read)      │ │   (McLeod POST)      │
//! └──────────────────┘ └──────────────────────┘
//! ```
//!
//! Any failing step ends the request; nothing is retried or cleaned up.

mod guard;
mod service;

pub use guard::{check_content_type, JPEG_CONTENT_TYPE_PREFIX};
pub use service::{RelayService, UploadOutcome, UploadRequest};
