//! Downstream McLeod TMS document upload.
//!
//! Documents are attached to an order by POSTing the raw image bytes to
//!
//! ```text
//! {base_url}/images/{row_type}/{order_id}/{document_type}
//! ```
//!
//! with the company identifier and a `Content-Disposition` describing the
//! file. [`DocumentUploader`] abstracts the call so the relay pipeline can be
//! tested without a TMS.

mod credential;
mod document;
mod uploader;

pub use credential::BearerCredential;
pub use document::{
    content_disposition, DocumentTarget, COMPANY_ID_HEADER, DEFAULT_DOCUMENT_TYPE,
    DEFAULT_ROW_TYPE, JPEG_CONTENT_TYPE,
};
pub use uploader::{parse_success_body, DocumentUploader, McLeodUploader};
