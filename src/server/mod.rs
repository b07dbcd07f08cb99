//! HTTP server layer for the relay.
//!
//! This module provides the HTTP API in front of the relay service.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │     POST /upload-image?s3_file_name={key}&order_id={id}         │
//! │                                                                 │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────────┐  │
//! │  │  handlers   │  │    auth     │  │        routes           │  │
//! │  │ (requests)  │  │  (bearer)   │  │  (router config)        │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod handlers;
pub mod routes;

pub use auth::{auth_middleware, AuthError, BearerAuth};
pub use handlers::{
    health_handler, upload_image_handler, AppState, ErrorResponse, HealthResponse,
    UploadImageParams, UploadImageResponse, UPLOAD_SUCCESS_MESSAGE,
};
pub use routes::{create_router, RouterConfig};
