//! Router configuration for the relay.
//!
//! This module defines the HTTP routes and applies middleware for
//! authentication, CORS and request tracing.
//!
//! # Route Structure
//!
//! ```text
//! /health              - Health check (public)
//! /upload-image        - Relay an image to McLeod (bearer token)
//! /upload-image/       - Same, trailing-slash form
//! ```
//!
//! # Example
//!
//! ```ignore
//! use s3_tms_relay::server::routes::{create_router, RouterConfig};
//! use s3_tms_relay::relay::RelayService;
//!
//! let relay = RelayService::new(store, uploader);
//! let config = RouterConfig::new("api-token")
//!     .with_cors_origins(vec!["https://example.com".to_string()]);
//!
//! let router = create_router(relay, config);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::auth::{auth_middleware, BearerAuth};
use super::handlers::{health_handler, upload_image_handler, AppState};
use crate::relay::RelayService;
use crate::store::ObjectStore;
use crate::tms::DocumentUploader;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Clone)]
pub struct RouterConfig {
    /// Token callers must present as `Authorization: Bearer <token>`
    pub api_token: String,

    /// Allowed CORS origins (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Create a new router configuration with the given API token.
    ///
    /// By default CORS allows any origin and tracing is enabled.
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            cors_origins: None,
            enable_tracing: true,
        }
    }

    /// Set specific allowed CORS origins.
    ///
    /// Pass an empty vec to disallow all cross-origin requests.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

impl std::fmt::Debug for RouterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterConfig")
            .field("api_token", &"***")
            .field("cors_origins", &self.cors_origins)
            .field("enable_tracing", &self.enable_tracing)
            .finish()
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// This function builds the complete Axum router with:
/// - Public routes (health check)
/// - Protected routes (upload-image behind bearer auth)
/// - CORS configuration
/// - Request tracing (optional)
pub fn create_router<S, U>(relay: RelayService<S, U>, config: RouterConfig) -> Router
where
    S: ObjectStore + 'static,
    U: DocumentUploader + 'static,
{
    let app_state = AppState::new(relay);
    let auth = BearerAuth::new(&config.api_token);
    let cors = build_cors_layer(&config);

    // Auth runs before query extraction, so rejected requests never reach the relay
    let protected_routes = Router::new()
        .route("/upload-image", post(upload_image_handler::<S, U>))
        .route("/upload-image/", post(upload_image_handler::<S, U>))
        .with_state(app_state)
        .layer(middleware::from_fn_with_state(auth, auth_middleware));

    let public_routes = Router::new().route("/health", get(health_handler));

    let router = Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .layer(cors);

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .max_age(Duration::from_secs(86400)); // 24 hours

    match &config.cors_origins {
        None => cors.allow_origin(Any),
        Some(origins) if origins.is_empty() => cors,
        Some(origins) => {
            let parsed_origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed_origins)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
