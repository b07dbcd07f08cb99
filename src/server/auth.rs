//! Bearer token authentication for the relay API.
//!
//! Callers authenticate with a static token shared out of band:
//!
//! ```text
//! Authorization: Bearer <API_TOKEN>
//! ```
//!
//! Rejections are `401 Unauthorized` with a `WWW-Authenticate: Bearer`
//! challenge. The token comparison is constant-time.
//!
//! # Example
//!
//! ```rust
//! use s3_tms_relay::server::auth::BearerAuth;
//!
//! let auth = BearerAuth::new("my-api-token");
//!
//! assert!(auth.verify(Some("Bearer my-api-token")).is_ok());
//! assert!(auth.verify(Some("Bearer wrong")).is_err());
//! assert!(auth.verify(None).is_err());
//! ```

use axum::{
    extract::{Request, State},
    http::{
        header::{AUTHORIZATION, WWW_AUTHENTICATE},
        HeaderValue, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use super::handlers::ErrorResponse;

// =============================================================================
// Types
// =============================================================================

/// Authentication error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No `Authorization` header was sent
    MissingCredentials,

    /// The header does not use the `Bearer` scheme
    InvalidScheme,

    /// The token does not match the configured token
    InvalidToken,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingCredentials => write!(f, "Not authenticated"),
            AuthError::InvalidScheme => write!(f, "Invalid authentication credentials"),
            AuthError::InvalidToken => write!(f, "Invalid authentication token"),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = StatusCode::UNAUTHORIZED;
        let message = self.to_string();

        // A wrong token could indicate probing, so log it at warn level
        match &self {
            AuthError::InvalidToken => {
                warn!(
                    error_type = "unauthorized",
                    status = status.as_u16(),
                    "Authentication failed: {}",
                    message
                );
            }
            _ => {
                debug!(
                    error_type = "unauthorized",
                    status = status.as_u16(),
                    "Authentication failed: {}",
                    message
                );
            }
        }

        unauthorized_response(message)
    }
}

/// Build a 401 response carrying the bearer challenge.
fn unauthorized_response(message: String) -> Response {
    let status = StatusCode::UNAUTHORIZED;
    let error_response = ErrorResponse::with_status("unauthorized", message, status);
    (
        status,
        [(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"))],
        Json(error_response),
    )
        .into_response()
}

// =============================================================================
// Bearer Authentication
// =============================================================================

/// Static bearer token verifier.
#[derive(Clone)]
pub struct BearerAuth {
    /// Expected token bytes
    token: Vec<u8>,
}

impl BearerAuth {
    /// Create a verifier that accepts exactly `token`.
    pub fn new(token: impl AsRef<[u8]>) -> Self {
        Self {
            token: token.as_ref().to_vec(),
        }
    }

    /// Verify the raw value of an `Authorization` header.
    ///
    /// The scheme name is matched case-insensitively; the token exactly.
    pub fn verify(&self, authorization: Option<&str>) -> Result<(), AuthError> {
        let authorization = authorization.ok_or(AuthError::MissingCredentials)?;

        let (scheme, token) = authorization
            .trim()
            .split_once(' ')
            .ok_or(AuthError::InvalidScheme)?;

        if !scheme.eq_ignore_ascii_case("bearer") {
            return Err(AuthError::InvalidScheme);
        }

        let token = token.trim();
        if token.is_empty() || self.token.is_empty() {
            return Err(AuthError::InvalidToken);
        }

        if token.as_bytes().ct_eq(&self.token).into() {
            Ok(())
        } else {
            Err(AuthError::InvalidToken)
        }
    }
}

// =============================================================================
// Axum Middleware
// =============================================================================

/// Axum middleware rejecting requests without the configured bearer token.
///
/// Runs before any extractor of the wrapped handlers, so a rejected request
/// never reaches the object store or the TMS.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, middleware, routing::post};
/// use s3_tms_relay::server::auth::{BearerAuth, auth_middleware};
///
/// let auth = BearerAuth::new("api-token");
/// let app = Router::new()
///     .route("/upload-image", post(upload_image_handler))
///     .layer(middleware::from_fn_with_state(auth, auth_middleware));
/// ```
pub async fn auth_middleware(
    State(auth): State<BearerAuth>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let authorization = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    auth.verify(authorization)?;

    Ok(next.run(request).await)
}

// =============================================================================
// Tests
// =============================================================================
