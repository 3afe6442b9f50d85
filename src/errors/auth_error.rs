//! Authentication and signature verification errors.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Webhook arrived without a signature header
    #[error("missing X-Twilio-Signature header")]
    MissingSignature,

    /// Webhook signature did not match the request
    #[error("webhook signature mismatch")]
    InvalidSignature,

    /// Console request carried no token in header or query
    #[error("missing authentication token")]
    MissingToken,

    /// Authorization header was present but not a bearer token
    #[error("malformed authorization header")]
    InvalidAuthHeader,

    /// Console token did not match the configured secret
    #[error("invalid authentication token")]
    InvalidToken,

    /// Signature computation itself failed
    #[error("signature verification failed: {0}")]
    Verification(String),
}

impl AuthError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AuthError::MissingSignature => (StatusCode::UNAUTHORIZED, "MISSING_SIGNATURE"),
            AuthError::InvalidSignature => (StatusCode::FORBIDDEN, "INVALID_SIGNATURE"),
            AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "MISSING_TOKEN"),
            AuthError::InvalidAuthHeader => (StatusCode::UNAUTHORIZED, "INVALID_AUTH_HEADER"),
            AuthError::InvalidToken => (StatusCode::FORBIDDEN, "INVALID_TOKEN"),
            AuthError::Verification(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "SIGNATURE_CHECK_FAILED")
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!("authentication failed: {self}");
        } else {
            tracing::warn!("authentication rejected: {self}");
        }
        (
            status,
            Json(json!({
                "error": self.to_string(),
                "code": code,
            })),
        )
            .into_response()
    }
}
