//! Application error type for console API handlers.
//!
//! Webhook handlers never return these; they answer the telephony
//! platform with TwiML even when a backend lookup fails. The console
//! API returns JSON, so its failures map onto HTTP statuses here.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::twilio::TwilioError;

/// Result type for console API operations
pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    /// Telephony credentials were not configured at startup
    #[error("telephony provider is not configured")]
    ProviderNotConfigured,

    /// A call SID was requested that the provider does not know
    #[error("call '{0}' not found")]
    CallNotFound(String),

    /// The provider rejected or failed a request
    #[error(transparent)]
    Provider(#[from] TwilioError),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::ProviderNotConfigured => {
                (StatusCode::SERVICE_UNAVAILABLE, "PROVIDER_NOT_CONFIGURED")
            }
            AppError::CallNotFound(_) => (StatusCode::NOT_FOUND, "CALL_NOT_FOUND"),
            AppError::Provider(err) if err.is_not_found() => {
                (StatusCode::NOT_FOUND, "CALL_NOT_FOUND")
            }
            AppError::Provider(_) => (StatusCode::BAD_GATEWAY, "PROVIDER_REQUEST_FAILED"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!("console request failed: {self}");
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
