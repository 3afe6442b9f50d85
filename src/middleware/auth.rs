//! Console route authentication.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;
use subtle::ConstantTimeEq;

use crate::errors::auth_error::AuthError;
use crate::state::AppState;

/// Extract an authentication token from the request
///
/// Supports two token sources for browser compatibility:
/// 1. Authorization header: `Authorization: Bearer <token>` (preferred)
/// 2. Query parameter: `?token=<token>` (for plain browser navigation,
///    where headers cannot be set)
fn extract_token(request: &Request) -> Result<String, AuthError> {
    if let Some(auth_header) = request.headers().get("authorization") {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| AuthError::InvalidAuthHeader)?;

        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            return Ok(token.to_string());
        }
        return Err(AuthError::InvalidAuthHeader);
    }

    if let Some(query) = request.uri().query() {
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            if key == "token" {
                return Ok(value.to_string());
            }
        }
    }

    Err(AuthError::MissingToken)
}

/// Require the configured console secret on console routes
///
/// A deployment without a console secret leaves these routes open, which
/// suits local development; production sets CONSOLE_API_SECRET. Tokens are
/// compared in constant time.
pub async fn console_auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let Some(secret) = state.config.console_api_secret.as_ref() else {
        return Ok(next.run(request).await);
    };

    let token = extract_token(&request)?;

    if token.as_bytes().ct_eq(secret.as_bytes()).into() {
        tracing::debug!(path = %request.uri().path(), "Console authentication successful");
        Ok(next.run(request).await)
    } else {
        tracing::warn!(
            path = %request.uri().path(),
            "Console authentication failed: token mismatch"
        );
        Err(AuthError::InvalidToken)
    }
}
