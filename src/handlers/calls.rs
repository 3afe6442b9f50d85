//! Call listing and live-call redirect (console API).

use axum::Json;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::errors::app_error::{AppError, AppResult};
use crate::state::AppState;
use crate::twilio::{Call, CallStatus};

/// GET /calls: list calls currently in progress
///
/// Read-through to the provider; no caching or pagination on this side.
pub async fn list_calls(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Call>>> {
    let calls = state.provider()?.list_calls(CallStatus::InProgress).await?;
    tracing::debug!(count = calls.len(), "Listed in-progress calls");
    Ok(Json(calls))
}

/// Form fields for the redirect action
#[derive(Debug, Deserialize)]
pub struct RedirectForm {
    #[serde(default)]
    sid: String,
}

/// POST /calls: send a live call to the supervisor conference
///
/// An empty sid is a no-op so the console's empty form submission never
/// reaches the provider.
pub async fn redirect_call(
    State(state): State<Arc<AppState>>,
    Form(form): Form<RedirectForm>,
) -> AppResult<Response> {
    if form.sid.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let provider = state.provider()?;
    let call = provider.get_call(&form.sid).await.map_err(|e| {
        if e.is_not_found() {
            AppError::CallNotFound(form.sid.clone())
        } else {
            AppError::from(e)
        }
    })?;

    let boss_url = state.config.webhook_url("/boss");
    provider.redirect_call(&call.sid, &boss_url).await?;

    tracing::info!(sid = %call.sid, "Redirected call to supervisor conference");
    Ok(Json(json!({ "status": "redirected", "sid": call.sid })).into_response())
}
