//! Agent console page and capability tokens.

use axum::Json;
use axum::extract::State;
use axum::response::Html;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::errors::app_error::AppResult;
use crate::state::AppState;

/// Client name agents register under for incoming console calls
pub const AGENT_CLIENT_NAME: &str = "support_agent";

/// Static console page; the token placeholder is substituted per request
const SUPPORT_PAGE: &str = include_str!("../../static/support.html");

const TOKEN_PLACEHOLDER: &str = "{{CAPABILITY_TOKEN}}";

/// GET /support: agent console page with an inlined capability token
pub async fn support_page(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let token = state.provider()?.capability_token(AGENT_CLIENT_NAME)?;
    Ok(Html(SUPPORT_PAGE.replace(TOKEN_PLACEHOLDER, &token)))
}

/// GET /token: capability token for clients that fetch it out of band
pub async fn capability_token(State(state): State<Arc<AppState>>) -> AppResult<Json<Value>> {
    let token = state.provider()?.capability_token(AGENT_CLIENT_NAME)?;
    Ok(Json(json!({ "token": token })))
}
