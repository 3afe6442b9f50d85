//! Feedback message listing (console API).

use axum::Json;
use axum::extract::State;
use std::sync::Arc;

use crate::errors::app_error::AppResult;
use crate::state::AppState;
use crate::twilio::Message;

/// GET /feedback: list texts received after calls wrap up
pub async fn list_feedback(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Message>>> {
    let messages = state.provider()?.list_messages().await?;
    tracing::debug!(count = messages.len(), "Listed feedback messages");
    Ok(Json(messages))
}
