use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::handlers::{calls, console, messages};
use crate::state::AppState;
use std::sync::Arc;

/// Create the console router serving the agent console and its JSON API
///
/// Note: Console auth middleware should be applied in main.rs after state is available
pub fn create_console_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/support", get(console::support_page))
        .route("/token", get(console::capability_token))
        .route("/calls", get(calls::list_calls).post(calls::redirect_call))
        .route("/feedback", get(messages::list_feedback))
        .layer(TraceLayer::new_for_http())
}
