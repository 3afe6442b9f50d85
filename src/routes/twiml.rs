use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::handlers::{conference, menu, queue};
use crate::state::AppState;
use std::sync::Arc;

/// Create the webhook router the telephony platform calls into
///
/// Every handler answers with a markup document or a redirect.
/// Note: Signature middleware should be applied in main.rs after state is available
pub fn create_twiml_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/menu", get(menu::menu_prompt).post(menu::menu_choice))
        .route("/enqueue", get(queue::enqueue_caller))
        .route("/dequeue", get(queue::dequeue_caller))
        .route("/wait", get(queue::wait_status))
        .route(
            "/record-consent",
            get(queue::record_consent).post(queue::record_consent),
        )
        .route(
            "/boss",
            get(conference::boss_conference).post(conference::boss_conference),
        )
        .layer(TraceLayer::new_for_http())
}
