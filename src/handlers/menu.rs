//! Caller-facing department menu.
//!
//! The platform fetches `/menu` when a call arrives, speaks the prompts
//! inside the gather, and posts the collected digit back to the same path.

use axum::Form;
use axum::response::Redirect;
use serde::Deserialize;

use crate::routing::Department;
use crate::twiml::{Gather, TwimlDocument};

/// Form fields posted by the platform after digit collection
#[derive(Debug, Deserialize)]
pub struct MenuForm {
    #[serde(rename = "Digits")]
    digits: Option<String>,
}

/// GET /menu: prompt the caller to pick a department
///
/// The trailing redirect re-prompts callers who let the gather time out.
pub async fn menu_prompt() -> TwimlDocument {
    TwimlDocument::new()
        .gather(
            Gather::new("/menu")
                .num_digits(1)
                .say("For support, press 1")
                .say("For sales, press 2")
                .say("For marketing, press 3"),
        )
        .redirect("/menu")
}

/// POST /menu: route the collected digit to a department queue
///
/// Unmapped or missing digits re-prompt instead of erroring; the platform
/// follows the 303 with a GET.
pub async fn menu_choice(Form(form): Form<MenuForm>) -> Redirect {
    match form.digits.as_deref().and_then(Department::from_digits) {
        Some(department) => {
            tracing::info!(department = %department, "Caller routed from menu");
            Redirect::to(&format!("/enqueue?queue={department}"))
        }
        None => {
            tracing::debug!(digits = ?form.digits, "Unmapped menu choice, re-prompting");
            Redirect::to("/menu")
        }
    }
}
