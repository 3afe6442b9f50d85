//! Error types shared across handlers and middleware.

pub mod app_error;
pub mod auth_error;

pub use app_error::{AppError, AppResult};
pub use auth_error::{AuthError, AuthResult};
