pub mod auth;
pub mod signature;

// Re-export middleware functions
pub use auth::console_auth_middleware;
pub use signature::{compute_signature, verify_webhook_signature};
