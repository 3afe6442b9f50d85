pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod routing;
pub mod state;
pub mod twilio;
pub mod twiml;
pub mod utils;

// Re-export commonly used items for convenience
pub use config::ServerConfig;
pub use errors::app_error::{AppError, AppResult};
pub use errors::auth_error::{AuthError, AuthResult};
pub use routing::Department;
pub use state::AppState;
pub use twiml::TwimlDocument;
