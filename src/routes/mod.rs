//! Route definitions for the two route families
//!
//! - `twiml` - webhook routes the telephony platform calls into
//! - `console` - routes the operator's browser calls

pub mod console;
pub mod twiml;

pub use console::create_console_router;
pub use twiml::create_twiml_router;
