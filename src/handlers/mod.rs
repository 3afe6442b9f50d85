//! HTTP request handlers
//!
//! This module organizes all handlers into logical groups:
//! - `api` - Health check endpoint
//! - `calls` - Call listing and live-call redirect (console API)
//! - `conference` - Supervisor conference bridge
//! - `console` - Agent console page and capability tokens
//! - `menu` - Caller-facing department menu
//! - `messages` - Feedback message listing (console API)
//! - `queue` - Queue entry, agent dequeue, hold status, recording consent

pub mod api;
pub mod calls;
pub mod conference;
pub mod console;
pub mod menu;
pub mod messages;
pub mod queue;
