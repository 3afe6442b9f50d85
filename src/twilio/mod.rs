//! Telephony provider integration.
//!
//! [`provider::TelephonyProvider`] is the capability surface the rest
//! of the crate programs against: queue inspection via call listings,
//! call redirection, outbound calls and texts, capability tokens for
//! browser clients. [`client::TwilioRestClient`] implements it against
//! the Twilio 2010-04-01 REST API; tests substitute their own
//! implementations.

pub mod client;
pub mod provider;
pub mod token;
pub mod types;

pub use client::{DEFAULT_API_BASE, TwilioRestClient};
pub use provider::{TelephonyProvider, TwilioError};
pub use token::{CapabilityToken, DEFAULT_TOKEN_TTL};
pub use types::{Call, CallStatus, Message};
