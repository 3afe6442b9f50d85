//! Provider capability trait and error type.

use async_trait::async_trait;
use thiserror::Error;

use super::types::{Call, CallStatus, Message};

/// Errors surfaced by a telephony provider.
#[derive(Debug, Error)]
pub enum TwilioError {
    #[error("request to telephony API failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("telephony API returned {status}: {message} (code {code})")]
    Api {
        status: u16,
        code: u32,
        message: String,
    },

    #[error("unexpected response from telephony API: {0}")]
    InvalidResponse(String),

    #[error("failed to sign capability token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl TwilioError {
    /// True for a 404 on a specific resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self, TwilioError::Api { status: 404, .. })
    }
}

/// Operations the gateway needs from its telephony backend.
///
/// One implementation talks to the live REST API; tests install their
/// own to observe exactly which calls a handler makes.
#[async_trait]
pub trait TelephonyProvider: Send + Sync {
    /// List calls currently in `status`.
    async fn list_calls(&self, status: CallStatus) -> Result<Vec<Call>, TwilioError>;

    /// Fetch a single call by SID.
    async fn get_call(&self, sid: &str) -> Result<Call, TwilioError>;

    /// Point an in-progress call at new TwiML.
    async fn redirect_call(&self, sid: &str, url: &str) -> Result<Call, TwilioError>;

    /// Place an outbound call that fetches its TwiML from `url`.
    async fn create_call(&self, to: &str, from: &str, url: &str) -> Result<Call, TwilioError>;

    /// List recent text messages on the account.
    async fn list_messages(&self) -> Result<Vec<Message>, TwilioError>;

    /// Send a text message.
    async fn send_message(&self, to: &str, from: &str, body: &str)
    -> Result<Message, TwilioError>;

    /// Mint a capability token for a browser client.
    fn capability_token(&self, client_name: &str) -> Result<String, TwilioError>;
}
