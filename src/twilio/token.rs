//! Client capability tokens.
//!
//! Browser softphone clients authenticate to the telephony platform
//! with a short-lived JWT signed by the account auth token. The token
//! carries a space-separated list of scope URIs describing what the
//! holder may do: register for incoming calls under a client name,
//! place outgoing calls through a TwiML application.

use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Default token lifetime in seconds.
pub const DEFAULT_TOKEN_TTL: u64 = 3600;

#[derive(Debug, Serialize, Deserialize)]
struct CapabilityClaims {
    scope: String,
    iss: String,
    exp: u64,
}

/// Builder for a signed capability token.
#[derive(Debug, Clone)]
pub struct CapabilityToken {
    account_sid: String,
    auth_token: String,
    scopes: Vec<String>,
    ttl: u64,
}

impl CapabilityToken {
    pub fn new(account_sid: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            scopes: Vec::new(),
            ttl: DEFAULT_TOKEN_TTL,
        }
    }

    /// Allow the holder to register for incoming calls as `client_name`.
    pub fn allow_client_incoming(mut self, client_name: &str) -> Self {
        self.scopes
            .push(scope_uri("client", "incoming", &[("clientName", client_name)]));
        self
    }

    /// Allow the holder to place outgoing calls through `app_sid`.
    pub fn allow_client_outgoing(mut self, app_sid: &str) -> Self {
        self.scopes
            .push(scope_uri("client", "outgoing", &[("appSid", app_sid)]));
        self
    }

    pub fn ttl(mut self, seconds: u64) -> Self {
        self.ttl = seconds;
        self
    }

    /// Sign the token with the account auth token (HS256).
    pub fn to_jwt(&self) -> Result<String, jsonwebtoken::errors::Error> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let claims = CapabilityClaims {
            scope: self.scopes.join(" "),
            iss: self.account_sid.clone(),
            exp: now + self.ttl,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.auth_token.as_bytes()),
        )
    }
}

fn scope_uri(service: &str, privilege: &str, params: &[(&str, &str)]) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    format!("scope:{service}:{privilege}?{query}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

    fn decode_claims(jwt: &str, secret: &str) -> CapabilityClaims {
        let validation = Validation::new(Algorithm::HS256);
        decode::<CapabilityClaims>(jwt, &DecodingKey::from_secret(secret.as_bytes()), &validation)
            .unwrap()
            .claims
    }

    #[test]
    fn test_token_signed_with_auth_token() {
        let jwt = CapabilityToken::new("AC123", "secret")
            .allow_client_incoming("support_agent")
            .to_jwt()
            .unwrap();
        let claims = decode_claims(&jwt, "secret");
        assert_eq!(claims.iss, "AC123");
    }

    #[test]
    fn test_token_rejects_wrong_secret() {
        let jwt = CapabilityToken::new("AC123", "secret")
            .allow_client_incoming("support_agent")
            .to_jwt()
            .unwrap();
        let validation = Validation::new(Algorithm::HS256);
        let result = decode::<CapabilityClaims>(
            &jwt,
            &DecodingKey::from_secret(b"other"),
            &validation,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_scopes_joined_with_spaces() {
        let jwt = CapabilityToken::new("AC123", "secret")
            .allow_client_outgoing("AP456")
            .allow_client_incoming("support_agent")
            .to_jwt()
            .unwrap();
        let claims = decode_claims(&jwt, "secret");
        assert_eq!(
            claims.scope,
            "scope:client:outgoing?appSid=AP456 scope:client:incoming?clientName=support_agent"
        );
    }

    #[test]
    fn test_expiry_honors_ttl() {
        let jwt = CapabilityToken::new("AC123", "secret")
            .allow_client_incoming("support_agent")
            .ttl(7200)
            .to_jwt()
            .unwrap();
        let claims = decode_claims(&jwt, "secret");
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        assert!(claims.exp > now + 7000);
        assert!(claims.exp <= now + 7200);
    }

    #[test]
    fn test_scope_params_are_url_encoded() {
        let uri = scope_uri("client", "incoming", &[("clientName", "agent one")]);
        assert_eq!(uri, "scope:client:incoming?clientName=agent+one");
    }
}
