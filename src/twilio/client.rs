//! REST client for the Twilio 2010-04-01 API.

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::provider::{TelephonyProvider, TwilioError};
use super::token::{CapabilityToken, DEFAULT_TOKEN_TTL};
use super::types::{Call, CallPage, CallStatus, Message, MessagePage};

/// Production API root.
pub const DEFAULT_API_BASE: &str = "https://api.twilio.com/2010-04-01";

/// Error envelope the API returns on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<u32>,
    message: String,
}

/// Account-scoped REST client.
///
/// Authenticates every request with HTTP basic auth (account SID as
/// username, auth token as password). The API base is overridable so
/// tests can point the client at a local mock server.
pub struct TwilioRestClient {
    http: reqwest::Client,
    api_base: String,
    account_sid: String,
    auth_token: String,
    app_sid: Option<String>,
    token_ttl: u64,
}

impl TwilioRestClient {
    pub fn new(account_sid: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            app_sid: None,
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// TwiML application SID granted to outgoing capability tokens.
    pub fn with_app_sid(mut self, app_sid: impl Into<String>) -> Self {
        self.app_sid = Some(app_sid.into());
        self
    }

    pub fn with_token_ttl(mut self, seconds: u64) -> Self {
        self.token_ttl = seconds;
        self
    }

    fn account_url(&self, path: &str) -> String {
        format!("{}/Accounts/{}/{}", self.api_base, self.account_sid, path)
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .get(self.account_url(path))
            .basic_auth(&self.account_sid, Some(&self.auth_token))
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .post(self.account_url(path))
            .basic_auth(&self.account_sid, Some(&self.auth_token))
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, TwilioError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(err) => Err(TwilioError::Api {
                status: status.as_u16(),
                code: err.code.unwrap_or(0),
                message: err.message,
            }),
            Err(_) => Err(TwilioError::InvalidResponse(format!(
                "status {}: {}",
                status.as_u16(),
                body
            ))),
        }
    }
}

#[async_trait]
impl TelephonyProvider for TwilioRestClient {
    async fn list_calls(&self, status: CallStatus) -> Result<Vec<Call>, TwilioError> {
        let response = self
            .get("Calls.json")
            .query(&[("Status", status.as_str())])
            .send()
            .await?;
        let page: CallPage = Self::parse_response(response).await?;
        Ok(page.calls)
    }

    async fn get_call(&self, sid: &str) -> Result<Call, TwilioError> {
        let response = self.get(&format!("Calls/{sid}.json")).send().await?;
        Self::parse_response(response).await
    }

    async fn redirect_call(&self, sid: &str, url: &str) -> Result<Call, TwilioError> {
        let response = self
            .post(&format!("Calls/{sid}.json"))
            .form(&[("Url", url), ("Method", "POST")])
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn create_call(&self, to: &str, from: &str, url: &str) -> Result<Call, TwilioError> {
        let response = self
            .post("Calls.json")
            .form(&[("To", to), ("From", from), ("Url", url)])
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn list_messages(&self) -> Result<Vec<Message>, TwilioError> {
        let response = self.get("Messages.json").send().await?;
        let page: MessagePage = Self::parse_response(response).await?;
        Ok(page.messages)
    }

    async fn send_message(
        &self,
        to: &str,
        from: &str,
        body: &str,
    ) -> Result<Message, TwilioError> {
        let response = self
            .post("Messages.json")
            .form(&[("To", to), ("From", from), ("Body", body)])
            .send()
            .await?;
        Self::parse_response(response).await
    }

    fn capability_token(&self, client_name: &str) -> Result<String, TwilioError> {
        let mut token = CapabilityToken::new(&self.account_sid, &self.auth_token)
            .allow_client_incoming(client_name)
            .ttl(self.token_ttl);
        if let Some(app_sid) = &self.app_sid {
            token = token.allow_client_outgoing(app_sid);
        }
        Ok(token.to_jwt()?)
    }
}
