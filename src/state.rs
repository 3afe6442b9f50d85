//! Application state shared across request handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::errors::app_error::AppError;
use crate::twilio::{TelephonyProvider, TwilioRestClient};

/// Shared state handed to every handler.
///
/// The provider is optional: webhook routes emit markup without it, so a
/// credential-less deployment can still answer the telephony platform.
/// Provider-backed routes answer 503 until credentials are configured.
pub struct AppState {
    pub config: ServerConfig,
    provider: Option<Arc<dyn TelephonyProvider>>,
}

impl AppState {
    /// Build state from configuration, wiring the REST client when
    /// credentials are present.
    pub fn new(config: ServerConfig) -> Arc<Self> {
        let provider = match (&config.account_sid, &config.auth_token) {
            (Some(sid), Some(token)) => {
                let mut client = TwilioRestClient::new(sid.clone(), token.clone());
                if let Some(app_sid) = &config.twiml_app_sid {
                    client = client.with_app_sid(app_sid.clone());
                }
                tracing::info!("Telephony provider configured");
                Some(Arc::new(client) as Arc<dyn TelephonyProvider>)
            }
            _ => {
                tracing::warn!(
                    "Telephony credentials not configured; console API and outbound calls disabled"
                );
                None
            }
        };

        Arc::new(Self { config, provider })
    }

    /// Build state with an explicit provider implementation.
    ///
    /// Tests use this to observe exactly which provider calls a handler
    /// makes.
    pub fn with_provider(
        config: ServerConfig,
        provider: Arc<dyn TelephonyProvider>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            provider: Some(provider),
        })
    }

    /// The configured provider, or the coded 503 error
    pub fn provider(&self) -> Result<&Arc<dyn TelephonyProvider>, AppError> {
        self.provider
            .as_ref()
            .ok_or(AppError::ProviderNotConfigured)
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }
}
