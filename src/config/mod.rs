//! Configuration module for the switchboard gateway
//!
//! This module handles server configuration from various sources: .env files, YAML files,
//! and environment variables. Priority: YAML > ENV vars > .env values > defaults.
//!
//! # Modules
//! - `yaml`: YAML configuration file loading
//! - `env`: Environment variable loading
//!
//! # Example
//! ```rust,no_run
//! use switchboard_gateway::config::ServerConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = ServerConfig::from_env()?;
//!
//! // Load from YAML file with environment variable overrides
//! let config_path = PathBuf::from("config.yaml");
//! let config = ServerConfig::from_file(&config_path)?;
//!
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

mod env;
mod yaml;

/// Hold music looped at queued callers when no custom URL is configured.
pub const DEFAULT_HOLD_MUSIC_URL: &str =
    "http://com.twilio.music.rock.s3.amazonaws.com/nickleus_-_original_guitar_song_200907251723.mp3";

/// TLS configuration for HTTPS
#[derive(Debug, Clone)]
pub struct TlsConfig {
    /// Path to the TLS certificate file (PEM format)
    pub cert_path: PathBuf,
    /// Path to the TLS private key file (PEM format)
    pub key_path: PathBuf,
}

/// Server configuration
///
/// Contains all configuration needed to run the switchboard gateway, including:
/// - Server settings (host, port, TLS, public base URL)
/// - Telephony account settings (account SID, auth token, TwiML app SID, caller ID)
/// - Webhook signature validation
/// - Console authentication
/// - Security settings (CORS)
#[derive(Debug, Clone)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,

    // TLS configuration (optional)
    pub tls: Option<TlsConfig>,

    /// Public base URL the telephony platform uses to reach this service.
    /// Used to build absolute webhook URLs for call redirects and to
    /// reconstruct the signed URL during webhook signature checks.
    pub public_base_url: String,

    // Telephony account settings
    pub account_sid: Option<String>,
    pub auth_token: Option<String>,
    /// TwiML application SID granted to browser clients for outgoing calls
    pub twiml_app_sid: Option<String>,
    /// Default caller ID for outbound calls and texts (E.164)
    pub caller_id: Option<String>,
    /// Verify the X-Twilio-Signature header on webhook routes
    pub validate_signatures: bool,

    // Console settings
    /// Bearer token protecting the console routes. None disables console auth.
    pub console_api_secret: Option<String>,

    // Media settings
    /// Audio played to callers holding in a queue
    pub hold_music_url: String,

    // Security configuration
    /// CORS allowed origins (comma-separated list or "*" for all)
    /// Default: None (CORS disabled, same-origin only)
    pub cors_allowed_origins: Option<String>,
}

/// Implement Drop to zeroize secret fields when ServerConfig is dropped.
impl Drop for ServerConfig {
    fn drop(&mut self) {
        use zeroize::Zeroize;

        if let Some(ref mut token) = self.auth_token {
            token.zeroize();
        }
        if let Some(ref mut secret) = self.console_api_secret {
            secret.zeroize();
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// Reads every setting from the process environment (a .env file, if
    /// present, is loaded in main.rs before this runs) and validates the
    /// result.
    ///
    /// # Errors
    /// Returns an error if a variable has an invalid format or validation
    /// fails.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let config = env::load_from_env()?;
        validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a YAML file with environment variable base
    ///
    /// Priority order (highest to lowest):
    /// 1. YAML file values
    /// 2. Environment variables (actual ENV vars override .env values)
    /// 3. .env file values
    /// 4. Default values
    ///
    /// # Arguments
    /// * `path` - Path to the YAML configuration file
    ///
    /// # Errors
    /// Returns an error if:
    /// - The YAML file cannot be read or is malformed
    /// - Environment variables have invalid formats
    /// - Configuration validation fails
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let yaml_config = yaml::YamlConfig::from_file(path)?;
        let mut config = env::load_from_env()?;
        yaml::apply_overrides(&mut config, yaml_config);
        validate(&config)?;
        Ok(config)
    }

    /// Get the server address as a string
    ///
    /// Returns the address in the format "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if TLS is enabled
    pub fn is_tls_enabled(&self) -> bool {
        self.tls.is_some()
    }

    /// Check if telephony REST credentials are configured
    ///
    /// Returns true if both the account SID and auth token are set
    pub fn has_provider_credentials(&self) -> bool {
        self.account_sid.is_some() && self.auth_token.is_some()
    }

    /// Build an absolute URL under the public base for a webhook path
    ///
    /// # Example
    /// ```rust,no_run
    /// # use switchboard_gateway::config::ServerConfig;
    /// # fn demo(config: &ServerConfig) {
    /// let url = config.webhook_url("/boss");
    /// # }
    /// ```
    pub fn webhook_url(&self, path: &str) -> String {
        format!("{}{}", self.public_base_url.trim_end_matches('/'), path)
    }
}

fn validate(config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.account_sid.is_some() != config.auth_token.is_some() {
        return Err(
            "TWILIO_ACCOUNT_SID and TWILIO_AUTH_TOKEN must be configured together".into(),
        );
    }

    if config.validate_signatures && config.auth_token.is_none() {
        return Err(
            "VALIDATE_SIGNATURES requires TWILIO_AUTH_TOKEN (signatures are keyed by the auth token)"
                .into(),
        );
    }

    let parsed = url::Url::parse(&config.public_base_url)
        .map_err(|e| format!("Invalid PUBLIC_BASE_URL '{}': {e}", config.public_base_url))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(format!(
            "Invalid PUBLIC_BASE_URL '{}': scheme must be http or https",
            config.public_base_url
        )
        .into());
    }

    Ok(())
}
