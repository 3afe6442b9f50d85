//! Environment variable loading
//!
//! Reads every configuration value from the process environment, applying
//! defaults where a variable is unset. Empty values are treated as unset so
//! `FOO=` in a .env file does not shadow a default.

use std::env;
use std::path::PathBuf;

use super::{DEFAULT_HOLD_MUSIC_URL, ServerConfig, TlsConfig};

pub(super) fn load_from_env() -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = match env::var("PORT") {
        Ok(value) => value
            .parse::<u16>()
            .map_err(|_| format!("Invalid PORT value: {value}"))?,
        Err(_) => 3000,
    };

    let public_base_url =
        optional("PUBLIC_BASE_URL").unwrap_or_else(|| format!("http://localhost:{port}"));

    Ok(ServerConfig {
        host,
        port,
        tls: load_tls()?,
        public_base_url,
        account_sid: optional("TWILIO_ACCOUNT_SID"),
        auth_token: optional("TWILIO_AUTH_TOKEN"),
        twiml_app_sid: optional("TWILIO_TWIML_APP_SID"),
        caller_id: optional("TWILIO_CALLER_ID"),
        validate_signatures: parse_bool("VALIDATE_SIGNATURES", false)?,
        console_api_secret: optional("CONSOLE_API_SECRET"),
        hold_music_url: optional("HOLD_MUSIC_URL")
            .unwrap_or_else(|| DEFAULT_HOLD_MUSIC_URL.to_string()),
        cors_allowed_origins: optional("CORS_ALLOWED_ORIGINS"),
    })
}

/// Read a variable, treating empty strings as unset
fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

fn parse_bool(name: &str, default: bool) -> Result<bool, Box<dyn std::error::Error>> {
    match env::var(name) {
        Ok(value) => match value.to_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" | "" => Ok(false),
            _ => Err(format!("Invalid {name} value: {value} (expected true or false)").into()),
        },
        Err(_) => Ok(default),
    }
}

fn load_tls() -> Result<Option<TlsConfig>, Box<dyn std::error::Error>> {
    match (optional("TLS_CERT_PATH"), optional("TLS_KEY_PATH")) {
        (Some(cert), Some(key)) => Ok(Some(TlsConfig {
            cert_path: PathBuf::from(cert),
            key_path: PathBuf::from(key),
        })),
        (None, None) => Ok(None),
        _ => Err("TLS_CERT_PATH and TLS_KEY_PATH must be set together".into()),
    }
}
