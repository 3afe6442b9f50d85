//! YAML configuration file loading

use serde::Deserialize;
use std::path::PathBuf;

use super::{ServerConfig, TlsConfig};

/// Complete YAML configuration structure
///
/// This structure represents the full configuration that can be loaded from a YAML file.
/// All fields are optional to allow partial configuration; YAML values override
/// whatever the environment provided.
///
/// # Example YAML structure
/// ```yaml
/// server:
///   host: "0.0.0.0"
///   port: 3000
///   public_base_url: "https://gateway.example.com"
///   tls:
///     cert_path: "/etc/ssl/gateway.crt"
///     key_path: "/etc/ssl/gateway.key"
///
/// twilio:
///   account_sid: "ACXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX"
///   auth_token: "your-auth-token"
///   twiml_app_sid: "APXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX"
///   caller_id: "+15551234567"
///   validate_signatures: true
///
/// console:
///   api_secret: "console-bearer-token"
///
/// media:
///   hold_music_url: "https://example.com/hold.mp3"
///
/// security:
///   cors_allowed_origins: "https://console.example.com"
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: Option<ServerYaml>,
    pub twilio: Option<TwilioYaml>,
    pub console: Option<ConsoleYaml>,
    pub media: Option<MediaYaml>,
    pub security: Option<SecurityYaml>,
}

/// Server configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerYaml {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub public_base_url: Option<String>,
    pub tls: Option<TlsYaml>,
}

/// TLS configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TlsYaml {
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
}

/// Telephony account configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TwilioYaml {
    pub account_sid: Option<String>,
    pub auth_token: Option<String>,
    /// TwiML application SID granted to browser clients for outgoing calls
    pub twiml_app_sid: Option<String>,
    /// Default caller ID for outbound calls and texts (E.164)
    pub caller_id: Option<String>,
    pub validate_signatures: Option<bool>,
}

/// Console configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ConsoleYaml {
    pub api_secret: Option<String>,
}

/// Media configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct MediaYaml {
    pub hold_music_url: Option<String>,
}

/// Security configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SecurityYaml {
    /// CORS allowed origins (comma-separated list or "*" for all)
    pub cors_allowed_origins: Option<String>,
}

impl YamlConfig {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file cannot be read
    /// - The YAML is malformed
    /// - Fields have invalid types
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;

        let config: YamlConfig = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse YAML config: {e}"))?;

        Ok(config)
    }
}

/// Apply YAML values over the environment-derived base configuration
pub(super) fn apply_overrides(config: &mut ServerConfig, yaml: YamlConfig) {
    if let Some(server) = yaml.server {
        if let Some(host) = server.host {
            config.host = host;
        }
        if let Some(port) = server.port {
            config.port = port;
        }
        if let Some(url) = server.public_base_url {
            config.public_base_url = url;
        }
        if let Some(tls) = server.tls
            && let (Some(cert), Some(key)) = (tls.cert_path, tls.key_path)
        {
            config.tls = Some(TlsConfig {
                cert_path: PathBuf::from(cert),
                key_path: PathBuf::from(key),
            });
        }
    }

    if let Some(twilio) = yaml.twilio {
        if let Some(sid) = twilio.account_sid {
            config.account_sid = Some(sid);
        }
        if let Some(token) = twilio.auth_token {
            config.auth_token = Some(token);
        }
        if let Some(app_sid) = twilio.twiml_app_sid {
            config.twiml_app_sid = Some(app_sid);
        }
        if let Some(caller_id) = twilio.caller_id {
            config.caller_id = Some(caller_id);
        }
        if let Some(validate) = twilio.validate_signatures {
            config.validate_signatures = validate;
        }
    }

    if let Some(console) = yaml.console
        && let Some(secret) = console.api_secret
    {
        config.console_api_secret = Some(secret);
    }

    if let Some(media) = yaml.media
        && let Some(url) = media.hold_music_url
    {
        config.hold_music_url = url;
    }

    if let Some(security) = yaml.security
        && let Some(origins) = security.cors_allowed_origins
    {
        config.cors_allowed_origins = Some(origins);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> ServerConfig {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            tls: None,
            public_base_url: "http://localhost:3000".to_string(),
            account_sid: Some("AC_env".to_string()),
            auth_token: Some("token_env".to_string()),
            twiml_app_sid: None,
            caller_id: None,
            validate_signatures: false,
            console_api_secret: None,
            hold_music_url: "http://env.example.com/hold.mp3".to_string(),
            cors_allowed_origins: None,
        }
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
server:
  host: "127.0.0.1"
  port: 8080
  public_base_url: "https://gateway.example.com"
  tls:
    cert_path: "/etc/ssl/gateway.crt"
    key_path: "/etc/ssl/gateway.key"

twilio:
  account_sid: "AC123"
  auth_token: "secret"
  twiml_app_sid: "AP456"
  caller_id: "+15551234567"
  validate_signatures: true

console:
  api_secret: "console-secret"

media:
  hold_music_url: "https://example.com/hold.mp3"

security:
  cors_allowed_origins: "*"
"#;

        let config: YamlConfig = serde_yaml::from_str(yaml).unwrap();
        let server = config.server.as_ref().unwrap();
        assert_eq!(server.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(server.port, Some(8080));

        let twilio = config.twilio.as_ref().unwrap();
        assert_eq!(twilio.account_sid.as_deref(), Some("AC123"));
        assert_eq!(twilio.validate_signatures, Some(true));

        assert_eq!(
            config.console.as_ref().unwrap().api_secret.as_deref(),
            Some("console-secret")
        );
    }

    #[test]
    fn test_parse_partial_config() {
        let yaml = r#"
server:
  port: 9000
"#;
        let config: YamlConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.as_ref().unwrap().port, Some(9000));
        assert!(config.twilio.is_none());
        assert!(config.console.is_none());
    }

    #[test]
    fn test_parse_empty_config() {
        let config: YamlConfig = serde_yaml::from_str("{}").unwrap();
        assert!(config.server.is_none());
        assert!(config.security.is_none());
    }

    #[test]
    fn test_apply_overrides_only_touches_set_fields() {
        let mut config = base_config();

        let yaml: YamlConfig = serde_yaml::from_str(
            r#"
twilio:
  account_sid: "AC_yaml"
"#,
        )
        .unwrap();

        apply_overrides(&mut config, yaml);
        assert_eq!(config.account_sid.as_deref(), Some("AC_yaml"));
        assert_eq!(config.auth_token.as_deref(), Some("token_env"));
        assert_eq!(config.port, 3000);
        assert_eq!(config.hold_music_url, "http://env.example.com/hold.mp3");
    }

    #[test]
    fn test_tls_override_requires_both_paths() {
        let mut config = base_config();

        let yaml: YamlConfig = serde_yaml::from_str(
            r#"
server:
  tls:
    cert_path: "/etc/ssl/gateway.crt"
"#,
        )
        .unwrap();

        apply_overrides(&mut config, yaml);
        assert!(config.tls.is_none());
    }
}
