//! Webhook signature verification.
//!
//! The telephony platform signs every webhook it sends: HMAC-SHA1 over the
//! full request URL followed by the alphabetically sorted POST form
//! parameters (each name concatenated with its value), keyed by the account
//! auth token and base64-encoded into the `X-Twilio-Signature` header.
//! The URL is reconstructed from the configured public base so the check
//! works behind proxies that rewrite Host.

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use http_body_util::BodyExt;
use sha1::Sha1;
use std::sync::Arc;
use subtle::ConstantTimeEq;

use crate::errors::auth_error::AuthError;
use crate::state::AppState;

type HmacSha1 = Hmac<Sha1>;

const SIGNATURE_HEADER: &str = "x-twilio-signature";

/// Compute the expected signature for a URL and form parameters.
///
/// `params` are the decoded POST form pairs; GET requests pass an empty
/// slice. Parameters are sorted by name before signing, matching the
/// platform's canonicalization.
pub fn compute_signature(
    auth_token: &str,
    url: &str,
    params: &[(String, String)],
) -> Result<String, AuthError> {
    let mut sorted: Vec<&(String, String)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));

    let mut payload = String::from(url);
    for (name, value) in sorted {
        payload.push_str(name);
        payload.push_str(value);
    }

    let mut mac = HmacSha1::new_from_slice(auth_token.as_bytes())
        .map_err(|e| AuthError::Verification(format!("HMAC key setup failed: {e}")))?;
    mac.update(payload.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Verify the platform signature on webhook requests.
///
/// Deployments with `validate_signatures` off pass requests through
/// untouched. POST bodies are buffered so form parameters can enter the
/// signature, then replayed to the handler.
pub async fn verify_webhook_signature(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    if !state.config.validate_signatures {
        return Ok(next.run(request).await);
    }

    // Validation without the signing key is rejected at config load; this
    // guards against direct state construction.
    let auth_token = state
        .config
        .auth_token
        .clone()
        .ok_or_else(|| AuthError::Verification("auth token not configured".to_string()))?;

    let header_value = request
        .headers()
        .get(SIGNATURE_HEADER)
        .ok_or(AuthError::MissingSignature)?
        .to_str()
        .map_err(|_| AuthError::InvalidSignature)?
        .to_string();

    // Reconstruct the exact URL the platform signed
    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let url = state.config.webhook_url(&path_and_query);

    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let (parts, body) = request.into_parts();
    let body_bytes = body
        .collect()
        .await
        .map_err(|e| AuthError::Verification(format!("Failed to read request body: {e}")))?
        .to_bytes();

    let params: Vec<(String, String)> = if method == Method::POST {
        url::form_urlencoded::parse(&body_bytes)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    } else {
        Vec::new()
    };

    let expected = compute_signature(&auth_token, &url, &params)?;

    if expected.as_bytes().ct_eq(header_value.as_bytes()).into() {
        tracing::debug!(path = %path, "Webhook signature verified");
        let request = Request::from_parts(parts, Body::from(body_bytes));
        Ok(next.run(request).await)
    } else {
        tracing::warn!(path = %path, "Webhook signature mismatch");
        Err(AuthError::InvalidSignature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_example_signature() {
        // Worked example from the platform's security documentation
        let params = vec![
            ("CallSid".to_string(), "CA1234567890ABCDE".to_string()),
            ("Caller".to_string(), "+12349013030".to_string()),
            ("Digits".to_string(), "1234".to_string()),
            ("From".to_string(), "+12349013030".to_string()),
            ("To".to_string(), "+18005551212".to_string()),
        ];
        let signature = compute_signature(
            "12345",
            "https://mycompany.com/myapp.php?foo=1&bar=2",
            &params,
        )
        .unwrap();
        assert_eq!(signature, "0/KCTR6DLpKmkAf8muzZqo1nDgQ=");
    }

    #[test]
    fn test_post_parameters_enter_signature() {
        let params = vec![
            ("Digits".to_string(), "1".to_string()),
            ("CallSid".to_string(), "CA123".to_string()),
        ];
        let signature =
            compute_signature("secret", "http://localhost:3000/menu", &params).unwrap();
        assert_eq!(signature, "VOyYmpffG37zoETXd3ImN/YLLr0=");
    }

    #[test]
    fn test_get_signature_covers_query_string() {
        let signature = compute_signature(
            "secret",
            "http://localhost:3000/enqueue?queue=sales",
            &[],
        )
        .unwrap();
        assert_eq!(signature, "aV+cxddHR+6H11ecoYRKgjkdo9w=");
    }

    #[test]
    fn test_parameter_order_does_not_matter() {
        let forward = vec![
            ("A".to_string(), "1".to_string()),
            ("B".to_string(), "2".to_string()),
        ];
        let reversed = vec![
            ("B".to_string(), "2".to_string()),
            ("A".to_string(), "1".to_string()),
        ];
        let url = "http://localhost:3000/menu";
        assert_eq!(
            compute_signature("secret", url, &forward).unwrap(),
            compute_signature("secret", url, &reversed).unwrap()
        );
    }

    #[test]
    fn test_different_token_different_signature() {
        let url = "http://localhost:3000/menu";
        assert_ne!(
            compute_signature("secret", url, &[]).unwrap(),
            compute_signature("other", url, &[]).unwrap()
        );
    }
}
