//! Server Startup Tests
//!
//! Tests for configuration handling, state construction, and the assembled
//! router's startup surface. These verify that the server boots correctly
//! under various credential configurations.

use std::net::TcpListener;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::{Router, middleware};
use tower::util::ServiceExt;

use switchboard_gateway::config::DEFAULT_HOLD_MUSIC_URL;
use switchboard_gateway::handlers::api;
use switchboard_gateway::middleware::{console_auth_middleware, verify_webhook_signature};
use switchboard_gateway::routes::{create_console_router, create_twiml_router};
use switchboard_gateway::state::AppState;
use switchboard_gateway::ServerConfig;

/// Helper function to create a minimal test configuration
fn create_minimal_config(port: u16) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port,
        tls: None,
        public_base_url: format!("http://localhost:{port}"),
        account_sid: None,
        auth_token: None,
        twiml_app_sid: None,
        caller_id: None,
        validate_signatures: false,
        console_api_secret: None,
        hold_music_url: DEFAULT_HOLD_MUSIC_URL.to_string(),
        cors_allowed_origins: None,
    }
}

/// Helper function to find an available port for testing
fn find_available_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind to find available port")
        .local_addr()
        .expect("Failed to get local address")
        .port()
}

/// Assemble the full application router the way main.rs does
fn build_app(config: ServerConfig) -> Router {
    let state = AppState::new(config);

    let twiml_routes = create_twiml_router().layer(middleware::from_fn_with_state(
        state.clone(),
        verify_webhook_signature,
    ));
    let console_routes = create_console_router().layer(middleware::from_fn_with_state(
        state.clone(),
        console_auth_middleware,
    ));

    Router::new()
        .route("/", get(api::health_check))
        .merge(twiml_routes)
        .merge(console_routes)
        .with_state(state)
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let app = build_app(create_minimal_config(find_available_port()));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "OK");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_webhook_routes_available_without_credentials() {
    // A credential-less deployment still answers the telephony platform
    let app = build_app(create_minimal_config(find_available_port()));

    for path in ["/menu", "/enqueue", "/dequeue", "/wait", "/record-consent", "/boss"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{path} should answer");
    }
}

#[tokio::test]
async fn test_console_routes_unavailable_without_credentials() {
    let app = build_app(create_minimal_config(find_available_port()));

    for path in ["/calls", "/feedback", "/token", "/support"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::SERVICE_UNAVAILABLE,
            "{path} should answer 503 until credentials are configured"
        );
    }
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = build_app(create_minimal_config(find_available_port()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_server_config_storage() {
    let port = find_available_port();
    let mut config = create_minimal_config(port);
    config.account_sid = Some("AC123".to_string());
    config.auth_token = Some("secret".to_string());
    config.cors_allowed_origins = Some("https://console.example.com".to_string());

    let state = AppState::new(config);

    assert_eq!(state.config.address(), format!("127.0.0.1:{port}"));
    assert!(!state.config.is_tls_enabled());
    assert!(state.config.has_provider_credentials());
    assert_eq!(
        state.config.cors_allowed_origins.as_deref(),
        Some("https://console.example.com")
    );
    assert!(state.has_provider());
}

#[tokio::test]
async fn test_credentials_gate_provider_wiring() {
    let without = AppState::new(create_minimal_config(find_available_port()));
    assert!(!without.has_provider());

    // SID alone is not enough
    let mut config = create_minimal_config(find_available_port());
    config.account_sid = Some("AC123".to_string());
    let partial = AppState::new(config);
    assert!(!partial.has_provider());

    let mut config = create_minimal_config(find_available_port());
    config.account_sid = Some("AC123".to_string());
    config.auth_token = Some("secret".to_string());
    let with = AppState::new(config);
    assert!(with.has_provider());
}

#[tokio::test]
async fn test_concurrent_state_creation() {
    // State construction is shared-nothing; building several in parallel
    // must not interfere
    let mut handles = Vec::new();
    for _ in 0..8 {
        handles.push(tokio::spawn(async {
            let state = AppState::new(create_minimal_config(find_available_port()));
            assert!(!state.has_provider());
            state
        }));
    }

    for handle in handles {
        let state = handle.await.expect("state creation task panicked");
        assert_eq!(state.config.host, "127.0.0.1");
    }
}

#[tokio::test]
async fn test_state_is_shared_not_copied() {
    let state = AppState::new(create_minimal_config(find_available_port()));
    let clone = state.clone();
    assert!(Arc::ptr_eq(&state, &clone));
}

#[tokio::test]
async fn test_webhook_url_construction() {
    let config = create_minimal_config(3000);
    assert_eq!(config.webhook_url("/boss"), "http://localhost:3000/boss");

    let mut config = create_minimal_config(3000);
    config.public_base_url = "https://gateway.example.com/".to_string();
    assert_eq!(
        config.webhook_url("/menu"),
        "https://gateway.example.com/menu"
    );
}
