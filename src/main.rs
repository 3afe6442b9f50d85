use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::info;

use axum::{Router, middleware};
use axum_server::tls_rustls::RustlsConfig;
use clap::{Parser, Subcommand};
use http::{
    Method,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use anyhow::anyhow;

use switchboard_gateway::{
    AppState, ServerConfig,
    middleware::{console_auth_middleware, verify_webhook_signature},
    routes,
    utils::validate_phone_number,
};

/// Switchboard Gateway - call-center webhook service
#[derive(Parser, Debug)]
#[command(name = "switchboard-gateway")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Place an outbound call that fetches its instructions from a webhook
    Call {
        /// Destination phone number (E.164)
        #[arg(long)]
        to: String,

        /// Caller ID (defaults to the configured caller ID)
        #[arg(long)]
        from: Option<String>,

        /// Instruction URL the call executes (defaults to the public /menu)
        #[arg(long)]
        url: Option<String>,
    },

    /// Send a text message
    SendSms {
        /// Destination phone number (E.164)
        #[arg(long)]
        to: String,

        /// Sender (defaults to the configured caller ID)
        #[arg(long)]
        from: Option<String>,

        /// Message body
        #[arg(long)]
        body: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (must be done before config loading)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Initialize crypto provider for TLS connections
    // This must be done before any TLS connections are attempted
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow!("Failed to install default crypto provider"))?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration from file or environment
    let config = if let Some(ref config_path) = cli.config {
        println!("Loading configuration from {}", config_path.display());
        ServerConfig::from_file(config_path).map_err(|e| anyhow!(e.to_string()))?
    } else {
        ServerConfig::from_env().map_err(|e| anyhow!(e.to_string()))?
    };

    // Handle subcommands (one-shot provider actions)
    if let Some(command) = cli.command {
        let state = AppState::new(config);
        return match command {
            Commands::Call { to, from, url } => run_call(&state, to, from, url).await,
            Commands::SendSms { to, from, body } => run_send_sms(&state, to, from, body).await,
        };
    }

    let address = config.address();
    let tls_config = config.tls.clone();
    let is_tls_enabled = config.is_tls_enabled();
    let cors_origins = config.cors_allowed_origins.clone();
    if config.validate_signatures {
        info!("Webhook signature validation enabled");
    }
    println!("Starting server on {address}");

    // Create application state
    let app_state = AppState::new(config);

    // Webhook routes answer the telephony platform; signature verification
    // stands in for bearer auth on this family
    let twiml_routes = routes::create_twiml_router().layer(middleware::from_fn_with_state(
        app_state.clone(),
        verify_webhook_signature,
    ));

    // Console routes require the console secret when one is configured
    let console_routes = routes::create_console_router().layer(middleware::from_fn_with_state(
        app_state.clone(),
        console_auth_middleware,
    ));

    // Create public health check route (no auth)
    let public_routes = Router::new().route(
        "/",
        axum::routing::get(switchboard_gateway::handlers::api::health_check),
    );

    // Configure CORS
    let cors_layer = if let Some(ref origins) = cors_origins {
        if origins == "*" {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                .allow_credentials(false)
        } else {
            // Parse comma-separated origins
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                .allow_credentials(true)
        }
    } else {
        // No CORS configured - strict same-origin only for production security
        // Cross-origin requests will be blocked. To enable CORS, set CORS_ALLOWED_ORIGINS
        // environment variable or configure security.cors_allowed_origins in YAML.
        info!(
            "CORS not configured, defaulting to same-origin only. \
             Set CORS_ALLOWED_ORIGINS to enable cross-origin access."
        );
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([AUTHORIZATION, CONTENT_TYPE])
            .allow_credentials(false)
        // No allow_origin = same-origin only (browsers block cross-origin requests)
    };

    // Security headers
    let security_headers = tower::ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            http::header::X_CONTENT_TYPE_OPTIONS,
            http::HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            http::header::X_FRAME_OPTIONS,
            http::HeaderValue::from_static("DENY"),
        ));

    // Combine all routes: public + webhook + console
    let app = public_routes
        .merge(twiml_routes)
        .merge(console_routes)
        .with_state(app_state)
        .layer(cors_layer)
        .layer(security_headers);

    // Parse socket address
    let socket_addr: SocketAddr = address
        .parse()
        .map_err(|e| anyhow!("Invalid server address '{}': {}", address, e))?;

    // Start server with or without TLS
    if is_tls_enabled {
        let tls = tls_config.ok_or_else(|| anyhow!("TLS enabled but certificate paths missing"))?;

        // Load TLS configuration from certificate and key files
        let rustls_config = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path)
            .await
            .map_err(|e| {
                anyhow!(
                    "Failed to load TLS certificates from {} and {}: {}",
                    tls.cert_path.display(),
                    tls.key_path.display(),
                    e
                )
            })?;

        println!("Server listening on https://{socket_addr} (TLS enabled)");

        axum_server::bind_rustls(socket_addr, rustls_config)
            .serve(app.into_make_service_with_connect_info::<SocketAddr>())
            .await
            .map_err(|e| anyhow!("TLS server error: {}", e))?;
    } else {
        println!("Server listening on http://{socket_addr}");

        let listener = TcpListener::bind(&socket_addr).await?;
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await?;
    }

    Ok(())
}

/// Place an outbound call through the configured provider
async fn run_call(
    state: &AppState,
    to: String,
    from: Option<String>,
    url: Option<String>,
) -> anyhow::Result<()> {
    let from = from
        .or_else(|| state.config.caller_id.clone())
        .ok_or_else(|| anyhow!("No caller ID: pass --from or set TWILIO_CALLER_ID"))?;

    if !validate_phone_number(&to) {
        anyhow::bail!("Invalid destination number '{to}' (expected E.164, e.g. +15551234567)");
    }
    if !validate_phone_number(&from) {
        anyhow::bail!("Invalid caller ID '{from}' (expected E.164, e.g. +15551234567)");
    }

    let url = url.unwrap_or_else(|| state.config.webhook_url("/menu"));

    let call = state.provider()?.create_call(&to, &from, &url).await?;
    println!("Call created: {}", call.sid);
    Ok(())
}

/// Send a text message through the configured provider
async fn run_send_sms(
    state: &AppState,
    to: String,
    from: Option<String>,
    body: String,
) -> anyhow::Result<()> {
    let from = from
        .or_else(|| state.config.caller_id.clone())
        .ok_or_else(|| anyhow!("No caller ID: pass --from or set TWILIO_CALLER_ID"))?;

    if !validate_phone_number(&to) {
        anyhow::bail!("Invalid destination number '{to}' (expected E.164, e.g. +15551234567)");
    }
    if !validate_phone_number(&from) {
        anyhow::bail!("Invalid caller ID '{from}' (expected E.164, e.g. +15551234567)");
    }

    let message = state.provider()?.send_message(&to, &from, &body).await?;
    println!("Message sent: {}", message.sid);
    Ok(())
}
