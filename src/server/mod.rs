//! HTTP server exposing the brainstorming commands
//!
//! All commands go through the `/api/invoke` command proxy; `/health` and
//! `/api/version` are plain GET endpoints for probes.

mod proxy;
pub mod routes;
pub mod state;

pub use proxy::{invoke_handler, InvokeRequest, InvokeResponse};
pub use state::ServerAppState;

use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue,
    },
    routing::{get, post},
    Json, Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

/// Version information for the server
#[derive(serde::Serialize)]
struct VersionInfo {
    name: String,
    version: String,
}

/// Build the CORS layer: restricted to `origins` when given, otherwise any origin
fn build_cors(cors_origins: Option<&[String]>) -> CorsLayer {
    match cors_origins {
        Some(origins) if !origins.is_empty() => {
            let allowed_origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|o| match o.parse() {
                    Ok(value) => Some(value),
                    Err(e) => {
                        log::warn!("Ignoring invalid CORS origin '{}': {}", o, e);
                        None
                    }
                })
                .collect();
            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods(Any)
                .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT])
        }
        _ => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]),
    }
}

/// Build the application router
pub fn build_router(state: ServerAppState, cors_origins: Option<&[String]>) -> Router {
    Router::new()
        .route("/api/invoke", post(proxy::invoke_handler))
        .route("/health", get(health_handler))
        .route("/api/version", get(version_handler))
        .layer(build_cors(cors_origins))
        .with_state(state)
}

/// Run the HTTP server until shutdown is requested
pub async fn run_server(
    port: u16,
    bind: &str,
    state: ServerAppState,
    cors_origins: Option<Vec<String>>,
) -> Result<(), String> {
    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .map_err(|e| format!("Invalid address: {}", e))?;

    let cors_display = match &cors_origins {
        Some(origins) if !origins.is_empty() => origins.join(", "),
        _ => "*".to_string(),
    };

    log::info!("Data directory: {}", state.data_dir.display());
    log::info!("Model: {}", state.llm.model());
    log::info!("CORS origins: {}", cors_display);

    let shutdown_state = state.shutdown_state.clone();
    let app = build_router(state, cors_origins.as_deref());

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    log::info!("Server listening on http://{}", addr);

    let shutdown_signal = async move {
        shutdown_state.wait_for_shutdown().await;
        log::info!("Shutdown signal received, stopping server...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| format!("Server error: {}", e))
}

/// Health check endpoint
async fn health_handler() -> &'static str {
    "OK"
}

async fn version_handler() -> Json<VersionInfo> {
    Json(VersionInfo {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
