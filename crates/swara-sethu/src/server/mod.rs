//! Same-origin analysis proxy.
//!
//! Holds the classification credential and exposes `POST /api/analyze` and
//! `GET /health` to clients that never see the key.

mod api_error;
mod handlers;
mod state;

pub(crate) use {api_error::ApiError, state::AppState};

use crate::{AppError, AppResult, cli::ServeArgs, config::Config};

use swara_sethu_core::{
    GeminiClient, MAX_UPLOAD_BYTES,
    wire::{ANALYZE_PATH, HEALTH_PATH},
};

use std::{panic::Location, sync::Arc};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use error_location::ErrorLocation;
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Largest accepted request body: a maximal upload after base64 expansion
/// plus room for the JSON envelope and a data URL header.
pub(crate) const MAX_REQUEST_BODY_BYTES: usize =
    (MAX_UPLOAD_BYTES as usize).div_ceil(3) * 4 + 64 * 1024;

/// Build the proxy router.
pub(crate) fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(handlers::health))
        .route(ANALYZE_PATH, post(handlers::analyze))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the proxy until Ctrl-C or SIGTERM.
pub(crate) async fn run(config: &Config, args: ServeArgs) -> AppResult<()> {
    let mut server = config.server.clone();
    if let Some(port) = args.port {
        server.port = port;
    }
    if let Some(bind) = args.bind {
        server.bind_address = bind;
    }

    let api_key = config.gemini.api_key(args.api_key);
    let gemini = GeminiClient::new(config.gemini.settings(), api_key)?;
    let state = Arc::new(AppState::new(gemini));

    let addr = server.socket_address();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::ServerError {
            reason: format!("Failed to bind {}: {}", addr, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    info!(
        address = %addr,
        credential_configured = state.gemini.has_credential(),
        "Analysis proxy listening"
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::ServerError {
            reason: format!("Server error: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    info!("Server shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = ?e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = ?e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received terminate signal, shutting down"),
    }
}
