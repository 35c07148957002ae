use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use flipbook_gemini::{GeminiApi, GeminiConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flipbook_api::config::ServerConfig;
use flipbook_api::router::build_app_router;
use flipbook_api::{state, ws};

use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "flipbook_api=debug,flipbook_pipeline=debug,flipbook_gemini=info,tower_http=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        max_frames = config.max_frames,
        "Loaded server configuration",
    );

    // --- Gemini client ---
    let gemini_config = GeminiConfig::from_env();
    let credential_configured = gemini_config.api_key.is_some();
    if credential_configured {
        tracing::info!(
            text_model = %gemini_config.text_model,
            image_model = %gemini_config.image_model,
            "Gemini client configured",
        );
    } else {
        // Requests still reach the handlers and fail with a configuration error.
        tracing::warn!("GEMINI_API_KEY is not set; generation requests will fail");
    }
    let backend = Arc::new(GeminiApi::new(gemini_config));

    // --- WebSocket manager ---
    let ws_manager = Arc::new(ws::WsManager::new());

    // --- Heartbeat ---
    let heartbeat_handle = ws::start_heartbeat(Arc::clone(&ws_manager));

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        ws_manager: Arc::clone(&ws_manager),
        backend,
        credential_configured,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let ip = config
        .host
        .parse()
        .with_context(|| format!("Invalid HOST address '{}'", config.host))?;
    let addr = SocketAddr::new(ip, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    let ws_count = ws_manager.connection_count().await;
    tracing::info!(ws_count, "Closing remaining WebSocket connections");
    ws_manager.shutdown_all().await;

    heartbeat_handle.abort();
    tracing::info!("Heartbeat task stopped");

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix). If a handler
/// cannot be installed, that branch never resolves and the other still
/// triggers shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl-C, starting graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
