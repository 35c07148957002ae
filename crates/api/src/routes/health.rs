use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether a Gemini API key was present at startup.
    pub gemini_configured: bool,
    /// Number of open progress-feed connections.
    pub ws_connections: usize,
}

/// GET /health -- returns service health.
///
/// The service reports `degraded` when no model credential is configured,
/// since every generation request would then fail.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let gemini_configured = state.credential_configured;
    let status = if gemini_configured { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        gemini_configured,
        ws_connections: state.ws_manager.connection_count().await,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
