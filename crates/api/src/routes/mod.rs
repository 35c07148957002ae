pub mod animations;
pub mod health;
pub mod prompts;

use axum::routing::get;
use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                         WebSocket progress feed
///
/// /prompts/refine             refine a motion prompt (POST)
///
/// /animations                 generate frames (POST)
/// /animations/export          encode frames as GIF (POST)
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/prompts", prompts::router())
        .nest("/animations", animations::router(config))
}
