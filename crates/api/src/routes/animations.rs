use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::config::ServerConfig;
use crate::handlers::animations;
use crate::state::AppState;

/// Animation routes mounted at `/animations`.
///
/// ```text
/// POST /        -> generate
/// POST /export  -> export (body limit sized for `max_frames` full frames)
/// ```
pub fn router(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .route("/", post(animations::generate))
        .route(
            "/export",
            post(animations::export).layer(DefaultBodyLimit::max(config.export_body_limit())),
        )
}
