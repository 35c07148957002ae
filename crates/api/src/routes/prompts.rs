use axum::routing::post;
use axum::Router;

use crate::handlers::prompts;
use crate::state::AppState;

/// Prompt routes mounted at `/prompts`.
///
/// ```text
/// POST /refine -> refine
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/refine", post(prompts::refine))
}
