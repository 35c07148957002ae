//! Handlers for prompt refinement.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use flipbook_pipeline::refiner::refine_prompt;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /api/v1/prompts/refine`.
#[derive(Debug, Deserialize)]
pub struct RefineRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct RefinedPrompt {
    pub prompt: String,
}

/// POST /api/v1/prompts/refine
///
/// Elaborate a short motion prompt into a paragraph describing the
/// opening scene. The client decides whether to use the result.
pub async fn refine(
    State(state): State<AppState>,
    payload: Result<Json<RefineRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let prompt = refine_prompt(state.backend.as_ref(), &input.prompt).await?;

    Ok(Json(DataResponse {
        data: RefinedPrompt { prompt },
    }))
}
