//! Handlers for animation generation and GIF export.
//!
//! Generation runs the full frame chain inside the request and streams
//! progress lines to WebSocket clients while it works. Export decodes the
//! submitted frames and returns the encoded GIF as a download.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use flipbook_core::data_url::DataUrl;
use flipbook_core::frame::FrameSequence;
use flipbook_core::generation::{validate_frame_count, FramePlanning, DEFAULT_FRAME_COUNT};
use flipbook_core::playback::DEFAULT_SPEED;
use flipbook_core::progress::MSG_REFINING;
use flipbook_pipeline::export::export_gif;
use flipbook_pipeline::refiner::refine_prompt;
use flipbook_pipeline::AnimationOrchestrator;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::ws::progress::ProgressReporter;

/// Download name of an exported animation.
const GIF_FILENAME: &str = "animation.gif";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `POST /api/v1/animations`.
#[derive(Debug, Deserialize)]
pub struct GenerateAnimationRequest {
    /// Motion description, e.g. "a ball bouncing".
    pub prompt: String,
    #[serde(default = "default_frame_count")]
    pub frame_count: usize,
    /// Per-frame planning strategy (default: `inline`).
    #[serde(default)]
    pub strategy: FramePlanning,
    /// Refine the prompt into an opening-scene description first.
    #[serde(default)]
    pub refine: bool,
}

fn default_frame_count() -> usize {
    DEFAULT_FRAME_COUNT
}

#[derive(Debug, Serialize)]
pub struct GeneratedAnimation {
    /// Correlates this response with its WebSocket progress messages.
    pub run_id: String,
    /// The motion prompt the frames were generated from.
    pub prompt: String,
    pub frames: FrameSequence,
    pub frame_count: usize,
}

/// Body of `POST /api/v1/animations/export`.
#[derive(Debug, Deserialize)]
pub struct ExportAnimationRequest {
    /// Frames as data URLs, in playback order.
    pub frames: Vec<String>,
    /// Playback speed, `100..=1000` (default: `600`).
    #[serde(default)]
    pub speed: Option<u32>,
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// POST /api/v1/animations
///
/// Generate `frame_count` frames for `prompt`. Progress lines are
/// broadcast over `/api/v1/ws` tagged with the returned `run_id`. A
/// request for zero frames returns an empty sequence without any model
/// call.
pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateAnimationRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let run_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(
        run_id = %run_id,
        frame_count = input.frame_count,
        strategy = input.strategy.as_str(),
        refine = input.refine,
        "Animation requested",
    );

    let reporter = ProgressReporter::spawn(state.ws_manager.clone(), run_id.clone());

    let result = run_generation(&state, &input, &reporter).await;
    reporter.finish().await;

    let (prompt, frames) = result?;
    let frame_count = frames.len();

    Ok(Json(DataResponse {
        data: GeneratedAnimation {
            run_id,
            prompt,
            frames,
            frame_count,
        },
    }))
}

/// Optional refinement followed by the frame chain. Returns the motion
/// prompt actually used together with the frames.
///
/// The frame cap is checked first so an oversized request never reaches
/// the refinement call.
async fn run_generation(
    state: &AppState,
    input: &GenerateAnimationRequest,
    reporter: &ProgressReporter,
) -> AppResult<(String, FrameSequence)> {
    validate_frame_count(input.frame_count, state.config.max_frames)?;

    let prompt = if input.refine && input.frame_count > 0 {
        reporter.report(MSG_REFINING);
        refine_prompt(state.backend.as_ref(), &input.prompt).await?
    } else {
        input.prompt.clone()
    };

    let orchestrator = AnimationOrchestrator::new(state.backend.clone())
        .with_planning(input.strategy)
        .with_max_frames(state.config.max_frames);

    let frames = orchestrator
        .generate(&prompt, input.frame_count, |message| reporter.report(message))
        .await?;

    Ok((prompt, frames))
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// POST /api/v1/animations/export
///
/// Encode the submitted frames as a looping GIF and return it as an
/// `animation.gif` attachment. Nothing is returned if any frame fails to
/// decode. The body limit is set per route from `max_frames` and
/// `max_frame_bytes`.
pub async fn export(
    payload: Result<Json<ExportAnimationRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let speed = input.speed.unwrap_or(DEFAULT_SPEED);
    let frames = input
        .frames
        .iter()
        .map(|raw| DataUrl::parse(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let gif = tokio::task::spawn_blocking(move || export_gif(&frames, speed))
        .await
        .map_err(|e| AppError::InternalError(format!("GIF export task failed: {e}")))??;

    Ok((
        [
            (header::CONTENT_TYPE, "image/gif".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{GIF_FILENAME}\""),
            ),
        ],
        gif,
    ))
}
