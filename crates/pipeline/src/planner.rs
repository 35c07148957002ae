//! Storyboard planning: one structured call that describes every frame.

use flipbook_core::error::CoreError;
use flipbook_core::generation::validate_motion_prompt;
use flipbook_core::prompts::storyboard_instruction;
use flipbook_core::storyboard::{response_schema, validate_storyboard, Storyboard};
use flipbook_gemini::GenerativeBackend;

use crate::error::PipelineError;

/// Plan exactly `frame_count` frames for `motion_prompt`.
///
/// The response must contain one entry per frame, each with a non-empty
/// `frame_description`; anything else fails the whole plan. No retry.
pub async fn plan_storyboard(
    backend: &dyn GenerativeBackend,
    motion_prompt: &str,
    frame_count: usize,
) -> Result<Storyboard, PipelineError> {
    if frame_count == 0 {
        return Err(CoreError::Validation(
            "storyboard frame_count must be positive".to_string(),
        )
        .into());
    }
    let motion = validate_motion_prompt(motion_prompt)?;

    let response = backend
        .generate_json(
            &storyboard_instruction(motion, frame_count),
            &response_schema(),
        )
        .await
        .map_err(|e| PipelineError::remote(e, |source| PipelineError::Planning { source }))?;

    let storyboard = validate_storyboard(&response, frame_count).inspect_err(|e| {
        tracing::warn!(frame_count, error = %e, "Storyboard rejected");
    })?;

    tracing::info!(frame_count, "Storyboard planned");
    Ok(storyboard)
}
