//! Prompt refinement: elaborate a raw motion prompt into an opening scene.

use flipbook_core::generation::validate_motion_prompt;
use flipbook_core::prompts::refine_instruction;
use flipbook_gemini::GenerativeBackend;

use crate::error::PipelineError;

/// Ask the text model for one paragraph describing the static initial
/// scene of `motion_prompt`.
///
/// Single attempt. A failed call or an empty reply is reported as
/// [`PipelineError::Enhancement`].
pub async fn refine_prompt(
    backend: &dyn GenerativeBackend,
    motion_prompt: &str,
) -> Result<String, PipelineError> {
    let motion = validate_motion_prompt(motion_prompt)?;

    let reply = backend
        .generate_text(&refine_instruction(motion))
        .await
        .map_err(|e| {
            PipelineError::remote(e, |source| PipelineError::Enhancement {
                reason: source.to_string(),
            })
        })?;

    let refined = reply.trim();
    if refined.is_empty() {
        tracing::warn!("Prompt refinement returned no text");
        return Err(PipelineError::Enhancement {
            reason: "the model returned no text".to_string(),
        });
    }

    tracing::info!(chars = refined.len(), "Prompt refined");
    Ok(refined.to_string())
}
