//! Frame-by-frame animation generation.
//!
//! A run moves through `idle -> generating frame i -> complete | failed`.
//! Frames are generated strictly in order because each frame is attached
//! as the reference image for the next one. The first failure ends the
//! run; no partial sequence is returned and nothing is retried.

use std::sync::Arc;

use flipbook_core::data_url::DataUrl;
use flipbook_core::error::CoreError;
use flipbook_core::frame::FrameSequence;
use flipbook_core::generation::{
    validate_frame_count, validate_motion_prompt, FramePlanning, DEFAULT_MAX_FRAMES,
};
use flipbook_core::progress::{generating_frame, planning_storyboard, MSG_COMPLETE};
use flipbook_core::prompts::{inline_frame_prompt, storyboard_frame_prompt};
use flipbook_gemini::GenerativeBackend;

use crate::error::PipelineError;
use crate::frames::generate_frame;
use crate::planner::plan_storyboard;

/// Drives one motion prompt through frame generation.
///
/// Cheap to construct per run; the backend is shared.
#[derive(Clone)]
pub struct AnimationOrchestrator {
    backend: Arc<dyn GenerativeBackend>,
    planning: FramePlanning,
    max_frames: usize,
}

impl AnimationOrchestrator {
    /// Create an orchestrator using the inline strategy and the default
    /// frame ceiling.
    pub fn new(backend: Arc<dyn GenerativeBackend>) -> Self {
        Self {
            backend,
            planning: FramePlanning::default(),
            max_frames: DEFAULT_MAX_FRAMES,
        }
    }

    pub fn with_planning(mut self, planning: FramePlanning) -> Self {
        self.planning = planning;
        self
    }

    pub fn with_max_frames(mut self, max_frames: usize) -> Self {
        self.max_frames = max_frames;
        self
    }

    pub fn planning(&self) -> FramePlanning {
        self.planning
    }

    /// Generate `frame_count` frames for `motion_prompt`.
    ///
    /// `on_progress` receives one message per stage: the planning step
    /// (storyboard strategy only), `"Generating frame i of N..."` before
    /// each frame, and a final completion message. Asking for zero frames
    /// returns an empty sequence without any remote call or message.
    pub async fn generate<F>(
        &self,
        motion_prompt: &str,
        frame_count: usize,
        mut on_progress: F,
    ) -> Result<FrameSequence, PipelineError>
    where
        F: FnMut(&str) + Send,
    {
        if frame_count == 0 {
            return Ok(FrameSequence::empty());
        }
        validate_frame_count(frame_count, self.max_frames)?;
        let motion = validate_motion_prompt(motion_prompt)?;

        tracing::info!(
            frame_count,
            planning = self.planning.as_str(),
            "Animation generation started",
        );

        let storyboard = match self.planning {
            FramePlanning::Inline => None,
            FramePlanning::Storyboard => {
                on_progress(&planning_storyboard(frame_count));
                Some(plan_storyboard(self.backend.as_ref(), motion, frame_count).await?)
            }
        };

        let mut frames: Vec<DataUrl> = Vec::with_capacity(frame_count);
        for frame_number in 1..=frame_count {
            let prompt = match &storyboard {
                None => inline_frame_prompt(motion, frame_number, frame_count),
                Some(board) => {
                    let entry = board
                        .entry(frame_number)
                        .ok_or(CoreError::MissingFrameDescription {
                            index: frame_number,
                        })?;
                    storyboard_frame_prompt(motion, entry, frame_number, frame_count)
                }
            };

            on_progress(&generating_frame(frame_number, frame_count));

            let frame = generate_frame(self.backend.as_ref(), frame_number, &prompt, frames.last())
                .await
                .inspect_err(|e| {
                    tracing::error!(frame = frame_number, frame_count, error = %e, "Frame generation failed");
                })?;

            tracing::info!(frame = frame_number, frame_count, "Frame generated");
            frames.push(frame);
        }

        let sequence = FrameSequence::from_frames(frames, frame_count)?;
        on_progress(MSG_COMPLETE);
        tracing::info!(frame_count, "Animation generation complete");
        Ok(sequence)
    }
}
