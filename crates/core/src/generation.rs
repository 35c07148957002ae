//! Generation-run parameters, frame positions, and validation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Frame count used when a caller does not ask for one.
pub const DEFAULT_FRAME_COUNT: usize = 6;

/// Hard ceiling on frames per run unless configured otherwise.
pub const DEFAULT_MAX_FRAMES: usize = 24;

// ---------------------------------------------------------------------------
// Frame planning strategy
// ---------------------------------------------------------------------------

/// How per-frame prompt text is chosen for a run.
///
/// The two strategies are alternatives. A run uses exactly one of them and
/// never falls back from one to the other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FramePlanning {
    /// Synthesize each frame's instruction from its index.
    #[default]
    Inline,
    /// Plan every frame up front with one storyboard call.
    Storyboard,
}

const VALID_PLANNING_STRINGS: &[&str] = &["inline", "storyboard"];

impl FramePlanning {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::Storyboard => "storyboard",
        }
    }

    /// Parse a strategy from a string slice.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "inline" => Ok(Self::Inline),
            "storyboard" => Ok(Self::Storyboard),
            _ => Err(CoreError::Validation(format!(
                "Invalid frame planning strategy '{s}'. Must be one of: {}",
                VALID_PLANNING_STRINGS.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Frame position
// ---------------------------------------------------------------------------

/// Where a frame sits in the animation, which decides its instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePosition {
    /// Frame 1: the absolute starting pose, no reference image.
    First,
    /// Any frame between the first and the last.
    Intermediate,
    /// Frame N of N (N > 1): the motion concludes and settles.
    Last,
}

impl FramePosition {
    /// Classify a 1-based `frame_number` within `frame_count` frames.
    ///
    /// A single-frame animation is `First`, never `Last`.
    pub fn of(frame_number: usize, frame_count: usize) -> Self {
        if frame_number <= 1 {
            Self::First
        } else if frame_number >= frame_count {
            Self::Last
        } else {
            Self::Intermediate
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a motion prompt and return it trimmed.
pub fn validate_motion_prompt(prompt: &str) -> Result<&str, CoreError> {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "motion prompt must not be empty".to_string(),
        ));
    }
    Ok(trimmed)
}

/// Validate a requested frame count against the configured ceiling.
///
/// Zero is allowed and produces an empty animation.
pub fn validate_frame_count(frame_count: usize, max_frames: usize) -> Result<(), CoreError> {
    if frame_count > max_frames {
        return Err(CoreError::Validation(format!(
            "frame_count must be <= {max_frames}, got {frame_count}"
        )));
    }
    Ok(())
}
