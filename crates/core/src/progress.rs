//! Progress messages reported while an animation is generated.
//!
//! Messages are ephemeral: each one replaces the previous, and no history
//! is kept.

/// WebSocket message type carrying a progress line.
pub const MSG_TYPE_GENERATION_PROGRESS: &str = "generation_progress";

/// Final message of a successful run.
pub const MSG_COMPLETE: &str = "Animation complete!";

/// Message emitted before frame `frame_number` of `frame_count` is requested.
pub fn generating_frame(frame_number: usize, frame_count: usize) -> String {
    format!("Generating frame {frame_number} of {frame_count}...")
}

/// Message emitted before the optional prompt refinement call.
pub const MSG_REFINING: &str = "Refining prompt...";

/// Message emitted before the storyboard planning call.
pub fn planning_storyboard(frame_count: usize) -> String {
    format!("Planning storyboard for {frame_count} frames...")
}
