//! Prompt text sent to the text and image models.

use crate::generation::FramePosition;
use crate::storyboard::StoryboardEntry;

/// Appended to every frame prompt so the frames read as one animation.
const CONTINUITY_RULES: &str = "Keep the same subject, art style, lighting, \
background and camera framing as the reference image. Change only what the \
motion requires. Output a single still image with no text, borders or panels.";

/// Instruction for the prompt refiner.
///
/// The refined prompt describes the static opening scene only, so that the
/// orchestrator stays in charge of how the motion unfolds.
pub fn refine_instruction(motion_prompt: &str) -> String {
    format!(
        "You are a storyboard artist preparing a short frame-by-frame animation.\n\
         The user wants to animate this motion: \"{motion_prompt}\".\n\n\
         Write ONE detailed paragraph describing the static initial scene: the \
         subject, its appearance, its exact starting pose, the setting, lighting, \
         art style and camera framing.\n\
         Do NOT describe the motion, any later poses, or any sequence of steps.\n\
         Reply with the paragraph only."
    )
}

/// Instruction for the storyboard planner.
pub fn storyboard_instruction(motion_prompt: &str, frame_count: usize) -> String {
    format!(
        "Plan a {frame_count}-frame animation of this motion: \"{motion_prompt}\".\n\n\
         Return a JSON object with a \"storyboard\" array containing exactly \
         {frame_count} entries, one per frame in order. For each entry:\n\
         - \"technical_notes\": the physics of the pose at that instant (joint \
         angles, height, momentum, direction of travel).\n\
         - \"frame_description\": a self-contained visual description of the \
         frame suitable for an image model.\n\
         Frame 1 is the absolute starting pose. Frame {frame_count} is the \
         concluded motion, fully settled. Space the poses evenly along the \
         motion's physical arc."
    )
}

/// Frame prompt for the inline strategy, derived from the frame index.
pub fn inline_frame_prompt(motion_prompt: &str, frame_number: usize, frame_count: usize) -> String {
    match FramePosition::of(frame_number, frame_count) {
        FramePosition::First => format!(
            "Frame 1 of {frame_count} of an animation of: \"{motion_prompt}\".\n\
             Establish the scene with the subject in the absolute starting pose, \
             before any movement has begun. Output a single still image with no \
             text, borders or panels."
        ),
        FramePosition::Intermediate => format!(
            "Frame {frame_number} of {frame_count} of an animation of: \"{motion_prompt}\".\n\
             The reference image is frame {previous}. Calculate the next pose along \
             the motion's physical arc: reason about the angles of the limbs and \
             body, the momentum carried from the previous pose, and how far the \
             motion should progress in one of {frame_count} evenly spaced steps. \
             Draw that pose.\n{CONTINUITY_RULES}",
            previous = frame_number - 1,
        ),
        FramePosition::Last => format!(
            "Frame {frame_number} of {frame_count}, the final frame of an animation \
             of: \"{motion_prompt}\".\n\
             The reference image is frame {previous}. Conclude the motion: show the \
             end pose, fully settled, with all momentum spent.\n{CONTINUITY_RULES}",
            previous = frame_number - 1,
        ),
    }
}

/// Frame prompt for the storyboard strategy, using the planned entry.
pub fn storyboard_frame_prompt(
    motion_prompt: &str,
    entry: &StoryboardEntry,
    frame_number: usize,
    frame_count: usize,
) -> String {
    let notes = if entry.technical_notes.is_empty() {
        String::new()
    } else {
        format!("Pose notes: {}\n", entry.technical_notes)
    };

    match FramePosition::of(frame_number, frame_count) {
        FramePosition::First => format!(
            "Frame 1 of {frame_count} of an animation of: \"{motion_prompt}\".\n\
             Establish the scene from the absolute starting pose.\n\
             {notes}Frame description: {description}\n\
             Output a single still image with no text, borders or panels.",
            description = entry.frame_description,
        ),
        FramePosition::Intermediate => format!(
            "Frame {frame_number} of {frame_count} of an animation of: \"{motion_prompt}\".\n\
             {notes}Frame description: {description}\n{CONTINUITY_RULES}",
            description = entry.frame_description,
        ),
        FramePosition::Last => format!(
            "Frame {frame_number} of {frame_count}, the final frame of an animation \
             of: \"{motion_prompt}\".\n\
             Conclude the motion, fully settled.\n\
             {notes}Frame description: {description}\n{CONTINUITY_RULES}",
            description = entry.frame_description,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> StoryboardEntry {
        StoryboardEntry {
            technical_notes: "knees bent 40 degrees".to_string(),
            frame_description: "a red ball at the top of its arc".to_string(),
        }
    }

    #[test]
    fn refine_instruction_forbids_motion_steps() {
        let text = refine_instruction("A ball bouncing");
        assert!(text.contains("A ball bouncing"));
        assert!(text.contains("Do NOT describe the motion"));
    }

    #[test]
    fn storyboard_instruction_names_frame_count() {
        let text = storyboard_instruction("A ball bouncing", 5);
        assert!(text.contains("exactly 5 entries"));
        assert!(text.contains("Frame 5 is the concluded motion"));
    }

    #[test]
    fn first_inline_frame_sets_starting_pose() {
        let text = inline_frame_prompt("A ball bouncing", 1, 3);
        assert!(text.contains("absolute starting pose"));
        assert!(!text.contains("reference image"));
    }

    #[test]
    fn intermediate_inline_frame_reasons_about_arc() {
        let text = inline_frame_prompt("A ball bouncing", 2, 3);
        assert!(text.contains("physical arc"));
        assert!(text.contains("momentum"));
        assert!(text.contains("reference image is frame 1"));
    }

    #[test]
    fn last_inline_frame_concludes_motion() {
        let text = inline_frame_prompt("A ball bouncing", 3, 3);
        assert!(text.contains("Conclude the motion"));
        assert!(text.contains("fully settled"));
    }

    #[test]
    fn single_inline_frame_is_not_a_conclusion() {
        let text = inline_frame_prompt("A ball bouncing", 1, 1);
        assert!(!text.contains("Conclude"));
    }

    #[test]
    fn storyboard_frame_includes_planned_description() {
        let text = storyboard_frame_prompt("A ball bouncing", &entry(), 2, 4);
        assert!(text.contains("a red ball at the top of its arc"));
        assert!(text.contains("knees bent 40 degrees"));
    }

    #[test]
    fn storyboard_last_frame_concludes_motion() {
        let text = storyboard_frame_prompt("A ball bouncing", &entry(), 4, 4);
        assert!(text.contains("Conclude the motion"));
    }

    #[test]
    fn storyboard_frame_without_notes_omits_notes_line() {
        let mut e = entry();
        e.technical_notes.clear();
        let text = storyboard_frame_prompt("A ball bouncing", &e, 1, 2);
        assert!(!text.contains("Pose notes"));
    }
}
