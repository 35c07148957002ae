#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Malformed data URL: {0}")]
    MalformedDataUrl(String),

    #[error("Storyboard returned {actual} frames, expected {expected}")]
    StoryboardLengthMismatch { expected: usize, actual: usize },

    #[error("Storyboard frame {index} is missing a frame_description")]
    MissingFrameDescription { index: usize },

    #[error("Frame sequence has {actual} frames, expected {expected}")]
    FrameCountMismatch { expected: usize, actual: usize },
}
