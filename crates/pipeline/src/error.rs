use flipbook_core::error::CoreError;
use flipbook_gemini::GeminiApiError;

/// Errors from a refinement, planning, generation or export run.
///
/// Remote failures carry the phase they happened in. A missing API key is
/// reported as [`PipelineError::Configuration`] regardless of phase.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Validation failure (bad input, storyboard shape, malformed data URL).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The Gemini credential is missing.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Prompt enhancement failed: {reason}")]
    Enhancement { reason: String },

    #[error("Storyboard planning failed: {source}")]
    Planning {
        #[source]
        source: GeminiApiError,
    },

    #[error("Generation of frame {frame} failed: {source}")]
    FrameGeneration {
        frame: usize,
        #[source]
        source: GeminiApiError,
    },

    #[error("Generation of frame {frame} failed: no image was returned")]
    NoImageReturned { frame: usize },

    #[error("Generation of frame {frame} failed: unreadable image ({reason})")]
    InvalidFrameImage { frame: usize, reason: String },

    #[error("Failed to load frame {frame} for export: {reason}")]
    FrameLoad { frame: usize, reason: String },

    #[error("GIF encoding failed: {0}")]
    Encoding(String),
}

impl PipelineError {
    /// Wrap a remote error with phase context, short-circuiting a missing
    /// credential into [`PipelineError::Configuration`].
    pub(crate) fn remote(
        err: GeminiApiError,
        wrap: impl FnOnce(GeminiApiError) -> PipelineError,
    ) -> Self {
        match err {
            missing @ GeminiApiError::MissingApiKey => Self::Configuration(missing.to_string()),
            other => wrap(other),
        }
    }

    /// Whether the failure came from the remote service rather than from
    /// input or configuration.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Enhancement { .. }
                | Self::Planning { .. }
                | Self::FrameGeneration { .. }
                | Self::NoImageReturned { .. }
                | Self::InvalidFrameImage { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn missing_key_becomes_configuration_error() {
        let err = PipelineError::remote(GeminiApiError::MissingApiKey, |source| {
            PipelineError::Planning { source }
        });
        assert_matches!(err, PipelineError::Configuration(_));
        assert!(!err.is_upstream());
    }

    #[test]
    fn other_remote_errors_keep_phase() {
        let err = PipelineError::remote(GeminiApiError::EmptyResponse, |source| {
            PipelineError::FrameGeneration { frame: 3, source }
        });
        assert_eq!(
            err.to_string(),
            "Generation of frame 3 failed: Gemini returned an empty response"
        );
        assert!(err.is_upstream());
    }
}
