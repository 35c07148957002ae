//! Ordered frame sequences.

use serde::Serialize;

use crate::data_url::DataUrl;
use crate::error::CoreError;

/// The frames of one animation, in temporal order.
///
/// A sequence produced by a generation run always holds exactly the
/// requested number of frames.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrameSequence {
    frames: Vec<DataUrl>,
}

impl FrameSequence {
    /// An empty sequence (the result of asking for zero frames).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap generated frames, checking the count against the request.
    pub fn from_frames(frames: Vec<DataUrl>, expected: usize) -> Result<Self, CoreError> {
        if frames.len() != expected {
            return Err(CoreError::FrameCountMismatch {
                expected,
                actual: frames.len(),
            });
        }
        Ok(Self { frames })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[DataUrl] {
        &self.frames
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataUrl> {
        self.frames.iter()
    }

    pub fn into_frames(self) -> Vec<DataUrl> {
        self.frames
    }
}

impl<'a> IntoIterator for &'a FrameSequence {
    type Item = &'a DataUrl;
    type IntoIter = std::slice::Iter<'a, DataUrl>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}
