//! Storyboard response schema and validation.
//!
//! The planner asks the text model for a JSON object shaped like
//! `{ "storyboard": [{ "technical_notes": "...", "frame_description": "..." }] }`.
//! Validation runs on the raw JSON value so that a missing field, a
//! non-string field and an empty field are all reported the same way,
//! and so that nothing is accepted partially.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// One planned frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryboardEntry {
    /// Pose/physics reasoning for the frame (may be empty).
    pub technical_notes: String,
    /// Visual description used to prompt the image model.
    pub frame_description: String,
}

/// A validated storyboard with exactly one entry per requested frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Storyboard {
    entries: Vec<StoryboardEntry>,
}

impl Storyboard {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for a 1-based frame number.
    pub fn entry(&self, frame_number: usize) -> Option<&StoryboardEntry> {
        frame_number
            .checked_sub(1)
            .and_then(|index| self.entries.get(index))
    }

    /// Frame descriptions in frame order.
    pub fn descriptions(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|e| e.frame_description.as_str())
            .collect()
    }

    pub fn entries(&self) -> &[StoryboardEntry] {
        &self.entries
    }
}

/// JSON schema handed to the text model in structured-output mode.
pub fn response_schema() -> Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "storyboard": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "technical_notes": { "type": "STRING" },
                        "frame_description": { "type": "STRING" }
                    },
                    "required": ["technical_notes", "frame_description"],
                    "propertyOrdering": ["technical_notes", "frame_description"]
                }
            }
        },
        "required": ["storyboard"]
    })
}

/// Validate a planner response against the requested frame count.
///
/// Fails with [`CoreError::StoryboardLengthMismatch`] when the array
/// length differs from `expected`, and with
/// [`CoreError::MissingFrameDescription`] (1-based index) when any entry
/// lacks a non-empty string `frame_description`.
pub fn validate_storyboard(response: &Value, expected: usize) -> Result<Storyboard, CoreError> {
    let items = response
        .get("storyboard")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            CoreError::Validation("storyboard response has no 'storyboard' array".to_string())
        })?;

    if items.len() != expected {
        return Err(CoreError::StoryboardLengthMismatch {
            expected,
            actual: items.len(),
        });
    }

    let mut entries = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let description = item
            .get("frame_description")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or(CoreError::MissingFrameDescription { index: i + 1 })?;

        let notes = item
            .get("technical_notes")
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or_default();

        entries.push(StoryboardEntry {
            technical_notes: notes.to_string(),
            frame_description: description.to_string(),
        });
    }

    Ok(Storyboard { entries })
}
