//! Recording fake of [`GenerativeBackend`] shared by the pipeline tests.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use flipbook_gemini::{GeminiApiError, GenerativeBackend, InlineImage};

/// One recorded `generate_image` call.
#[derive(Debug, Clone)]
pub struct ImageCall {
    pub prompt: String,
    pub reference: Option<InlineImage>,
}

/// Scripted backend.
///
/// Image call `n` (1-based) returns a PNG-tagged image whose bytes are
/// `[n]`, so tests can tell which frame was passed as a reference.
#[derive(Default)]
pub struct FakeBackend {
    pub text_reply: Option<String>,
    pub json_reply: Option<serde_json::Value>,
    /// Image call number that fails with a 503.
    pub fail_image_at: Option<usize>,
    /// Image call number that returns no image.
    pub empty_image_at: Option<usize>,
    pub missing_key: bool,

    pub text_calls: Mutex<Vec<String>>,
    pub json_calls: Mutex<Vec<String>>,
    pub image_calls: Mutex<Vec<ImageCall>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image_calls(&self) -> Vec<ImageCall> {
        self.image_calls.lock().unwrap().clone()
    }

    pub fn remote_call_count(&self) -> usize {
        self.text_calls.lock().unwrap().len()
            + self.json_calls.lock().unwrap().len()
            + self.image_calls.lock().unwrap().len()
    }

    fn unavailable() -> GeminiApiError {
        GeminiApiError::ApiError {
            status: 503,
            body: "model overloaded".to_string(),
        }
    }
}

/// Bytes the fake returns for image call `n`.
pub fn fake_image_bytes(n: usize) -> Vec<u8> {
    vec![n as u8]
}

#[async_trait]
impl GenerativeBackend for FakeBackend {
    async fn generate_text(&self, prompt: &str) -> Result<String, GeminiApiError> {
        self.text_calls.lock().unwrap().push(prompt.to_string());
        if self.missing_key {
            return Err(GeminiApiError::MissingApiKey);
        }
        self.text_reply.clone().ok_or_else(Self::unavailable)
    }

    async fn generate_json(
        &self,
        prompt: &str,
        _schema: &serde_json::Value,
    ) -> Result<serde_json::Value, GeminiApiError> {
        self.json_calls.lock().unwrap().push(prompt.to_string());
        if self.missing_key {
            return Err(GeminiApiError::MissingApiKey);
        }
        self.json_reply.clone().ok_or_else(Self::unavailable)
    }

    async fn generate_image(
        &self,
        prompt: &str,
        reference: Option<&InlineImage>,
    ) -> Result<Option<InlineImage>, GeminiApiError> {
        let n = {
            let mut calls = self.image_calls.lock().unwrap();
            calls.push(ImageCall {
                prompt: prompt.to_string(),
                reference: reference.cloned(),
            });
            calls.len()
        };

        if self.missing_key {
            return Err(GeminiApiError::MissingApiKey);
        }
        if self.fail_image_at == Some(n) {
            return Err(Self::unavailable());
        }
        if self.empty_image_at == Some(n) {
            return Ok(None);
        }
        Ok(Some(InlineImage {
            mime_type: "image/png".to_string(),
            data: fake_image_bytes(n),
        }))
    }
}

/// A storyboard response with one entry per description.
pub fn storyboard_json(descriptions: &[&str]) -> serde_json::Value {
    let entries: Vec<_> = descriptions
        .iter()
        .enumerate()
        .map(|(i, d)| {
            serde_json::json!({
                "technical_notes": format!("pose {}", i + 1),
                "frame_description": d,
            })
        })
        .collect();
    serde_json::json!({ "storyboard": entries })
}
