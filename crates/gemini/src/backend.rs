//! The generative-model seam the animation pipeline depends on.

use async_trait::async_trait;

use crate::api::GeminiApiError;

/// Raw image bytes tagged with their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Remote text and image generation.
///
/// [`GeminiApi`](crate::GeminiApi) is the production implementation.
/// Every call is a single attempt; implementations never retry.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Free-text completion. Returns an empty string when the model
    /// produced no text.
    async fn generate_text(&self, prompt: &str) -> Result<String, GeminiApiError>;

    /// Structured completion constrained by a response schema.
    async fn generate_json(
        &self,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> Result<serde_json::Value, GeminiApiError>;

    /// Image-only completion with an optional reference image attached.
    ///
    /// Returns the first inline image of the response, or `None` if the
    /// model returned no image.
    async fn generate_image(
        &self,
        prompt: &str,
        reference: Option<&InlineImage>,
    ) -> Result<Option<InlineImage>, GeminiApiError>;
}
