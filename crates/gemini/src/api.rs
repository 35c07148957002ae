//! REST client for the Gemini `generateContent` endpoint.
//!
//! One [`GeminiApi`] is built at startup from a [`GeminiConfig`] and
//! shared (behind an `Arc`) by everything that talks to the model.

use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine as _};

use crate::backend::{GenerativeBackend, InlineImage};
use crate::config::GeminiConfig;
use crate::messages::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};

const API_KEY_HEADER: &str = "x-goog-api-key";
const JSON_MIME: &str = "application/json";
const IMAGE_MODALITY: &str = "IMAGE";

/// HTTP client for the Gemini API.
pub struct GeminiApi {
    client: reqwest::Client,
    config: GeminiConfig,
}

/// Errors from the Gemini REST layer.
#[derive(Debug, thiserror::Error)]
pub enum GeminiApiError {
    /// No API key was configured.
    #[error("Gemini API key is not configured (set GEMINI_API_KEY)")]
    MissingApiKey,

    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Gemini returned a non-2xx status code.
    #[error("Gemini API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A structured-output call returned no text at all.
    #[error("Gemini returned an empty response")]
    EmptyResponse,

    /// A structured-output call returned text that is not JSON.
    #[error("Gemini returned invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// An inline image payload was not valid base64.
    #[error("Gemini returned undecodable image data: {0}")]
    InvalidImageData(String),
}

impl GeminiApi {
    /// Create a client from configuration.
    ///
    /// Never fails on a missing API key; that is reported on first use.
    pub fn new(config: GeminiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to default HTTP client");
                reqwest::Client::new()
            });
        Self { client, config }
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Call `generateContent` on `model` with a single user turn.
    pub async fn generate_content(
        &self,
        model: &str,
        parts: Vec<Part>,
        generation_config: Option<GenerationConfig>,
    ) -> Result<GenerateContentResponse, GeminiApiError> {
        let api_key = self.api_key()?;
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
            generation_config,
        };

        tracing::debug!(model, "Calling Gemini generateContent");

        let response = self
            .client
            .post(self.endpoint(model))
            .header(API_KEY_HEADER, api_key)
            .json(&request)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    fn api_key(&self) -> Result<&str, GeminiApiError> {
        self.config
            .api_key
            .as_deref()
            .ok_or(GeminiApiError::MissingApiKey)
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }

    /// Ensure the response has a success status code, or return an
    /// [`GeminiApiError::ApiError`] with the status and body text.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GeminiApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(status = status.as_u16(), "Gemini request rejected");
            return Err(GeminiApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GeminiApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl GenerativeBackend for GeminiApi {
    async fn generate_text(&self, prompt: &str) -> Result<String, GeminiApiError> {
        let response = self
            .generate_content(&self.config.text_model, vec![Part::text(prompt)], None)
            .await?;
        Ok(response.text().unwrap_or_default())
    }

    async fn generate_json(
        &self,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> Result<serde_json::Value, GeminiApiError> {
        let generation_config = GenerationConfig {
            response_mime_type: Some(JSON_MIME.to_string()),
            response_schema: Some(schema.clone()),
            ..Default::default()
        };
        let response = self
            .generate_content(
                &self.config.text_model,
                vec![Part::text(prompt)],
                Some(generation_config),
            )
            .await?;

        let text = response.text().ok_or(GeminiApiError::EmptyResponse)?;
        Ok(serde_json::from_str(text.trim())?)
    }

    async fn generate_image(
        &self,
        prompt: &str,
        reference: Option<&InlineImage>,
    ) -> Result<Option<InlineImage>, GeminiApiError> {
        let mut parts = Vec::with_capacity(2);
        if let Some(image) = reference {
            parts.push(Part::inline(
                image.mime_type.clone(),
                BASE64_STANDARD.encode(&image.data),
            ));
        }
        parts.push(Part::text(prompt));

        let generation_config = GenerationConfig {
            response_modalities: Some(vec![IMAGE_MODALITY.to_string()]),
            ..Default::default()
        };
        let response = self
            .generate_content(&self.config.image_model, parts, Some(generation_config))
            .await?;

        let Some(inline) = response.first_inline_data() else {
            tracing::warn!(
                finish_reason = response.finish_reason().unwrap_or("unknown"),
                "Gemini image response contained no inline image",
            );
            return Ok(None);
        };

        let data = BASE64_STANDARD
            .decode(&inline.data)
            .map_err(|e| GeminiApiError::InvalidImageData(e.to_string()))?;

        Ok(Some(InlineImage {
            mime_type: inline.mime_type.clone(),
            data,
        }))
    }
}
