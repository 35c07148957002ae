/// Default REST base URL (API version included).
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default model for refinement and storyboard planning.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
/// Default model for frame generation.
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
/// Default per-request timeout. Image calls routinely take tens of seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Gemini client configuration loaded from environment variables.
///
/// A missing API key is not an error here: it surfaces as
/// [`GeminiApiError::MissingApiKey`](crate::GeminiApiError::MissingApiKey)
/// on the first remote call.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
    pub request_timeout_secs: u64,
}

impl GeminiConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                                            |
    /// |-------------------------------|----------------------------------------------------|
    /// | `GEMINI_API_KEY` / `API_KEY`  | --                                                 |
    /// | `GEMINI_BASE_URL`             | `https://generativelanguage.googleapis.com/v1beta` |
    /// | `GEMINI_TEXT_MODEL`           | `gemini-2.5-flash`                                 |
    /// | `GEMINI_IMAGE_MODEL`          | `gemini-2.5-flash-image`                           |
    /// | `GEMINI_REQUEST_TIMEOUT_SECS` | `120`                                              |
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let request_timeout_secs = std::env::var("GEMINI_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        Self {
            api_key,
            base_url: std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            text_model: std::env::var("GEMINI_TEXT_MODEL")
                .unwrap_or_else(|_| DEFAULT_TEXT_MODEL.into()),
            image_model: std::env::var("GEMINI_IMAGE_MODEL")
                .unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.into()),
            request_timeout_secs,
        }
    }

    /// Configuration with defaults and the given key, used by tests and
    /// callers that manage credentials themselves.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}
