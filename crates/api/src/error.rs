use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use flipbook_core::error::CoreError;
use flipbook_pipeline::PipelineError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`PipelineError`] and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce `{ "error", "code" }` JSON bodies
/// where `error` is the single display string shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level validation error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failed refinement, generation or export run.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request body exceeded the route's size limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Body extraction failures keep the `{ error, code }` envelope.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(rejection.body_text())
        } else {
            AppError::BadRequest(rejection.body_text())
        }
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Pipeline(err) => classify_pipeline_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::PayloadTooLarge(msg) => {
                tracing::warn!(error = %msg, "Request body rejected as too large");
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg.clone())
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a core error into an HTTP status, error code, and message.
///
/// Input problems map to 400. Shape errors in model output (storyboard,
/// frame count) are the remote service misbehaving and map to 502.
fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::Validation(_) | CoreError::MalformedDataUrl(_) => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
        }
        CoreError::StoryboardLengthMismatch { .. }
        | CoreError::MissingFrameDescription { .. }
        | CoreError::FrameCountMismatch { .. } => {
            tracing::warn!(error = %err, "Model output failed validation");
            (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", err.to_string())
        }
    }
}

fn classify_pipeline_error(err: &PipelineError) -> (StatusCode, &'static str, String) {
    match err {
        PipelineError::Core(core) => classify_core_error(core),
        PipelineError::Configuration(msg) => {
            tracing::error!(error = %msg, "Generation backend is not configured");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIGURATION_ERROR",
                err.to_string(),
            )
        }
        PipelineError::FrameLoad { .. } => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
        }
        PipelineError::Encoding(msg) => {
            tracing::error!(error = %msg, "GIF encoding failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                err.to_string(),
            )
        }
        upstream => {
            debug_assert!(upstream.is_upstream());
            tracing::warn!(error = %upstream, "Generation run failed");
            (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", upstream.to_string())
        }
    }
}
