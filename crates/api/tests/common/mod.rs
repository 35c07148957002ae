#![allow(dead_code)]

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use flipbook_gemini::{GeminiApiError, GenerativeBackend, InlineImage};
use http_body_util::BodyExt;
use image::{ImageFormat, Rgba, RgbaImage};
use tower::ServiceExt;

use flipbook_api::config::ServerConfig;
use flipbook_api::router::build_app_router;
use flipbook_api::state::AppState;
use flipbook_api::ws::WsManager;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout, an 8-frame cap and a 2 MiB per-frame
/// export budget.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_frames: 8,
        max_frame_bytes: 2 * 1024 * 1024,
    }
}

// ---------------------------------------------------------------------------
// Fake generative backend
// ---------------------------------------------------------------------------

/// Scripted backend. Image call `n` (1-based) returns a 4x4 PNG filled
/// with gray level `n`.
#[derive(Default)]
pub struct FakeBackend {
    pub text_reply: Option<String>,
    /// Image call number that fails with a 503.
    pub fail_image_at: Option<usize>,
    pub missing_key: bool,
    pub image_calls: AtomicUsize,
    pub text_calls: AtomicUsize,
}

impl FakeBackend {
    pub fn remote_call_count(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst) + self.text_calls.load(Ordering::SeqCst)
    }
}

/// Encode a small solid PNG.
pub fn png_bytes(level: u8) -> Vec<u8> {
    let img = RgbaImage::from_pixel(4, 4, Rgba([level, level, level, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

/// Encode a `size`x`size` PNG of pseudo-random pixels drawn from a fixed
/// 256-colour palette. Such images barely compress, so a few of them make
/// a multi-megabyte request body.
pub fn noisy_png_bytes(size: u32, seed: u32) -> Vec<u8> {
    let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
    let img = RgbaImage::from_fn(size, size, |_, _| {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let i = (state >> 24) as u8;
        Rgba([i, i.wrapping_mul(7), i.wrapping_mul(13), 255])
    });
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

#[async_trait]
impl GenerativeBackend for FakeBackend {
    async fn generate_text(&self, _prompt: &str) -> Result<String, GeminiApiError> {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        if self.missing_key {
            return Err(GeminiApiError::MissingApiKey);
        }
        self.text_reply.clone().ok_or(GeminiApiError::EmptyResponse)
    }

    async fn generate_json(
        &self,
        _prompt: &str,
        _schema: &serde_json::Value,
    ) -> Result<serde_json::Value, GeminiApiError> {
        Err(GeminiApiError::EmptyResponse)
    }

    async fn generate_image(
        &self,
        _prompt: &str,
        _reference: Option<&InlineImage>,
    ) -> Result<Option<InlineImage>, GeminiApiError> {
        let n = self.image_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.missing_key {
            return Err(GeminiApiError::MissingApiKey);
        }
        if self.fail_image_at == Some(n) {
            return Err(GeminiApiError::ApiError {
                status: 503,
                body: "model overloaded".to_string(),
            });
        }
        Ok(Some(InlineImage {
            mime_type: "image/png".to_string(),
            data: png_bytes(n as u8 * 20),
        }))
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build the full application router around `backend`.
///
/// Uses [`build_app_router`] so integration tests exercise the same
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery)
/// that production uses.
pub fn build_test_app(backend: Arc<FakeBackend>) -> Router {
    build_test_app_with(backend, Arc::new(WsManager::new()))
}

pub fn build_test_app_with(backend: Arc<FakeBackend>, ws_manager: Arc<WsManager>) -> Router {
    let config = test_config();
    let state = AppState {
        config: Arc::new(config.clone()),
        ws_manager,
        credential_configured: !backend.missing_key,
        backend,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
