use flipbook_core::generation::DEFAULT_MAX_FRAMES;

/// Default per-frame image budget for export uploads (8 MiB decoded).
pub const DEFAULT_MAX_FRAME_BYTES: usize = 8 * 1024 * 1024;

/// Allowance for the JSON envelope around the frame list.
const EXPORT_ENVELOPE_BYTES: usize = 64 * 1024;

/// Data URL prefix and JSON quoting around each encoded frame.
const PER_FRAME_OVERHEAD_BYTES: usize = 64;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. The Gemini
/// client is configured separately through
/// [`GeminiConfig`](flipbook_gemini::GeminiConfig).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `600`). A full run makes
    /// one image call per frame, so this is generous.
    pub request_timeout_secs: u64,
    /// Upper bound on frames per generation request (default: `24`).
    pub max_frames: usize,
    /// Largest decoded image accepted per frame on export (default: 8 MiB).
    pub max_frame_bytes: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `600`                      |
    /// | `MAX_FRAMES`           | `24`                       |
    /// | `MAX_FRAME_BYTES`      | `8388608`                  |
    ///
    /// Unparseable numeric values fall back to their defaults with a warning.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            host,
            port: env_or("PORT", 3000),
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 600),
            max_frames: env_or("MAX_FRAMES", DEFAULT_MAX_FRAMES),
            max_frame_bytes: env_or("MAX_FRAME_BYTES", DEFAULT_MAX_FRAME_BYTES),
        }
    }

    /// Request body limit for `POST /animations/export`: `max_frames`
    /// base64-encoded frames of up to `max_frame_bytes` each, plus the
    /// JSON envelope.
    pub fn export_body_limit(&self) -> usize {
        let encoded_frame = self.max_frame_bytes.div_ceil(3).saturating_mul(4);
        (encoded_frame + PER_FRAME_OVERHEAD_BYTES)
            .saturating_mul(self.max_frames.max(1))
            .saturating_add(EXPORT_ENVELOPE_BYTES)
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Ignoring invalid numeric setting");
            default
        }),
        Err(_) => default,
    }
}
