use std::sync::Arc;

use flipbook_gemini::GenerativeBackend;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (browser clients).
    pub ws_manager: Arc<WsManager>,
    /// The one generative-model client, built at startup.
    pub backend: Arc<dyn GenerativeBackend>,
    /// Whether a model credential was present at startup.
    pub credential_configured: bool,
}
