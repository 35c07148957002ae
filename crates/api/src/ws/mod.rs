//! WebSocket infrastructure for the progress feed.
//!
//! Provides connection management, heartbeat monitoring, progress
//! forwarding, and the HTTP upgrade handler used by Axum routes.

mod handler;
mod heartbeat;
pub mod manager;
pub mod progress;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
