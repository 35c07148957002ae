//! Bridge between the synchronous pipeline progress callback and the
//! WebSocket broadcast feed.

use std::sync::Arc;

use flipbook_core::progress::MSG_TYPE_GENERATION_PROGRESS;
use serde_json::json;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::ws::manager::WsManager;

/// Forwards progress lines for one generation run to every connected
/// client as `{ "type": "generation_progress", "run_id", "message" }`.
///
/// Lines are queued on an unbounded channel so the pipeline callback
/// never blocks. The forwarding task ends once the reporter is dropped
/// or [`ProgressReporter::finish`] is awaited.
pub struct ProgressReporter {
    tx: mpsc::UnboundedSender<String>,
    task: JoinHandle<()>,
}

impl ProgressReporter {
    /// Spawn the forwarding task for `run_id`.
    pub fn spawn(ws_manager: Arc<WsManager>, run_id: String) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();

        let task = tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                tracing::debug!(run_id = %run_id, message = %message, "Generation progress");
                ws_manager
                    .broadcast_json(&json!({
                        "type": MSG_TYPE_GENERATION_PROGRESS,
                        "run_id": run_id,
                        "message": message,
                    }))
                    .await;
            }
        });

        Self { tx, task }
    }

    /// Queue one progress line. Never blocks.
    pub fn report(&self, message: &str) {
        let _ = self.tx.send(message.to_string());
    }

    /// Close the channel and wait until every queued line is broadcast.
    pub async fn finish(self) {
        drop(self.tx);
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "Progress forwarding task failed");
        }
    }
}
