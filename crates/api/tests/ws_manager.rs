//! Tests for the WebSocket connection manager and progress forwarding.

use std::sync::Arc;

use axum::extract::ws::Message;
use flipbook_api::ws::progress::ProgressReporter;
use flipbook_api::ws::WsManager;

fn text(message: Message) -> serde_json::Value {
    match message {
        Message::Text(body) => serde_json::from_str(body.as_str()).unwrap(),
        other => panic!("expected a text frame, got {other:?}"),
    }
}

#[tokio::test]
async fn add_and_remove_track_connection_count() {
    let manager = WsManager::new();
    let _rx1 = manager.add("a".into()).await;
    let _rx2 = manager.add("b".into()).await;
    assert_eq!(manager.connection_count().await, 2);

    manager.remove("a").await;
    assert_eq!(manager.connection_count().await, 1);

    // Removing an unknown id is a no-op.
    manager.remove("missing").await;
    assert_eq!(manager.connection_count().await, 1);
}

#[tokio::test]
async fn broadcast_reaches_every_connection() {
    let manager = WsManager::new();
    let mut rx1 = manager.add("a".into()).await;
    let mut rx2 = manager.add("b".into()).await;

    manager
        .broadcast_json(&serde_json::json!({ "type": "generation_progress", "message": "hi" }))
        .await;

    assert_eq!(text(rx1.recv().await.unwrap())["message"], "hi");
    assert_eq!(text(rx2.recv().await.unwrap())["message"], "hi");
}

#[tokio::test]
async fn shutdown_all_sends_close_and_clears() {
    let manager = WsManager::new();
    let mut rx = manager.add("a".into()).await;

    manager.shutdown_all().await;

    assert!(matches!(rx.recv().await, Some(Message::Close(None))));
    assert_eq!(manager.connection_count().await, 0);
}

#[tokio::test]
async fn progress_reporter_forwards_lines_in_order() {
    let manager = Arc::new(WsManager::new());
    let mut rx = manager.add("a".into()).await;

    let reporter = ProgressReporter::spawn(Arc::clone(&manager), "run-1".into());
    reporter.report("Generating frame 1 of 2...");
    reporter.report("Generating frame 2 of 2...");
    reporter.finish().await;

    let first = text(rx.recv().await.unwrap());
    assert_eq!(first["type"], "generation_progress");
    assert_eq!(first["run_id"], "run-1");
    assert_eq!(first["message"], "Generating frame 1 of 2...");

    let second = text(rx.recv().await.unwrap());
    assert_eq!(second["message"], "Generating frame 2 of 2...");
    assert!(rx.try_recv().is_err());
}
