//! HTTP-level integration tests for prompt refinement.

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, post_json, FakeBackend};
use serde_json::json;

#[tokio::test]
async fn refine_returns_trimmed_paragraph() {
    let backend = Arc::new(FakeBackend {
        text_reply: Some("\nA red ball rests on a wooden floor.\n".into()),
        ..Default::default()
    });
    let app = common::build_test_app(Arc::clone(&backend));

    let response = post_json(
        app,
        "/api/v1/prompts/refine",
        json!({ "prompt": "a ball bouncing" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["prompt"], "A red ball rests on a wooden floor.");
    assert_eq!(backend.text_calls.load(Ordering::SeqCst), 1);
    assert_eq!(backend.image_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn refine_rejects_blank_prompt() {
    let backend = Arc::new(FakeBackend::default());
    let app = common::build_test_app(Arc::clone(&backend));

    let response = post_json(app, "/api/v1/prompts/refine", json!({ "prompt": "" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(backend.remote_call_count(), 0);
}

#[tokio::test]
async fn refine_failure_is_an_upstream_error() {
    // No scripted reply: the fake reports an empty response.
    let app = common::build_test_app(Arc::new(FakeBackend::default()));

    let response = post_json(
        app,
        "/api/v1/prompts/refine",
        json!({ "prompt": "a ball bouncing" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Prompt enhancement failed"));
}
