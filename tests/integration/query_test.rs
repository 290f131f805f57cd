//! Integration tests for the question answering endpoint.

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::helpers::TestApp;

const ALICE: (&str, &str) = ("alice", "alice-pw");

#[tokio::test]
async fn test_chatbot_uses_selected_files() {
    let app = TestApp::new();
    app.register(ALICE.0, ALICE.1).await;
    app.upload(ALICE, "notes.txt", b"the meeting is at noon").await;
    app.upload(ALICE, "other.txt", b"unrelated").await;

    let response = app
        .send_json(
            Method::POST,
            "/chatbot",
            Some(ALICE),
            json!({ "query": "when is the meeting?", "files": ["notes.txt"] }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "response": "stub answer" }));

    let prompts = app.completion.prompts.lock().await;
    let prompt = &prompts.last().unwrap()[1].content;
    assert!(prompt.contains("the meeting is at noon"));
    assert!(!prompt.contains("unrelated"));
    assert!(prompt.contains("when is the meeting?"));
}

#[tokio::test]
async fn test_chatbot_rejects_foreign_file() {
    let app = TestApp::new();
    app.register(ALICE.0, ALICE.1).await;
    app.register("bob", "bob-pw").await;
    app.upload(("bob", "bob-pw"), "bob.txt", b"private").await;

    let response = app
        .send_json(
            Method::POST,
            "/chatbot",
            Some(ALICE),
            json!({ "query": "what?", "files": ["bob.txt"] }),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(app.completion.prompts.lock().await.is_empty());
}

#[tokio::test]
async fn test_chatbot_requires_query() {
    let app = TestApp::new();
    app.register(ALICE.0, ALICE.1).await;

    let response = app
        .send_json(Method::POST, "/chatbot", Some(ALICE), json!({ "query": "" }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
