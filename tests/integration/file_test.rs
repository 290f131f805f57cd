//! Integration tests for file operations and the access ledger.

use axum::http::{Method, StatusCode, header};
use serde_json::json;

use vault_entity::access::AccessAction;

use crate::helpers::TestApp;

const ALICE: (&str, &str) = ("alice", "alice-pw");
const BOB: (&str, &str) = ("bob", "bob-pw");

async fn app_with_users() -> TestApp {
    let app = TestApp::new();
    app.register(ALICE.0, ALICE.1).await;
    app.register(BOB.0, BOB.1).await;
    app
}

#[tokio::test]
async fn test_alice_file_lifecycle() {
    let app = app_with_users().await;

    let response = app.upload(ALICE, "notes.txt", b"hello").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "filename": "notes.txt" }));

    let response = app.send(Method::GET, "/files", Some(ALICE)).await;
    assert_eq!(response.body, json!({ "files": ["notes.txt"] }));

    let response = app
        .send(Method::GET, "/download/notes.txt", Some(ALICE))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.bytes, b"hello");
    assert_eq!(response.headers[header::CONTENT_TYPE], "text/plain");
    assert!(
        response.headers[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .contains("filename=\"notes.txt\"")
    );

    let response = app
        .send(Method::DELETE, "/delete/notes.txt", Some(ALICE))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "detail": "notes.txt deleted" }));

    let response = app.send(Method::GET, "/files", Some(ALICE)).await;
    assert_eq!(response.body, json!({ "files": [] }));

    let response = app
        .send(Method::GET, "/download/notes.txt", Some(ALICE))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.send(Method::GET, "/history", Some(ALICE)).await;
    let actions: Vec<&str> = response.body["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["action"].as_str().unwrap())
        .collect();
    assert_eq!(actions, vec!["delete", "download", "upload"]);
}

#[tokio::test]
async fn test_bob_cannot_reach_alice_file() {
    let app = app_with_users().await;
    app.upload(ALICE, "notes.txt", b"hello").await;

    let foreign = app
        .send(Method::GET, "/download/notes.txt", Some(BOB))
        .await;
    let missing = app
        .send(Method::GET, "/download/absent.txt", Some(BOB))
        .await;
    assert_eq!(foreign.status, StatusCode::NOT_FOUND);
    assert_eq!(foreign.body, missing.body);

    let response = app
        .send(Method::DELETE, "/delete/notes.txt", Some(BOB))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, missing.body);

    let bob = app.stores.identity.find_user("bob").await.unwrap().unwrap();
    assert!(app.stores.ledger.entries_for_user(bob.id).await.unwrap().is_empty());

    let alice = app.stores.identity.find_user("alice").await.unwrap().unwrap();
    let entries = app.stores.ledger.entries_for_user(alice.id).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, AccessAction::Upload);
}

#[tokio::test]
async fn test_listing_skips_files_without_bytes() {
    use vault_core::traits::BlobStore;

    let app = app_with_users().await;
    app.upload(ALICE, "kept.txt", b"1").await;
    app.upload(ALICE, "lost.txt", b"2").await;
    app.blobs.remove_bytes("lost.txt").await.unwrap();

    let response = app.send(Method::GET, "/files", Some(ALICE)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "files": ["kept.txt"] }));
}

#[tokio::test]
async fn test_upload_requires_file_field() {
    let app = app_with_users().await;

    let response = app
        .request(
            Method::POST,
            "/upload",
            Some(ALICE),
            Some("multipart/form-data; boundary=b".to_string()),
            b"--b\r\nContent-Disposition: form-data; name=\"other\"\r\n\r\nx\r\n--b--\r\n".to_vec(),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION");
}

#[tokio::test]
async fn test_upload_rejects_unsafe_filename() {
    let app = app_with_users().await;
    let response = app.upload(ALICE, "..", b"x").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.send(Method::GET, "/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["database"], true);
}
