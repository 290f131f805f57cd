//! Integration tests for registration, login, and per-request credentials.

use axum::http::{Method, StatusCode, header};
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_register_with_basic_credentials() {
    let app = TestApp::new();
    app.register("alice", "s3cret").await;

    let response = app
        .send(Method::POST, "/login", Some(("alice", "s3cret")))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Login successful");
}

#[tokio::test]
async fn test_register_and_login_with_json_body() {
    let app = TestApp::new();
    let creds = json!({ "username": "carol", "password": "pw" });

    let response = app
        .send_json(Method::POST, "/register", None, creds.clone())
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let response = app.send_json(Method::POST, "/login", None, creds).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let app = TestApp::new();
    app.register("alice", "s3cret").await;

    let response = app
        .send(Method::POST, "/register", Some(("alice", "other")))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "DUPLICATE_USER");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new();
    app.register("alice", "s3cret").await;

    let wrong = app
        .send(Method::POST, "/login", Some(("alice", "nope")))
        .await;
    let unknown = app
        .send(Method::POST, "/login", Some(("mallory", "nope")))
        .await;

    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body, unknown.body);
    assert_eq!(
        wrong.headers.get(header::WWW_AUTHENTICATE).unwrap(),
        "Basic realm=\"FileVault\""
    );
}

#[tokio::test]
async fn test_protected_route_requires_credentials() {
    let app = TestApp::new();

    let response = app.send(Method::GET, "/files", None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.headers.contains_key(header::WWW_AUTHENTICATE));
    assert_eq!(response.body["error"], "INVALID_CREDENTIAL");
}

#[tokio::test]
async fn test_invalid_json_body_is_bad_request() {
    let app = TestApp::new();
    let response = app
        .send_json(Method::POST, "/register", None, json!({ "username": "" , "password": "x" }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
