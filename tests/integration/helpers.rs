//! Shared test helpers for integration tests.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use axum_extra::headers::{Authorization, HeaderMapExt};
use serde_json::Value;
use tokio::sync::Mutex;
use tower::ServiceExt;

use vault_api::{AppState, build_app};
use vault_core::config::AppConfig;
use vault_core::result::AppResult;
use vault_core::traits::{ChatMessage, CompletionClient};
use vault_database::Stores;
use vault_storage::MemoryBlobStore;

const BOUNDARY: &str = "vault-test-boundary";

/// Completion client that records prompts and answers with a fixed text.
#[derive(Debug, Default)]
pub struct StubCompletion {
    /// Every message list received, in order.
    pub prompts: Mutex<Vec<Vec<ChatMessage>>>,
}

#[async_trait]
impl CompletionClient for StubCompletion {
    async fn complete(&self, messages: &[ChatMessage]) -> AppResult<String> {
        self.prompts.lock().await.push(messages.to_vec());
        Ok("stub answer".to_string())
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Metadata stores behind the router
    pub stores: Stores,
    /// Blob store behind the router
    pub blobs: MemoryBlobStore,
    /// LLM stand-in
    pub completion: Arc<StubCompletion>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body
    pub bytes: Vec<u8>,
    /// Parsed JSON body, `Null` if not JSON
    pub body: Value,
}

impl TestApp {
    /// Create a new test application with empty in-memory stores
    pub fn new() -> Self {
        let stores = Stores::memory();
        let blobs = MemoryBlobStore::new();
        let completion = Arc::new(StubCompletion::default());

        let state = AppState::new(
            AppConfig::default(),
            stores.clone(),
            Arc::new(blobs.clone()),
            completion.clone(),
        )
        .expect("Failed to build state");

        Self {
            router: build_app(state),
            stores,
            blobs,
            completion,
        }
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        auth: Option<(&str, &str)>,
        content_type: Option<String>,
        body: Vec<u8>,
    ) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);
        if let Some(content_type) = content_type {
            req = req.header(header::CONTENT_TYPE, content_type);
        }
        let mut req = req.body(Body::from(body)).expect("Failed to build request");
        if let Some((username, password)) = auth {
            req.headers_mut()
                .typed_insert(Authorization::basic(username, password));
        }

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body")
            .to_vec();
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            bytes,
            body,
        }
    }

    /// Request with no body
    pub async fn send(&self, method: Method, path: &str, auth: Option<(&str, &str)>) -> TestResponse {
        self.request(method, path, auth, None, Vec::new()).await
    }

    /// Request with a JSON body
    pub async fn send_json(
        &self,
        method: Method,
        path: &str,
        auth: Option<(&str, &str)>,
        body: Value,
    ) -> TestResponse {
        let body = serde_json::to_vec(&body).expect("Failed to serialize body");
        self.request(
            method,
            path,
            auth,
            Some("application/json".to_string()),
            body,
        )
        .await
    }

    /// Register via Basic credentials and assert success
    pub async fn register(&self, username: &str, password: &str) {
        let response = self
            .send(Method::POST, "/register", Some((username, password)))
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Register failed: {:?}",
            response.body
        );
    }

    /// Upload `data` as multipart field `file` named `filename`
    pub async fn upload(&self, auth: (&str, &str), filename: &str, data: &[u8]) -> TestResponse {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        self.request(
            Method::POST,
            "/upload",
            Some(auth),
            Some(format!("multipart/form-data; boundary={BOUNDARY}")),
            body,
        )
        .await
    }
}
