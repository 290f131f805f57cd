//! Auth handlers: register and login.
//!
//! Both accept HTTP Basic credentials or a JSON `{username, password}`
//! body. Login only verifies; no session or token is issued.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use validator::Validate;

use vault_auth::Credentials;
use vault_core::error::AppError;

use crate::dto::request::CredentialsRequest;
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::basic_credentials;
use crate::state::AppState;

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let credentials = read_credentials(&headers, &body)?;
    state.accounts.register(&credentials).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered".to_string(),
        }),
    ))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<MessageResponse>, ApiError> {
    let credentials = read_credentials(&headers, &body)?;
    state.accounts.login(&credentials).await?;

    Ok(Json(MessageResponse {
        message: "Login successful".to_string(),
    }))
}

/// Basic credentials take precedence; otherwise the body must be JSON.
fn read_credentials(headers: &HeaderMap, body: &[u8]) -> Result<Credentials, AppError> {
    if let Some(credentials) = basic_credentials(headers)? {
        return Ok(credentials);
    }
    if body.is_empty() {
        return Err(AppError::invalid_credential());
    }

    let req: CredentialsRequest = serde_json::from_slice(body)
        .map_err(|e| AppError::validation(format!("Invalid credentials body: {e}")))?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    Ok(Credentials::new(req.username, req.password))
}
