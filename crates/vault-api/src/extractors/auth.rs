//! `AuthUser` extractor: verifies HTTP Basic credentials on every request.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::headers::authorization::Basic;
use axum_extra::headers::{Authorization, HeaderMapExt};

use vault_auth::Credentials;
use vault_core::error::AppError;
use vault_entity::user::User;

use crate::error::ApiError;
use crate::state::AppState;

/// The user whose credentials accompanied the request.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    /// The authenticated username.
    pub fn username(&self) -> &str {
        &self.0.username
    }
}

impl std::ops::Deref for AuthUser {
    type Target = User;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Decode Basic credentials from the `Authorization` header.
///
/// Returns `Ok(None)` when the header is absent, and `InvalidCredential`
/// when it is present but not well-formed Basic credentials.
pub fn basic_credentials(headers: &HeaderMap) -> Result<Option<Credentials>, AppError> {
    if !headers.contains_key(AUTHORIZATION) {
        return Ok(None);
    }
    let auth = headers
        .typed_get::<Authorization<Basic>>()
        .ok_or_else(AppError::invalid_credential)?;
    Ok(Some(Credentials::new(auth.username(), auth.password())))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let credentials =
            basic_credentials(&parts.headers)?.ok_or_else(AppError::invalid_credential)?;
        let user = state.verifier.authenticate(&credentials).await?;
        Ok(AuthUser(user))
    }
}
