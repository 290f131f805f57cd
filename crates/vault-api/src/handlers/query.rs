//! Question answering handler.

use axum::Json;
use axum::extract::State;

use crate::dto::request::QueryRequest;
use crate::dto::response::QueryResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /chatbot
pub async fn chatbot(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    let response = state
        .query
        .ask(auth.username(), &req.query, req.files.as_deref())
        .await?;
    Ok(Json(QueryResponse { response }))
}
