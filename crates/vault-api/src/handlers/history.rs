//! Access history handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{HistoryEntry, HistoryResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /history
pub async fn history(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<HistoryResponse>, ApiError> {
    let entries = state.gateway.history(auth.username()).await?;
    Ok(Json(HistoryResponse {
        entries: entries.into_iter().map(HistoryEntry::from).collect(),
    }))
}
