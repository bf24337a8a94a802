//! Progress polling route
//!
//! `GET /api/progress/:session_id` returns the latest snapshot for an
//! analysis session, 404 when the session is unknown.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::progress::ProgressSnapshot;
use crate::state::AppState;

/// Create the progress router
pub fn router() -> Router<AppState> {
    Router::new().route("/:session_id", get(get_progress))
}

/// GET /api/progress/:session_id
async fn get_progress(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ProgressSnapshot>> {
    let id = Uuid::parse_str(&session_id)
        .map_err(|_| ApiError::SessionNotFound(session_id.clone()))?;

    state
        .progress()
        .get(&id)
        .map(Json)
        .ok_or(ApiError::SessionNotFound(session_id))
}
