//! Table of contents route
//!
//! `POST /api/toc` renders a plain-text table of contents from the
//! sections the user selected in the UI.

use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::{ApiError, Result};
use crate::state::AppState;
use crate::toc::{build_toc, TocSelection};

/// Create the toc router
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(generate_toc))
}

#[derive(Deserialize)]
pub struct TocRequest {
    pub sections: Vec<TocSelection>,
}

/// POST /api/toc
async fn generate_toc(Json(request): Json<TocRequest>) -> Result<impl IntoResponse> {
    if request.sections.is_empty() {
        return Err(ApiError::EmptySelection);
    }

    let mut sections = request.sections;
    sections.sort_by_key(|s| s.page);

    let body = build_toc(&sections, chrono::Utc::now());
    tracing::debug!(sections = sections.len(), "table of contents generated");

    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body))
}
