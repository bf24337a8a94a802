//! Route modules for the Mortgage Package Analyzer

pub mod analyze;
pub mod progress;
pub mod toc;

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Embedded single-page upload UI
const INDEX_HTML: &str = include_str!("../../assets/index.html");

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    ocr_available: bool,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        ocr_available: state.extractor().ocr_available(),
    })
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Compose the full application router.
pub fn app(state: AppState) -> Router {
    let max_upload_bytes = state.config().upload.max_size_bytes();

    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health_check))
        .nest("/api/analyze", analyze::router(max_upload_bytes))
        .nest("/api/progress", progress::router())
        .nest("/api/toc", toc::router())
        .with_state(state)
}
