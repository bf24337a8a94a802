//! Document analysis route
//!
//! `POST /api/analyze` takes a multipart PDF upload, runs the extraction
//! pipeline and the section classifier, and returns the ordered section
//! list along with session and capability metadata.

use std::collections::HashSet;

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::classify::{classify, IdentifiedSection};
use crate::error::{ApiError, Result};
use crate::progress::ProcessingStatus;
use crate::state::AppState;

/// Create the analyze router
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", post(analyze_document))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub session_id: Uuid,
    pub sections: Vec<IdentifiedSection>,
    /// Distinct pages that produced text
    pub total_pages: usize,
    pub total_text_items: usize,
    pub processing_method: &'static str,
    pub ocr_available: bool,
}

/// POST /api/analyze
async fn analyze_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>> {
    let session_id = Uuid::new_v4();

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidMultipart(e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::InvalidMultipart(e.to_string()))?;
            upload = Some((filename, data));
            break;
        }
    }

    let (filename, data) = upload.ok_or(ApiError::NoFile)?;
    if filename.is_empty() {
        return Err(ApiError::NoFileName);
    }
    if !is_pdf_filename(&filename) {
        return Err(ApiError::UnsupportedFileType(filename));
    }
    if data.is_empty() {
        return Err(ApiError::EmptyFile);
    }

    tracing::info!(
        session_id = %session_id,
        file_name = %filename,
        size = data.len(),
        sha256 = %hex::encode(Sha256::digest(&data)),
        "processing uploaded package"
    );

    state
        .progress()
        .update(session_id, 0, 1, ProcessingStatus::Starting);

    let fragments = state
        .extractor()
        .extract(data.to_vec(), session_id, state.progress())
        .await?;

    state
        .progress()
        .update(session_id, 1, 1, ProcessingStatus::Analyzing);

    let total_pages = fragments.iter().map(|f| f.page).collect::<HashSet<_>>().len();
    let total_text_items = fragments.len();
    let sections = classify(&fragments);

    state
        .progress()
        .update(session_id, 1, 1, ProcessingStatus::Completed);

    tracing::info!(
        session_id = %session_id,
        sections = sections.len(),
        pages = total_pages,
        text_items = total_text_items,
        "analysis complete"
    );

    Ok(Json(AnalyzeResponse {
        session_id,
        sections,
        total_pages,
        total_text_items,
        processing_method: "local",
        ocr_available: state.extractor().ocr_available(),
    }))
}

fn is_pdf_filename(name: &str) -> bool {
    name.to_lowercase().ends_with(".pdf")
}
