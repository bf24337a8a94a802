//! API error responses
//!
//! One error enum for the HTTP surface, rendered as `{ error, code }`
//! JSON bodies. Extraction failures map here; notably "the PDF had no
//! extractable text" (a 400 with its own code) is kept distinct from
//! "no sections matched" (a normal 200 with an empty list).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::extract::ExtractError;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("No file uploaded")]
    NoFile,

    #[error("No file selected")]
    NoFileName,

    #[error("Only PDF files are supported")]
    UnsupportedFileType(String),

    #[error("File is empty")]
    EmptyFile,

    #[error("Could not extract text from PDF. The file may be corrupted or contain only images without readable text.")]
    NoTextExtracted,

    #[error("Session not found")]
    SessionNotFound(String),

    #[error("Failed to read upload: {0}")]
    InvalidMultipart(String),

    #[error("No sections selected")]
    EmptySelection,

    #[error("Document processing error: {0}")]
    Extraction(ExtractError),
}

impl From<ExtractError> for ApiError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::NoText => ApiError::NoTextExtracted,
            other => ApiError::Extraction(other),
        }
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NoFile
            | Self::NoFileName
            | Self::UnsupportedFileType(_)
            | Self::EmptyFile
            | Self::NoTextExtracted
            | Self::InvalidMultipart(_)
            | Self::EmptySelection => StatusCode::BAD_REQUEST,
            Self::SessionNotFound(_) => StatusCode::NOT_FOUND,
            Self::Extraction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = match &self {
            Self::NoFile => "NO_FILE_UPLOADED",
            Self::NoFileName => "NO_FILE_SELECTED",
            Self::UnsupportedFileType(_) => "INVALID_FILE_TYPE",
            Self::EmptyFile => "EMPTY_FILE",
            Self::NoTextExtracted => "NO_TEXT_EXTRACTED",
            Self::SessionNotFound(_) => "SESSION_NOT_FOUND",
            Self::InvalidMultipart(_) => "INVALID_UPLOAD",
            Self::EmptySelection => "EMPTY_SELECTION",
            Self::Extraction(_) => "EXTRACTION_FAILED",
        };

        match &self {
            Self::UnsupportedFileType(name) => {
                tracing::warn!(file_name = %name, "rejected non-PDF upload");
            }
            Self::SessionNotFound(id) => {
                tracing::debug!(session_id = %id, "progress poll for unknown session");
            }
            Self::Extraction(err) => {
                tracing::error!(error = %err, "document processing failed");
            }
            _ => {}
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        });

        (status, body).into_response()
    }
}
