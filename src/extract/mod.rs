//! PDF text extraction
//!
//! Primary extraction reads the PDF text layer page by page. Scanned
//! packages with a low text yield fall back to OCR. Both paths produce
//! [`crate::classify::TextFragment`]s for the classifier.

mod ocr;
mod pdf;
mod pipeline;

pub use ocr::{engine_from_config, OcrEngine, OcrError};
#[cfg(feature = "ocr-tesseract")]
pub use ocr::TesseractEngine;
pub use pdf::PdfTextSource;
pub use pipeline::{ExtractionPipeline, MIN_TEXT_FRAGMENTS};

use thiserror::Error;

/// Extraction error type
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Failed to open or parse the PDF
    #[error("Parse error: {0}")]
    Parse(String),

    /// Failed to render a page for OCR
    #[error("Render error: {0}")]
    Render(String),

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// OCR backend failure
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Neither the text layer nor OCR produced any usable text
    #[error("No text could be extracted from the document")]
    NoText,

    /// Blocking task failure
    #[error("Task error: {0}")]
    Task(String),
}

impl From<mupdf::Error> for ExtractError {
    fn from(err: mupdf::Error) -> Self {
        ExtractError::Parse(err.to_string())
    }
}
