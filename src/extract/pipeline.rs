//! Extraction pipeline
//!
//! Orchestrates the two extraction passes for an uploaded package:
//! text layer first, then OCR when the yield is too low to mean the
//! document actually had a text layer. MuPDF work runs on blocking
//! tasks; progress is reported per page through the session tracker.

use std::sync::Arc;

use uuid::Uuid;

use super::ocr::OcrEngine;
use super::pdf::PdfTextSource;
use super::ExtractError;
use crate::classify::{ExtractionMethod, TextFragment};
use crate::progress::{ProcessingStatus, ProgressTracker};

/// Text-layer yield below this count triggers the OCR fallback.
pub const MIN_TEXT_FRAGMENTS: usize = 10;

/// Shortest OCR line kept by the noise filter (must also contain a letter)
const MIN_OCR_LINE_CHARS: usize = 6;

const POINTS_PER_INCH: f32 = 72.0;

/// PDF-to-fragments extraction service.
pub struct ExtractionPipeline {
    ocr: Option<Arc<dyn OcrEngine>>,
    ocr_dpi: u32,
    ocr_language: String,
}

impl ExtractionPipeline {
    pub fn new(ocr: Option<Arc<dyn OcrEngine>>, ocr_dpi: u32, ocr_language: String) -> Self {
        Self {
            ocr,
            ocr_dpi,
            ocr_language,
        }
    }

    /// Whether an OCR engine is compiled in and enabled.
    pub fn ocr_available(&self) -> bool {
        self.ocr.is_some()
    }

    pub fn ocr_engine(&self) -> Option<&Arc<dyn OcrEngine>> {
        self.ocr.as_ref()
    }

    /// Extract text fragments from raw PDF bytes.
    ///
    /// Returns [`ExtractError::NoText`] when neither pass yields anything;
    /// callers must report that distinctly from "no sections matched".
    pub async fn extract(
        &self,
        data: Vec<u8>,
        session_id: Uuid,
        progress: &ProgressTracker,
    ) -> Result<Vec<TextFragment>, ExtractError> {
        tracing::info!(session_id = %session_id, bytes = data.len(), "starting PDF text extraction");

        let source = tokio::task::spawn_blocking(move || PdfTextSource::from_bytes(data))
            .await
            .map_err(|e| ExtractError::Task(e.to_string()))??;
        let total_pages = source.page_count();
        tracing::info!(session_id = %session_id, pages = total_pages, "document opened");

        progress.update(session_id, 0, total_pages, ProcessingStatus::ExtractingText);

        let fragments = {
            let source = source.clone();
            let progress = progress.clone();
            tokio::task::spawn_blocking(move || {
                source.text_layer_fragments(|page| {
                    progress.update(
                        session_id,
                        page,
                        total_pages,
                        ProcessingStatus::ExtractingText,
                    );
                })
            })
            .await
            .map_err(|e| ExtractError::Task(e.to_string()))??
        };
        tracing::info!(
            session_id = %session_id,
            fragments = fragments.len(),
            "text layer extraction finished"
        );

        if fragments.len() < MIN_TEXT_FRAGMENTS {
            if let Some(engine) = &self.ocr {
                tracing::info!(
                    session_id = %session_id,
                    text_layer_yield = fragments.len(),
                    "low text yield, attempting OCR extraction"
                );

                let ocr_fragments = self
                    .ocr_pass(engine, &source, session_id, progress)
                    .await?;

                if !ocr_fragments.is_empty() {
                    tracing::info!(
                        session_id = %session_id,
                        fragments = ocr_fragments.len(),
                        "OCR extraction successful"
                    );
                    // OCR output replaces the text-layer result entirely.
                    return Ok(ocr_fragments);
                }
            }
        }

        if fragments.is_empty() {
            return Err(ExtractError::NoText);
        }
        Ok(fragments)
    }

    /// Render every page and run it through the OCR engine.
    ///
    /// Per-page failures are logged and skipped so one bad page cannot
    /// sink the whole document.
    async fn ocr_pass(
        &self,
        engine: &Arc<dyn OcrEngine>,
        source: &PdfTextSource,
        session_id: Uuid,
        progress: &ProgressTracker,
    ) -> Result<Vec<TextFragment>, ExtractError> {
        let total_pages = source.page_count();
        let scale = self.ocr_dpi as f32 / POINTS_PER_INCH;

        progress.update(session_id, 0, total_pages, ProcessingStatus::OcrProcessing);

        let mut fragments = Vec::new();
        for page_num in 1..=total_pages {
            progress.update(
                session_id,
                page_num,
                total_pages,
                ProcessingStatus::OcrPage(page_num as u32),
            );
            tracing::debug!(session_id = %session_id, page = page_num, total_pages, "running OCR on page");

            let rendered = {
                let source = source.clone();
                tokio::task::spawn_blocking(move || source.render_page_png(page_num, scale))
                    .await
                    .map_err(|e| ExtractError::Task(e.to_string()))?
            };
            let png = match rendered {
                Ok(png) => png,
                Err(e) => {
                    tracing::warn!(page = page_num, error = %e, "page render failed, skipping OCR");
                    continue;
                }
            };

            match engine.recognize(&png, Some(self.ocr_language.as_str())).await {
                Ok(text) => {
                    let before = fragments.len();
                    fragments.extend(ocr_lines(&text, page_num as u32));
                    let kept = fragments.len() - before;
                    if kept > 0 {
                        tracing::debug!(page = page_num, lines = kept, "OCR lines kept");
                    }
                }
                Err(e) => {
                    tracing::warn!(page = page_num, error = %e, "OCR failed on page");
                    continue;
                }
            }
        }

        Ok(fragments)
    }
}

/// OCR noise filter: keep lines long enough to mean something that
/// contain at least one letter.
fn ocr_lines(text: &str, page: u32) -> Vec<TextFragment> {
    text.lines()
        .map(str::trim)
        .filter(|line| {
            line.chars().count() >= MIN_OCR_LINE_CHARS && line.chars().any(|c| c.is_alphabetic())
        })
        .map(|line| TextFragment::new(line, page, ExtractionMethod::Ocr))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ocr::MockEngine;

    /// Build a minimal multi-page PDF with one text line per page.
    /// MuPDF's repair pass tolerates the approximate xref table.
    fn minimal_pdf(page_texts: &[&str]) -> Vec<u8> {
        let page_count = page_texts.len();
        let mut pdf = String::new();
        pdf.push_str("%PDF-1.4\n");
        pdf.push_str("1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

        let mut page_refs = String::new();
        for i in 0..page_count {
            if i > 0 {
                page_refs.push(' ');
            }
            page_refs.push_str(&format!("{} 0 R", 3 + i * 2));
        }
        pdf.push_str(&format!(
            "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
            page_refs, page_count
        ));

        let mut obj_num = 3;
        for text in page_texts {
            pdf.push_str(&format!(
                "{} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents {} 0 R /Resources << /Font << /F1 << /Type /Font /Subtype /Type1 /BaseFont /Helvetica >> >> >> >>\nendobj\n",
                obj_num,
                obj_num + 1
            ));

            let content = if text.is_empty() {
                String::new()
            } else {
                format!("BT /F1 12 Tf 72 720 Td ({}) Tj ET", text)
            };
            pdf.push_str(&format!(
                "{} 0 obj\n<< /Length {} >>\nstream\n{}\nendstream\nendobj\n",
                obj_num + 1,
                content.len(),
                content
            ));
            obj_num += 2;
        }

        pdf.push_str("trailer\n");
        pdf.push_str(&format!("<< /Size {} /Root 1 0 R >>\n", obj_num));
        pdf.push_str("%%EOF");
        pdf.into_bytes()
    }

    fn no_ocr_pipeline() -> ExtractionPipeline {
        ExtractionPipeline::new(None, 150, "eng".to_string())
    }

    #[test]
    fn test_ocr_lines_filters_noise() {
        let text = "MORTGAGE DEED OF TRUST\n|||---\nab12\nSigned before me this day\n";
        let fragments = ocr_lines(text, 2);

        // "|||---" has no letters, "ab12" is too short
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].text, "MORTGAGE DEED OF TRUST");
        assert_eq!(fragments[0].method, ExtractionMethod::Ocr);
        assert_eq!(fragments[1].text, "Signed before me this day");
    }

    #[tokio::test]
    async fn test_extract_reads_text_layer() {
        let data = minimal_pdf(&[
            "PROMISSORY NOTE",
            "Borrower promises to pay the principal sum",
        ]);
        let progress = ProgressTracker::new();
        let session_id = Uuid::new_v4();

        let fragments = no_ocr_pipeline()
            .extract(data, session_id, &progress)
            .await
            .expect("extraction should succeed");

        assert!(!fragments.is_empty());
        assert!(fragments.iter().all(|f| f.method == ExtractionMethod::TextLayer));
        assert!(fragments.iter().any(|f| f.text.contains("PROMISSORY NOTE")));
        assert_eq!(fragments[0].page, 1);
    }

    #[tokio::test]
    async fn test_extract_empty_document_is_no_text() {
        let data = minimal_pdf(&["", ""]);
        let progress = ProgressTracker::new();

        let result = no_ocr_pipeline()
            .extract(data, Uuid::new_v4(), &progress)
            .await;

        assert!(matches!(result, Err(ExtractError::NoText)));
    }

    #[tokio::test]
    async fn test_extract_invalid_bytes_is_parse_error() {
        let progress = ProgressTracker::new();
        let result = no_ocr_pipeline()
            .extract(b"not a pdf at all".to_vec(), Uuid::new_v4(), &progress)
            .await;

        assert!(matches!(
            result,
            Err(ExtractError::Parse(_)) | Err(ExtractError::NoText)
        ));
    }

    #[tokio::test]
    async fn test_ocr_fallback_replaces_low_yield() {
        // Two pages without a text layer; mock OCR supplies the text.
        let data = minimal_pdf(&["", ""]);
        let engine = Arc::new(MockEngine {
            text: "SETTLEMENT STATEMENT\nFinal closing figures for the loan\n".to_string(),
            available: true,
        });
        let pipeline = ExtractionPipeline::new(Some(engine), 150, "eng".to_string());
        let progress = ProgressTracker::new();

        let fragments = pipeline
            .extract(data, Uuid::new_v4(), &progress)
            .await
            .expect("OCR fallback should produce fragments");

        assert!(!fragments.is_empty());
        assert!(fragments.iter().all(|f| f.method == ExtractionMethod::Ocr));
        // Mock text shows up once per page
        assert_eq!(
            fragments
                .iter()
                .filter(|f| f.text == "SETTLEMENT STATEMENT")
                .count(),
            2
        );
    }

    #[tokio::test]
    async fn test_sufficient_text_layer_skips_ocr() {
        let lines: Vec<String> = (0..12)
            .map(|i| format!("Line number {} of the mortgage agreement", i))
            .collect();
        let line_refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let data = minimal_pdf(&line_refs);

        let engine = Arc::new(MockEngine {
            text: "SHOULD NOT APPEAR ANYWHERE".to_string(),
            available: true,
        });
        let pipeline = ExtractionPipeline::new(Some(engine), 150, "eng".to_string());
        let progress = ProgressTracker::new();

        let fragments = pipeline
            .extract(data, Uuid::new_v4(), &progress)
            .await
            .expect("extraction should succeed");

        assert!(fragments.len() >= MIN_TEXT_FRAGMENTS);
        assert!(fragments.iter().all(|f| f.method == ExtractionMethod::TextLayer));
    }
}
