//! PDF text source
//!
//! Thin wrapper over MuPDF. MuPDF documents are not thread-safe, so the
//! wrapper keeps only the raw bytes and opens a fresh document for each
//! operation; the wrapper itself is freely cloneable and shareable.

use std::sync::Arc;

use mupdf::{Colorspace, Document, Matrix};

use super::ExtractError;
use crate::classify::{ExtractionMethod, TextFragment};

const PDF_MIME: &str = "application/pdf";

/// Shortest trimmed line kept from the text layer
const MIN_LINE_CHARS: usize = 4;

/// A PDF held as bytes, with text and render access per page.
#[derive(Clone)]
pub struct PdfTextSource {
    data: Arc<Vec<u8>>,
    page_count: usize,
}

impl PdfTextSource {
    /// Validate the document and cache its page count.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, ExtractError> {
        let doc = Document::from_bytes(&data, PDF_MIME)?;
        let page_count = doc.page_count()? as usize;

        Ok(Self {
            data: Arc::new(data),
            page_count,
        })
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    fn open(&self) -> Result<Document, ExtractError> {
        Document::from_bytes(&self.data, PDF_MIME).map_err(Into::into)
    }

    /// Extract trimmed text-layer lines from every page.
    ///
    /// `on_page` is invoked with the 1-based page number before each page
    /// is read, for progress reporting. Pages that fail to load or read
    /// are skipped with a warning; a per-page failure is not fatal.
    pub fn text_layer_fragments<F>(&self, mut on_page: F) -> Result<Vec<TextFragment>, ExtractError>
    where
        F: FnMut(usize),
    {
        let doc = self.open()?;
        let mut fragments = Vec::new();

        for page_num in 1..=self.page_count {
            on_page(page_num);

            let page = match doc.load_page((page_num - 1) as i32) {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!(page = page_num, error = %e, "failed to load page, skipping");
                    continue;
                }
            };

            let text = match page.to_text() {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(page = page_num, error = %e, "text extraction failed on page, skipping");
                    continue;
                }
            };

            let before = fragments.len();
            fragments.extend(text_layer_lines(&text, page_num as u32));
            tracing::debug!(
                page = page_num,
                lines = fragments.len() - before,
                "extracted text layer lines"
            );
        }

        Ok(fragments)
    }

    /// Render one page to PNG bytes at the given scale, for OCR input.
    pub fn render_page_png(&self, page_num: usize, scale: f32) -> Result<Vec<u8>, ExtractError> {
        let doc = self.open()?;
        let page = doc
            .load_page((page_num - 1) as i32)
            .map_err(|e| ExtractError::Render(e.to_string()))?;

        let matrix = Matrix::new_scale(scale, scale);
        let colorspace = Colorspace::device_rgb();
        let pixmap = page
            .to_pixmap(&matrix, &colorspace, true, false)
            .map_err(|e| ExtractError::Render(e.to_string()))?;

        encode_pixmap_png(&pixmap)
    }
}

/// Split page text into classifier fragments, dropping very short lines.
fn text_layer_lines(text: &str, page: u32) -> Vec<TextFragment> {
    text.lines()
        .map(str::trim)
        .filter(|line| line.chars().count() >= MIN_LINE_CHARS)
        .map(|line| TextFragment::new(line, page, ExtractionMethod::TextLayer))
        .collect()
}

/// Encode a MuPDF pixmap as PNG.
fn encode_pixmap_png(pixmap: &mupdf::Pixmap) -> Result<Vec<u8>, ExtractError> {
    let width = pixmap.width() as u32;
    let height = pixmap.height() as u32;
    let samples = pixmap.samples();
    let n = pixmap.n() as usize; // components per pixel

    let mut rgba_buffer = Vec::with_capacity((width * height * 4) as usize);

    for y in 0..height as usize {
        for x in 0..width as usize {
            let offset = (y * width as usize + x) * n;
            let r = samples.get(offset).copied().unwrap_or(0);
            let g = samples.get(offset + 1).copied().unwrap_or(0);
            let b = samples.get(offset + 2).copied().unwrap_or(0);
            let a = if n >= 4 {
                samples.get(offset + 3).copied().unwrap_or(255)
            } else {
                255
            };
            rgba_buffer.extend_from_slice(&[r, g, b, a]);
        }
    }

    let img = image::RgbaImage::from_raw(width, height, rgba_buffer)
        .ok_or_else(|| ExtractError::Image("Failed to create image buffer".to_string()))?;

    let mut output = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut output), image::ImageFormat::Png)
        .map_err(|e| ExtractError::Image(e.to_string()))?;

    Ok(output)
}
