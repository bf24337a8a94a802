//! OCR engines
//!
//! Fallback text recognition for scanned mortgage packages. Engines are
//! behind a trait so the pipeline can run with whatever backend is
//! compiled in; the Tesseract backend shells out to the local `tesseract`
//! binary and is gated behind the `ocr-tesseract` cargo feature.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::OcrConfig;

/// OCR error types
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR engine not available: {0}")]
    EngineNotAvailable(String),

    #[error("OCR processing failed: {0}")]
    Processing(String),
}

/// An OCR backend that turns a page image into plain text.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Engine name for logs and capability reporting
    fn name(&self) -> &'static str;

    /// Check whether the backend can actually run on this machine
    async fn is_available(&self) -> bool;

    /// Recognize text in an encoded image (PNG)
    async fn recognize(&self, image_data: &[u8], language: Option<&str>)
        -> Result<String, OcrError>;
}

/// Build the configured OCR engine, if any.
pub fn engine_from_config(config: &OcrConfig) -> Option<Arc<dyn OcrEngine>> {
    if !config.enabled {
        return None;
    }

    #[cfg(feature = "ocr-tesseract")]
    {
        Some(Arc::new(TesseractEngine::new(&config.language)))
    }

    #[cfg(not(feature = "ocr-tesseract"))]
    {
        tracing::warn!(
            "OCR enabled in config but no engine compiled in; build with the ocr-tesseract feature"
        );
        None
    }
}

/// Tesseract OCR engine (subprocess)
#[cfg(feature = "ocr-tesseract")]
pub struct TesseractEngine {
    /// Default language passed to `-l` when the caller gives none
    default_language: String,
}

#[cfg(feature = "ocr-tesseract")]
impl TesseractEngine {
    pub fn new(default_language: &str) -> Self {
        Self {
            default_language: default_language.to_string(),
        }
    }
}

#[cfg(feature = "ocr-tesseract")]
#[async_trait]
impl OcrEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    async fn is_available(&self) -> bool {
        std::process::Command::new("tesseract")
            .arg("--version")
            .output()
            .is_ok()
    }

    async fn recognize(
        &self,
        image_data: &[u8],
        language: Option<&str>,
    ) -> Result<String, OcrError> {
        use std::process::Command;

        let lang = language.unwrap_or(&self.default_language);

        let temp_dir = std::env::temp_dir();
        let input_path = temp_dir.join(format!("ocr_input_{}.png", uuid::Uuid::new_v4()));
        let output_path = temp_dir.join(format!("ocr_output_{}", uuid::Uuid::new_v4()));

        std::fs::write(&input_path, image_data)
            .map_err(|e| OcrError::Processing(format!("Failed to write temp file: {}", e)))?;

        let output = Command::new("tesseract")
            .arg(&input_path)
            .arg(&output_path)
            .arg("-l")
            .arg(lang)
            .arg("--oem")
            .arg("3")
            .arg("--psm")
            .arg("3")
            .output()
            .map_err(|e| OcrError::Processing(format!("Failed to run tesseract: {}", e)))?;

        let _ = std::fs::remove_file(&input_path);

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Processing(format!("Tesseract failed: {}", stderr)));
        }

        let output_file = format!("{}.txt", output_path.display());
        let text = std::fs::read_to_string(&output_file)
            .map_err(|e| OcrError::Processing(format!("Failed to read output: {}", e)))?;

        let _ = std::fs::remove_file(&output_file);

        Ok(text.trim().to_string())
    }
}

/// Mock engine for testing
#[cfg(test)]
pub(crate) struct MockEngine {
    pub text: String,
    pub available: bool,
}

#[cfg(test)]
#[async_trait]
impl OcrEngine for MockEngine {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn is_available(&self) -> bool {
        self.available
    }

    async fn recognize(
        &self,
        _image_data: &[u8],
        _language: Option<&str>,
    ) -> Result<String, OcrError> {
        Ok(self.text.clone())
    }
}
