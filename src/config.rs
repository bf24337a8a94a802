//! Server configuration
//!
//! Loaded once at startup from environment variables (a `.env` file is
//! honored via dotenvy in main). Every setting has a default suitable
//! for local use.

use std::env;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub upload: UploadConfig,
    pub ocr: OcrConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port bound on 127.0.0.1
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 5000 }
    }
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub max_size_mb: usize,
}

impl UploadConfig {
    pub fn max_size_bytes(&self) -> usize {
        self.max_size_mb * 1024 * 1024
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self { max_size_mb: 100 }
    }
}

#[derive(Debug, Clone)]
pub struct OcrConfig {
    pub enabled: bool,
    /// Tesseract language code
    pub language: String,
    /// Render resolution for OCR page images
    pub dpi: u32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            language: "eng".to_string(),
            dpi: 150,
        }
    }
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    /// for unset variables. Set but unparseable values are an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig {
                port: parse_var("ANALYZER_PORT", 5000)?,
            },
            upload: UploadConfig {
                max_size_mb: parse_var("ANALYZER_MAX_UPLOAD_MB", 100)?,
            },
            ocr: OcrConfig {
                enabled: parse_var("ANALYZER_OCR_ENABLED", true)?,
                language: env::var("ANALYZER_OCR_LANGUAGE").unwrap_or_else(|_| "eng".to_string()),
                dpi: parse_var("ANALYZER_OCR_DPI", 150)?,
            },
        })
    }
}

fn parse_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
        Err(_) => Ok(default),
    }
}
