//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::extract::{engine_from_config, ExtractionPipeline};
use crate::progress::ProgressTracker;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    progress: ProgressTracker,
    extractor: ExtractionPipeline,
}

impl AppState {
    /// Create the application state, building the extraction pipeline
    /// with whatever OCR engine the config and compiled features allow.
    pub fn new(config: Config) -> Self {
        let engine = engine_from_config(&config.ocr);
        let extractor =
            ExtractionPipeline::new(engine, config.ocr.dpi, config.ocr.language.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                progress: ProgressTracker::new(),
                extractor,
            }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.inner.progress
    }

    pub fn extractor(&self) -> &ExtractionPipeline {
        &self.inner.extractor
    }
}
