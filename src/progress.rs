//! Analysis progress tracking
//!
//! In-memory per-session progress map polled by the UI while a package
//! is being extracted and classified. Sessions are written by the
//! pipeline from blocking tasks, so the map uses a sync lock.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Serialize, Serializer};
use uuid::Uuid;

/// Pipeline stage reported to pollers.
///
/// Serialized with the wire strings the UI expects (`starting`,
/// `extracting_text`, `ocr_processing`, `ocr_page_<n>`, `analyzing`,
/// `completed`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStatus {
    Starting,
    ExtractingText,
    OcrProcessing,
    OcrPage(u32),
    Analyzing,
    Completed,
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Starting => write!(f, "starting"),
            Self::ExtractingText => write!(f, "extracting_text"),
            Self::OcrProcessing => write!(f, "ocr_processing"),
            Self::OcrPage(page) => write!(f, "ocr_page_{}", page),
            Self::Analyzing => write!(f, "analyzing"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

impl Serialize for ProcessingStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Point-in-time progress of one analysis session.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressSnapshot {
    pub current: usize,
    pub total: usize,
    pub status: ProcessingStatus,
    /// 0-100, floor of current/total
    pub percentage: u8,
    pub timestamp: DateTime<Utc>,
}

/// Shared session-to-progress map.
#[derive(Clone, Default)]
pub struct ProgressTracker {
    inner: Arc<RwLock<HashMap<Uuid, ProgressSnapshot>>>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest progress for a session, replacing any previous
    /// snapshot.
    pub fn update(&self, session_id: Uuid, current: usize, total: usize, status: ProcessingStatus) {
        let percentage = if total > 0 {
            (current * 100 / total) as u8
        } else {
            0
        };

        self.inner.write().insert(
            session_id,
            ProgressSnapshot {
                current,
                total,
                status,
                percentage,
                timestamp: Utc::now(),
            },
        );
    }

    pub fn get(&self, session_id: &Uuid) -> Option<ProgressSnapshot> {
        self.inner.read().get(session_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_and_get() {
        let tracker = ProgressTracker::new();
        let session_id = Uuid::new_v4();

        tracker.update(session_id, 3, 12, ProcessingStatus::ExtractingText);

        let snapshot = tracker.get(&session_id).expect("snapshot");
        assert_eq!(snapshot.current, 3);
        assert_eq!(snapshot.total, 12);
        assert_eq!(snapshot.status, ProcessingStatus::ExtractingText);
        assert_eq!(snapshot.percentage, 25);
    }

    #[test]
    fn test_unknown_session_is_none() {
        let tracker = ProgressTracker::new();
        assert!(tracker.get(&Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_later_update_replaces_snapshot() {
        let tracker = ProgressTracker::new();
        let session_id = Uuid::new_v4();

        tracker.update(session_id, 0, 1, ProcessingStatus::Starting);
        tracker.update(session_id, 1, 1, ProcessingStatus::Completed);

        let snapshot = tracker.get(&session_id).expect("snapshot");
        assert_eq!(snapshot.status, ProcessingStatus::Completed);
        assert_eq!(snapshot.percentage, 100);
    }

    #[test]
    fn test_zero_total_has_zero_percentage() {
        let tracker = ProgressTracker::new();
        let session_id = Uuid::new_v4();

        tracker.update(session_id, 0, 0, ProcessingStatus::Starting);
        assert_eq!(tracker.get(&session_id).expect("snapshot").percentage, 0);
    }

    #[test]
    fn test_status_wire_strings() {
        assert_eq!(ProcessingStatus::Starting.to_string(), "starting");
        assert_eq!(ProcessingStatus::OcrPage(7).to_string(), "ocr_page_7");
        assert_eq!(
            serde_json::to_string(&ProcessingStatus::ExtractingText).unwrap(),
            "\"extracting_text\""
        );
    }
}
