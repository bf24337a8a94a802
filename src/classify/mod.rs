//! Section classification
//!
//! Turns a sequence of extracted text fragments into a deduplicated,
//! confidence-ranked, priority-ordered list of identified document
//! sections. Pure and synchronous: safe to run concurrently for
//! independent documents since the rule catalog is read-only.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

mod rules;

pub use rules::{SectionRule, SECTION_RULES};

/// Maximum length of the evidence snippet carried by a match
const SNIPPET_LEN: usize = 100;

/// Which extraction path produced a fragment. Informational only;
/// classification does not branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    /// Native PDF text layer
    TextLayer,
    /// Image-based OCR fallback
    Ocr,
}

/// One extracted line of text with its source page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextFragment {
    /// Trimmed line content
    pub text: String,
    /// 1-based page number
    pub page: u32,
    pub method: ExtractionMethod,
}

impl TextFragment {
    pub fn new(text: impl Into<String>, page: u32, method: ExtractionMethod) -> Self {
        Self {
            text: text.into(),
            page,
            method,
        }
    }
}

/// Qualitative strength of a pattern match.
///
/// Ordering is part of the contract: `High > Medium > Low`. `Low` is
/// never produced by keyword matching but participates in the ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// A classified section with its best-found location and evidence.
#[derive(Debug, Clone, Serialize)]
pub struct IdentifiedSection {
    pub section_type: &'static str,
    /// Page of the current best match
    pub page: u32,
    pub confidence: Confidence,
    /// First 100 characters of the matching fragment
    pub text_snippet: String,
    pub priority: i32,
    /// The specific keyword that triggered the match
    pub pattern_matched: &'static str,
}

/// Classify extracted fragments into document sections.
///
/// Keeps at most one section per label, upgrading it in place whenever a
/// higher-confidence match appears, or an equal-confidence match from a
/// rule of equal or higher priority (last such match wins). The result
/// is sorted by priority descending, then page ascending, then label.
///
/// An empty input yields an empty output; that is "no sections found",
/// not an error.
pub fn classify(fragments: &[TextFragment]) -> Vec<IdentifiedSection> {
    let mut found: HashMap<&'static str, IdentifiedSection> = HashMap::new();

    for fragment in fragments {
        let text = fragment.text.to_uppercase();

        for rule in SECTION_RULES {
            for &pattern in rule.patterns {
                if !text.contains(pattern) {
                    continue;
                }

                let confidence = match_confidence(&text, pattern, rule.patterns);

                match found.entry(rule.label) {
                    Entry::Vacant(slot) => {
                        tracing::debug!(
                            section = rule.label,
                            page = fragment.page,
                            pattern,
                            "section discovered"
                        );
                        slot.insert(IdentifiedSection {
                            section_type: rule.label,
                            page: fragment.page,
                            confidence,
                            text_snippet: snippet(&fragment.text),
                            priority: rule.priority,
                            pattern_matched: pattern,
                        });
                    }
                    Entry::Occupied(mut slot) => {
                        let existing = slot.get_mut();
                        // Equal confidence with priority >= existing means the
                        // later match overwrites: last-wins on a full tie.
                        if confidence > existing.confidence
                            || (confidence == existing.confidence
                                && rule.priority >= existing.priority)
                        {
                            existing.page = fragment.page;
                            existing.confidence = confidence;
                            existing.text_snippet = snippet(&fragment.text);
                            existing.pattern_matched = pattern;
                        }
                    }
                }

                // First matching pattern within a rule settles this fragment.
                break;
            }
        }
    }

    let mut sections: Vec<IdentifiedSection> = found.into_values().collect();
    sections.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then(a.page.cmp(&b.page))
            .then(a.section_type.cmp(&b.section_type))
    });
    sections
}

/// Confidence tier for a single pattern hit.
///
/// `high` when the line is exactly the pattern, when the line is short
/// (at most 10 words), or when more than one of the rule's patterns
/// co-occur in the line. Everything else is `medium`.
fn match_confidence(text: &str, pattern: &str, patterns: &[&str]) -> Confidence {
    if text.trim() == pattern {
        Confidence::High
    } else if text.split_whitespace().count() <= 10 {
        Confidence::High
    } else if patterns.iter().filter(|p| text.contains(**p)).count() > 1 {
        Confidence::High
    } else {
        Confidence::Medium
    }
}

fn snippet(text: &str) -> String {
    text.chars().take(SNIPPET_LEN).collect()
}
