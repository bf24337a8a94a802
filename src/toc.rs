//! Table of contents rendering
//!
//! Builds the plain-text table of contents offered as a download once
//! the user has picked which identified sections to include.

use chrono::{DateTime, Utc};
use serde::Deserialize;

const RULE_WIDTH: usize = 50;
const TITLE_WIDTH: usize = 40;

/// A section the user selected for the table of contents.
#[derive(Debug, Clone, Deserialize)]
pub struct TocSelection {
    pub section_type: String,
    pub page: u32,
}

/// Render the table of contents. Entries are emitted in the order given;
/// callers sort by page first.
pub fn build_toc(sections: &[TocSelection], generated_at: DateTime<Utc>) -> String {
    let rule = "=".repeat(RULE_WIDTH);

    let mut toc = String::new();
    toc.push_str("MORTGAGE PACKAGE - TABLE OF CONTENTS\n");
    toc.push_str(&rule);
    toc.push_str("\n\n");
    toc.push_str(&format!(
        "Generated: {}\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    toc.push_str("Processing: Local Server (Private)\n\n");

    for (index, section) in sections.iter().enumerate() {
        let page = format!("Page {}", section.page);
        toc.push_str(&format!(
            "{:>2}. {:.<title_width$} {:>10}\n",
            index + 1,
            section.section_type,
            page,
            title_width = TITLE_WIDTH
        ));
    }

    toc.push('\n');
    toc.push_str(&rule);
    toc.push('\n');
    toc.push_str(&format!("Total Sections: {}\n", sections.len()));
    toc
}
