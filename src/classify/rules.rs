//! Section rule catalog
//!
//! The static table of keyword rules used to identify mortgage package
//! sections. Loaded once, read many; never mutated at runtime.

/// A catalog entry mapping keyword patterns to a named section type.
///
/// Patterns are uppercase; any single pattern matching a fragment is
/// sufficient. Higher priority sections sort first in results.
#[derive(Debug, Clone, Copy)]
pub struct SectionRule {
    /// Uppercase keywords and phrases, in match order
    pub patterns: &'static [&'static str],
    /// Canonical section name, unique across the catalog
    pub label: &'static str,
    /// Higher = more important
    pub priority: i32,
}

/// Keyword rules derived from real mortgage closing packages.
pub static SECTION_RULES: &[SectionRule] = &[
    // Core mortgage documents (highest priority)
    SectionRule {
        patterns: &["MORTGAGE", "DEED OF TRUST", "SECURITY INSTRUMENT"],
        label: "Mortgage",
        priority: 10,
    },
    SectionRule {
        patterns: &["PROMISSORY NOTE", "NOTE"],
        label: "Promissory Note",
        priority: 10,
    },
    // Closing documents
    SectionRule {
        patterns: &[
            "LENDERS CLOSING INSTRUCTIONS",
            "CLOSING INSTRUCTIONS GUARANTY",
            "LENDER'S CLOSING INSTRUCTIONS",
        ],
        label: "Lenders Closing Instructions Guaranty",
        priority: 9,
    },
    SectionRule {
        patterns: &["SETTLEMENT STATEMENT", "HUD-1", "CLOSING DISCLOSURE"],
        label: "Settlement Statement",
        priority: 9,
    },
    // Legal documents
    SectionRule {
        patterns: &[
            "STATEMENT OF ANTI COERCION",
            "ANTI COERCION",
            "ANTI-COERCION FLORIDA",
        ],
        label: "Statement of Anti Coercion Florida",
        priority: 8,
    },
    SectionRule {
        patterns: &[
            "CORRECTION AGREEMENT",
            "LIMITED POWER OF ATTORNEY",
            "POWER OF ATTORNEY",
        ],
        label: "Correction Agreement and Limited Power of Attorney",
        priority: 8,
    },
    SectionRule {
        patterns: &[
            "ALL PURPOSE ACKNOWLEDGMENT",
            "ACKNOWLEDGMENT",
            "NOTARY ACKNOWLEDGMENT",
        ],
        label: "All Purpose Acknowledgment",
        priority: 8,
    },
    // Insurance and hazard documents
    SectionRule {
        patterns: &[
            "FLOOD HAZARD DETERMINATION",
            "FLOOD DETERMINATION",
            "FEMA FLOOD",
        ],
        label: "Flood Hazard Determination",
        priority: 7,
    },
    SectionRule {
        patterns: &["INSURANCE POLICY", "HOMEOWNER'S INSURANCE", "HAZARD INSURANCE"],
        label: "Insurance Policy",
        priority: 7,
    },
    // Payment and tax documents
    SectionRule {
        patterns: &[
            "AUTOMATIC PAYMENTS AUTHORIZATION",
            "AUTOMATIC PAYMENT",
            "ACH AUTHORIZATION",
        ],
        label: "Automatic Payments Authorization",
        priority: 7,
    },
    SectionRule {
        patterns: &["TAX RECORD INFORMATION", "TAX RECORDS", "PROPERTY TAX"],
        label: "Tax Record Information",
        priority: 7,
    },
    // Title documents
    SectionRule {
        patterns: &["TITLE POLICY", "TITLE INSURANCE", "OWNER'S POLICY"],
        label: "Title Policy",
        priority: 6,
    },
    SectionRule {
        patterns: &["DEED", "WARRANTY DEED", "QUITCLAIM DEED"],
        label: "Deed",
        priority: 6,
    },
    // Other documents
    SectionRule {
        patterns: &["UCC FILING", "UCC-1", "FINANCING STATEMENT"],
        label: "UCC Filing",
        priority: 5,
    },
    SectionRule {
        patterns: &["SIGNATURE PAGE", "SIGNATURES", "BORROWER SIGNATURE"],
        label: "Signature Page",
        priority: 5,
    },
    SectionRule {
        patterns: &["AFFIDAVIT", "SWORN STATEMENT"],
        label: "Affidavit",
        priority: 5,
    },
];
