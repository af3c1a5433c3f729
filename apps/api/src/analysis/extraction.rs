//! Fallback structured extraction, used when the primary résumé parser fails
//! or returns nothing.
//!
//! Skills and designations are found by case-insensitive substring search
//! against the vocabularies, without word boundaries. Short vocabulary entries
//! such as "R" or "Go" therefore over-match; this is a known limitation and
//! changing it would change scores.

use crate::analysis::models::StructuredRecord;
use crate::analysis::patterns::ContactPatterns;
use crate::analysis::vocabulary::Vocabularies;

/// Derives a minimal structured record from raw text. Never fails; empty
/// input yields an all-empty record.
pub fn extract_basic(
    text: &str,
    vocabularies: &Vocabularies,
    patterns: &ContactPatterns,
) -> StructuredRecord {
    let text_lower = text.to_lowercase();

    StructuredRecord {
        name: first_name_line(text, patterns),
        email: patterns.find_email(text).unwrap_or_default().to_string(),
        phone: patterns.find_phone(text).unwrap_or_default().to_string(),
        skills: scan_vocabulary(&text_lower, &vocabularies.skills),
        designations: scan_vocabulary(&text_lower, &vocabularies.job_titles),
        ..StructuredRecord::default()
    }
}

/// Vocabulary entries whose lowercase text occurs in `text_lower`, in
/// vocabulary order.
fn scan_vocabulary(text_lower: &str, vocabulary: &[String]) -> Vec<String> {
    if text_lower.is_empty() {
        return vec![];
    }
    vocabulary
        .iter()
        .filter(|entry| !entry.is_empty() && text_lower.contains(&entry.to_lowercase()))
        .cloned()
        .collect()
}

/// First non-blank line that is not contact information.
fn first_name_line(text: &str, patterns: &ContactPatterns) -> String {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !patterns.mentions_contact(line))
        .unwrap_or_default()
        .to_string()
}
