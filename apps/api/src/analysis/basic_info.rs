use crate::analysis::models::{BasicInfoAnalysis, StructuredRecord};
use crate::analysis::patterns::ContactPatterns;

pub const MISSING_NAME: &str = "Include your full name at the top of your CV";
pub const MISSING_EMAIL: &str = "Add your email address to your contact information";
pub const MISSING_PHONE: &str = "Include your phone number in the contact section";
pub const MALFORMED_EMAIL: &str = "Your email format appears unusual - please verify it's correct";
pub const MALFORMED_PHONE: &str =
    "Your phone number format may be non-standard - consider using a consistent format";

/// Scores contact completeness and flags missing or malformed contact fields.
///
/// Completeness is the rounded percentage of {name, email, phone} present.
/// Suggestions are emitted in a fixed order: missing name, missing email,
/// missing phone, malformed email, malformed phone.
pub fn analyze_basic_info(record: &StructuredRecord, patterns: &ContactPatterns) -> BasicInfoAnalysis {
    let fields = [&record.name, &record.email, &record.phone];
    let present = fields.iter().filter(|f| !f.is_empty()).count();
    let completeness = (100.0 * present as f64 / fields.len() as f64).round() as u8;

    let mut suggestions = Vec::new();
    if record.name.is_empty() {
        suggestions.push(MISSING_NAME.to_string());
    }
    if record.email.is_empty() {
        suggestions.push(MISSING_EMAIL.to_string());
    }
    if record.phone.is_empty() {
        suggestions.push(MISSING_PHONE.to_string());
    }
    if !record.email.is_empty() && !patterns.is_valid_email(&record.email) {
        suggestions.push(MALFORMED_EMAIL.to_string());
    }
    if !record.phone.is_empty() && !patterns.is_valid_phone(&record.phone) {
        suggestions.push(MALFORMED_PHONE.to_string());
    }

    BasicInfoAnalysis {
        name: record.name.clone(),
        email: record.email.clone(),
        phone: record.phone.clone(),
        location: record.location.clone(),
        linkedin: String::new(),
        completeness,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(record: &StructuredRecord) -> BasicInfoAnalysis {
        analyze_basic_info(record, &ContactPatterns::new().unwrap())
    }

    #[test]
    fn test_empty_record_has_zero_completeness_and_ordered_suggestions() {
        let result = analyze(&StructuredRecord::default());
        assert_eq!(result.completeness, 0);
        assert_eq!(
            result.suggestions,
            vec![MISSING_NAME, MISSING_EMAIL, MISSING_PHONE]
        );
    }

    #[test]
    fn test_completeness_rounds_to_nearest_percent() {
        let one = StructuredRecord {
            name: "Jane".into(),
            ..Default::default()
        };
        assert_eq!(analyze(&one).completeness, 33);

        let two = StructuredRecord {
            name: "Jane".into(),
            email: "jane@doe.dev".into(),
            ..Default::default()
        };
        assert_eq!(analyze(&two).completeness, 67);
    }

    #[test]
    fn test_complete_valid_record_has_no_suggestions() {
        let record = StructuredRecord {
            name: "Jane Doe".into(),
            email: "jane@doe.dev".into(),
            phone: "+1 555-123-4567".into(),
            location: "Berlin".into(),
            ..Default::default()
        };
        let result = analyze(&record);
        assert_eq!(result.completeness, 100);
        assert!(result.suggestions.is_empty(), "{:?}", result.suggestions);
        assert_eq!(result.location, "Berlin");
        assert_eq!(result.linkedin, "");
    }

    #[test]
    fn test_malformed_values_follow_missing_suggestions() {
        let record = StructuredRecord {
            email: "jane at doe".into(),
            phone: "call me".into(),
            ..Default::default()
        };
        let result = analyze(&record);
        assert_eq!(
            result.suggestions,
            vec![MISSING_NAME, MALFORMED_EMAIL, MALFORMED_PHONE]
        );
    }
}
