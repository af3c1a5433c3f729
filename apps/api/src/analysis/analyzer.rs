//! Analysis orchestrator.
//!
//! `Analyzer` is constructed once at startup with the reference data and
//! shared read-only across requests. Every entry point returns a complete
//! `AnalysisReport`; failures are converted into the default report with
//! `success = false` instead of being propagated.

use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::{error, info, warn};

use crate::analysis::basic_info::analyze_basic_info;
use crate::analysis::error::{AnalysisError, ExtractionError, ParseError};
use crate::analysis::experience::analyze_experience;
use crate::analysis::extraction::extract_basic;
use crate::analysis::models::{
    AnalysisReport, BasicInfoAnalysis, ExperienceAnalysis, RawDocument, StructuredRecord,
};
use crate::analysis::patterns::ContactPatterns;
use crate::analysis::scoring::{compute_overall_score, ScoringWeights};
use crate::analysis::skill_gap::identify_missing_skills;
use crate::analysis::skills_section::skills_suggestion;
use crate::analysis::summary::{generate_recommendations, generate_summary};
use crate::analysis::tables::ReferenceTables;
use crate::analysis::vocabulary::Vocabularies;

pub const DEFAULT_SCORE: u8 = 5;
pub const FAILURE_SUMMARY: &str =
    "We encountered an error analyzing this CV. Please try again with a different file format.";
pub const FAILURE_SKILLS_SUGGESTION: &str =
    "We couldn't properly analyze your skills. Please ensure your CV is in a standard format (PDF, DOCX).";
pub const FAILURE_RECOMMENDATIONS: [&str; 2] = [
    "Try uploading your CV in PDF format for better results.",
    "Ensure your document is not password protected or contains unusual formatting.",
];

#[derive(Debug, Clone)]
pub struct Analyzer {
    vocabularies: Vocabularies,
    tables: ReferenceTables,
    weights: ScoringWeights,
    patterns: ContactPatterns,
}

impl Analyzer {
    pub fn new(vocabularies: Vocabularies, tables: ReferenceTables) -> Result<Self, AnalysisError> {
        Ok(Self {
            vocabularies,
            tables,
            weights: ScoringWeights::default(),
            patterns: ContactPatterns::new()?,
        })
    }

    /// Fallback structured extraction from raw text.
    pub fn extract_basic(&self, text: &str) -> StructuredRecord {
        extract_basic(text, &self.vocabularies, &self.patterns)
    }

    /// Analyzes a document given its text and structured record.
    pub fn analyze(&self, text: &str, record: &StructuredRecord) -> AnalysisReport {
        report_or_default(|| self.build_report(text, record))
    }

    /// Runs the full pipeline on the results of the two external collaborators.
    ///
    /// A failed or empty primary parse falls back to text-based extraction;
    /// a failed text extraction yields the default report.
    pub fn process(
        &self,
        document: Result<RawDocument, ExtractionError>,
        parsed: Result<StructuredRecord, ParseError>,
    ) -> AnalysisReport {
        let document = match document {
            Ok(document) => document,
            Err(e) => {
                let e = AnalysisError::from(e);
                error!("Error processing CV: {e}");
                return default_report(e.to_string());
            }
        };

        let record = self.resolve_record(&document, parsed);
        let report = self.analyze(&document.text, &record);
        if report.success {
            info!(
                score = report.overall_score,
                skills = report.skills.len(),
                "CV processing completed"
            );
        }
        report
    }

    fn resolve_record(
        &self,
        document: &RawDocument,
        parsed: Result<StructuredRecord, ParseError>,
    ) -> StructuredRecord {
        match parsed {
            Ok(record) if !record.is_empty() => record,
            Ok(_) => {
                warn!("Resume parser returned no data, falling back to basic extraction");
                self.fallback_record(document)
            }
            Err(e) => {
                warn!("Error parsing resume: {e}. Falling back to basic extraction");
                self.fallback_record(document)
            }
        }
    }

    fn fallback_record(&self, document: &RawDocument) -> StructuredRecord {
        StructuredRecord {
            page_count: document.page_count,
            ..self.extract_basic(&document.text)
        }
    }

    fn build_report(&self, text: &str, record: &StructuredRecord) -> AnalysisReport {
        AnalysisReport {
            success: true,
            error: None,
            overall_score: compute_overall_score(record, text, &self.weights),
            summary: generate_summary(record),
            basic_info: analyze_basic_info(record, &self.patterns),
            experience: analyze_experience(record, text, &self.tables.achievement_indicators),
            skills: record.skills.clone(),
            missing_skills: identify_missing_skills(record, &self.tables.role_skills),
            skills_suggestions: skills_suggestion(record.skills.len()).to_string(),
            recommendations: generate_recommendations(record, text, &self.tables),
            data: Some(record.clone()),
        }
    }
}

/// Runs `build`, converting a panic into the default report.
fn report_or_default(build: impl FnOnce() -> AnalysisReport) -> AnalysisReport {
    match catch_unwind(AssertUnwindSafe(build))
        .map_err(|payload| AnalysisError::Panicked(panic_message(payload.as_ref())))
    {
        Ok(report) => report,
        Err(e) => {
            error!("Error analyzing CV: {e}");
            default_report(e.to_string())
        }
    }
}

/// The report returned whenever analysis cannot complete.
pub fn default_report(error: impl Into<String>) -> AnalysisReport {
    AnalysisReport {
        success: false,
        error: Some(error.into()),
        overall_score: DEFAULT_SCORE,
        summary: FAILURE_SUMMARY.to_string(),
        basic_info: BasicInfoAnalysis::default(),
        experience: ExperienceAnalysis::default(),
        skills: vec![],
        missing_skills: vec![],
        skills_suggestions: FAILURE_SKILLS_SUGGESTION.to_string(),
        recommendations: FAILURE_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect(),
        data: None,
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::basic_info::{MISSING_EMAIL, MISSING_NAME, MISSING_PHONE};
    use crate::analysis::skills_section::{NO_SKILLS, ORGANIZE_SKILLS};

    const SAMPLE: &str = "John Smith\njohn@x.com\n555-123-4567\nPython, SQL, Docker, Git, Agile, Testing, React, Kubernetes, AWS, Leadership";

    fn analyzer() -> Analyzer {
        Analyzer::new(Vocabularies::builtin(), ReferenceTables::default()).unwrap()
    }

    #[test]
    fn test_empty_input_report() {
        let report = analyzer().analyze("", &StructuredRecord::default());
        assert!(report.success);
        assert_eq!(report.overall_score, 5);
        assert_eq!(report.basic_info.completeness, 0);
        assert_eq!(
            report.basic_info.suggestions,
            vec![MISSING_NAME, MISSING_EMAIL, MISSING_PHONE]
        );
        assert_eq!(report.skills_suggestions, NO_SKILLS);
        assert!(report.missing_skills.is_empty());
    }

    #[test]
    fn test_sample_cv_via_fallback_scores_eight() {
        let analyzer = analyzer();
        let report = analyzer.process(
            Ok(RawDocument::new(SAMPLE, 1)),
            Err(ParseError::Unavailable),
        );
        assert!(report.success);
        let data = report.data.as_ref().unwrap();
        assert_eq!(data.name, "John Smith");
        assert_eq!(data.email, "john@x.com");
        assert_eq!(data.phone, "555-123-4567");
        assert_eq!(data.page_count, 1);
        assert!(report.skills.len() >= 10, "{:?}", report.skills);
        assert_eq!(report.skills_suggestions, ORGANIZE_SKILLS);
        // 5 + 1.5 contacts + 1 skills = 7.5, rounded half up
        assert_eq!(report.overall_score, 8);
        assert_eq!(report.basic_info.completeness, 100);
    }

    #[test]
    fn test_parsed_record_is_used_when_present() {
        let record = StructuredRecord {
            name: "Parsed Name".into(),
            designations: vec!["Software Engineer".into()],
            ..Default::default()
        };
        let report = analyzer().process(Ok(RawDocument::from_text(SAMPLE)), Ok(record));
        assert_eq!(report.basic_info.name, "Parsed Name");
        assert_eq!(report.missing_skills.len(), 5);
        assert!(report.summary.ends_with("The most recent role appears to be Software Engineer."));
    }

    #[test]
    fn test_empty_parse_falls_back() {
        let report = analyzer().process(
            Ok(RawDocument::from_text(SAMPLE)),
            Ok(StructuredRecord::default()),
        );
        assert_eq!(report.basic_info.name, "John Smith");
    }

    #[test]
    fn test_extraction_failure_yields_default_report() {
        let err = ExtractionError::Pdf("bad xref".into());
        let report = analyzer().process(Err(err), Err(ParseError::Unavailable));
        assert!(!report.success);
        assert!(report.error.as_deref().unwrap().contains("bad xref"));
        assert_eq!(report.overall_score, DEFAULT_SCORE);
        assert_eq!(report.summary, FAILURE_SUMMARY);
        assert_eq!(report.recommendations.len(), 2);
        assert_eq!(report.experience.quality, 5);
        assert_eq!(report.basic_info.completeness, 0);
        assert!(report.data.is_none());
    }

    #[test]
    fn test_default_report_serializes_with_failure_flag() {
        let value = serde_json::to_value(default_report("boom")).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "boom");
        assert_eq!(value["score"], 5);
        assert!(value["basicInfo"].is_object());
        assert!(value["experience"].is_object());
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let analyzer = analyzer();
        let record = analyzer.extract_basic(SAMPLE);
        let first = serde_json::to_string(&analyzer.analyze(SAMPLE, &record)).unwrap();
        let second = serde_json::to_string(&analyzer.analyze(SAMPLE, &record)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_panicking_analysis_yields_default_report() {
        let report = report_or_default(|| panic!("role table index out of range"));
        assert!(!report.success);
        assert_eq!(
            report.error.as_deref(),
            Some("internal analysis failure: role table index out of range")
        );
        assert_eq!(report.overall_score, DEFAULT_SCORE);
        assert_eq!(report.summary, FAILURE_SUMMARY);
        assert_eq!(report.skills_suggestions, FAILURE_SKILLS_SUGGESTION);
        assert!(report.data.is_none());
    }

    #[test]
    fn test_successful_build_passes_through() {
        let analyzer = analyzer();
        let record = analyzer.extract_basic(SAMPLE);
        let report = report_or_default(|| analyzer.build_report(SAMPLE, &record));
        assert_eq!(report, analyzer.analyze(SAMPLE, &record));
        assert!(report.success);
    }

    #[test]
    fn test_panic_payload_message() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("exploded");
        assert_eq!(panic_message(payload.as_ref()), "exploded");
        let payload: Box<dyn std::any::Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }
}
