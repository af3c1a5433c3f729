//! Narrative summary and ordered improvement recommendations.

use crate::analysis::experience::count_indicators;
use crate::analysis::models::StructuredRecord;
use crate::analysis::tables::ReferenceTables;

pub const TOO_SHORT: &str = "Your CV appears quite short. Consider adding more details about your experience, projects, and achievements to give a comprehensive view of your qualifications.";
pub const TOO_LONG: &str = "Your CV is quite lengthy. Consider focusing on the most relevant experiences and achievements for your target position, aiming for a more concise 2-page document.";
pub const MORE_ACTION_VERBS: &str = "Use more action verbs at the beginning of your bullet points (e.g., 'Developed', 'Led', 'Implemented', 'Increased') to make your accomplishments more impactful.";
pub const ADD_METRICS: &str = "Add measurable achievements with metrics (percentages, dollar amounts, time saved) to demonstrate your impact.";
pub const CONDENSE_PAGES: &str = "Your CV is longer than 2 pages, which may be excessive for most positions. Consider condensing it to improve readability and focus on the most relevant experiences.";
pub const TAILOR_CV: &str = "Tailor your CV for each job application by matching keywords from the job description to improve ATS compatibility.";
pub const EXPAND_SKILLS: &str = "Expand your skills section to include both technical and soft skills relevant to your target positions.";

const MIN_CHARS: usize = 1000;
const MAX_CHARS: usize = 5000;
const MIN_ACTION_VERBS: usize = 5;
const MAX_PAGES: u32 = 2;
const TARGET_SKILLS: usize = 10;

pub fn generate_summary(record: &StructuredRecord) -> String {
    let name = if record.name.is_empty() {
        "The candidate"
    } else {
        record.name.as_str()
    };

    let mut parts = vec![format!("{name} is a professional")];
    if !record.total_experience.is_empty() {
        parts.push(format!("with {} of experience", record.total_experience));
    }
    parts.push(match record.skills.len() {
        0 => "with no clearly identified skills".to_string(),
        n => format!("demonstrating {n} identifiable skills"),
    });

    let mut summary = format!("{}.", parts.join(" "));
    if let Some(role) = record.designations.first() {
        summary.push_str(&format!(" The most recent role appears to be {role}."));
    }
    summary
}

/// Independent checks, each appending at most one recommendation, in a fixed
/// order: length, action verbs, metrics, page count, tailoring, skills.
pub fn generate_recommendations(
    record: &StructuredRecord,
    text: &str,
    tables: &ReferenceTables,
) -> Vec<String> {
    let mut recommendations = Vec::new();
    let text_lower = text.to_lowercase();

    let length = text.chars().count();
    if length < MIN_CHARS {
        recommendations.push(TOO_SHORT.to_string());
    } else if length > MAX_CHARS {
        recommendations.push(TOO_LONG.to_string());
    }

    if count_indicators(&text_lower, &tables.action_verbs) < MIN_ACTION_VERBS {
        recommendations.push(MORE_ACTION_VERBS.to_string());
    }

    if count_indicators(&text_lower, &tables.measurable_phrases) == 0 {
        recommendations.push(ADD_METRICS.to_string());
    }

    if record.page_count > MAX_PAGES {
        recommendations.push(CONDENSE_PAGES.to_string());
    }

    recommendations.push(TAILOR_CV.to_string());

    if record.skills.len() < TARGET_SKILLS {
        recommendations.push(EXPAND_SKILLS.to_string());
    }

    recommendations
}
