use crate::analysis::models::{ExperienceAnalysis, StructuredRecord};

pub const MISSING_DATES: &str =
    "Include clear dates for each position to show your experience timeline";
pub const MISSING_COMPANIES: &str = "Ensure company names are clearly listed for each position";
pub const FEW_ACHIEVEMENTS: &str =
    "Add more quantifiable achievements with metrics (%, $, time saved, etc.)";
pub const MISSING_ROLES: &str = "Clearly state your job titles/roles for each position";

const BASE_QUALITY: i32 = 5;
const STRONG_ACHIEVEMENT_THRESHOLD: usize = 3;

/// Number of distinct indicators occurring in `text_lower`.
pub fn count_indicators(text_lower: &str, indicators: &[String]) -> usize {
    indicators
        .iter()
        .filter(|indicator| text_lower.contains(indicator.as_str()))
        .count()
}

/// Rates the experience section on a 1 – 10 scale.
///
/// Starts at 5; +1 each for stated experience, company names and roles;
/// +2 for three or more distinct achievement indicators in the text, +1 for
/// one or two.
pub fn analyze_experience(
    record: &StructuredRecord,
    text: &str,
    achievement_indicators: &[String],
) -> ExperienceAnalysis {
    let has_years = !record.total_experience.is_empty();
    let has_companies = !record.company_names.is_empty();
    let has_roles = !record.designations.is_empty();
    let achievements = count_indicators(&text.to_lowercase(), achievement_indicators);

    let mut quality = BASE_QUALITY;
    quality += i32::from(has_years) + i32::from(has_companies) + i32::from(has_roles);
    quality += match achievements {
        0 => 0,
        n if n >= STRONG_ACHIEVEMENT_THRESHOLD => 2,
        _ => 1,
    };

    let mut suggestions = Vec::new();
    if !has_years {
        suggestions.push(MISSING_DATES.to_string());
    }
    if !has_companies {
        suggestions.push(MISSING_COMPANIES.to_string());
    }
    if achievements < STRONG_ACHIEVEMENT_THRESHOLD {
        suggestions.push(FEW_ACHIEVEMENTS.to_string());
    }
    if !has_roles {
        suggestions.push(MISSING_ROLES.to_string());
    }

    ExperienceAnalysis {
        years: record.total_experience.clone(),
        companies: record.company_names.clone(),
        roles: record.designations.clone(),
        quality: quality.clamp(1, 10) as u8,
        suggestions,
    }
}
