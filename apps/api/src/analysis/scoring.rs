use crate::analysis::models::StructuredRecord;

/// Bonuses added to the neutral base score. Every bonus is non-negative, so
/// the score never decreases when a signal improves.
#[derive(Debug, Clone)]
pub struct ScoringWeights {
    pub base: f64,
    /// Per present contact field (name, email, phone).
    pub contact_field: f64,
    pub contact_cap: f64,
    pub many_skills: f64,
    pub some_skills: f64,
    pub experience: f64,
    pub degree: f64,
    pub long_text: f64,
    pub medium_text: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base: 5.0,
            contact_field: 0.5,
            contact_cap: 1.5,
            many_skills: 1.0,
            some_skills: 0.5,
            experience: 1.0,
            degree: 0.5,
            long_text: 1.0,
            medium_text: 0.5,
        }
    }
}

const MANY_SKILLS: usize = 10;
const SOME_SKILLS: usize = 5;
const LONG_TEXT_CHARS: usize = 3000;
const MEDIUM_TEXT_CHARS: usize = 1500;

/// Overall CV score in [1, 10].
///
/// The weighted sum is clamped to [1, 10] and rounded half away from zero,
/// so 7.5 becomes 8.
pub fn compute_overall_score(record: &StructuredRecord, text: &str, weights: &ScoringWeights) -> u8 {
    let mut score = weights.base;

    let contacts = [&record.name, &record.email, &record.phone]
        .iter()
        .filter(|f| !f.is_empty())
        .count();
    score += (contacts as f64 * weights.contact_field).min(weights.contact_cap);

    let skills = record.skills.len();
    if skills >= MANY_SKILLS {
        score += weights.many_skills;
    } else if skills >= SOME_SKILLS {
        score += weights.some_skills;
    }

    if !record.total_experience.is_empty() {
        score += weights.experience;
    }
    if !record.degree.is_empty() {
        score += weights.degree;
    }

    let length = text.chars().count();
    if length > LONG_TEXT_CHARS {
        score += weights.long_text;
    } else if length > MEDIUM_TEXT_CHARS {
        score += weights.medium_text;
    }

    score.clamp(1.0, 10.0).round() as u8
}
