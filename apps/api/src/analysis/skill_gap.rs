use std::collections::HashSet;

use crate::analysis::models::StructuredRecord;
use crate::analysis::tables::RoleSkills;

pub const MAX_MISSING_SKILLS: usize = 5;

/// Suggests skills expected for the candidate's roles but absent from the CV.
///
/// Each designation is matched to the role table entry sharing the most
/// whitespace-delimited words (first entry wins ties). Designations sharing
/// no word with any entry contribute nothing. Expected skills already on the
/// CV or already suggested are skipped; at most five are returned, in
/// discovery order.
pub fn identify_missing_skills(record: &StructuredRecord, role_skills: &[RoleSkills]) -> Vec<String> {
    let existing: HashSet<String> = record.skills.iter().map(|s| s.to_lowercase()).collect();
    let mut missing: Vec<String> = Vec::new();

    for designation in &record.designations {
        let Some(entry) = best_match(designation, role_skills) else {
            continue;
        };

        for skill in &entry.skills {
            let skill_lower = skill.to_lowercase();
            if existing.contains(&skill_lower)
                || missing.iter().any(|m| m.to_lowercase() == skill_lower)
            {
                continue;
            }
            missing.push(skill.clone());
        }
    }

    missing.truncate(MAX_MISSING_SKILLS);
    missing
}

fn best_match<'a>(designation: &str, role_skills: &'a [RoleSkills]) -> Option<&'a RoleSkills> {
    let designation = designation.to_lowercase();
    let words: HashSet<&str> = designation.split_whitespace().collect();
    if words.is_empty() {
        return None;
    }

    let mut best: Option<&RoleSkills> = None;
    let mut best_overlap = 0;
    for entry in role_skills {
        let entry_words: HashSet<&str> = entry.role.split_whitespace().collect();
        let overlap = words.intersection(&entry_words).count();
        if overlap > best_overlap {
            best_overlap = overlap;
            best = Some(entry);
        }
    }
    best
}
