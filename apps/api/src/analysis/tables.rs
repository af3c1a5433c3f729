//! Static lookup tables consulted by the section analyzers and the
//! recommendation generator.
//!
//! The built-in tables can be replaced at startup with a JSON document
//! (`ANALYSIS_TABLES_PATH`); fields absent from the document keep their
//! built-in values.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Expected skills for one canonical role name (lowercase).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleSkills {
    pub role: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceTables {
    /// Iteration order breaks overlap ties in the skill-gap analyzer.
    pub role_skills: Vec<RoleSkills>,
    pub achievement_indicators: Vec<String>,
    pub action_verbs: Vec<String>,
    /// Phrases that mark a measurable achievement, matched case-insensitively.
    pub measurable_phrases: Vec<String>,
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self {
            role_skills: ROLE_SKILLS
                .iter()
                .map(|(role, skills)| RoleSkills {
                    role: role.to_string(),
                    skills: owned(skills),
                })
                .collect(),
            achievement_indicators: owned(ACHIEVEMENT_INDICATORS),
            action_verbs: owned(ACTION_VERBS),
            measurable_phrases: owned(MEASURABLE_PHRASES),
        }
    }
}

impl ReferenceTables {
    /// Loads the tables from `path` when given, falling back to the built-in
    /// tables on any failure.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        let parsed = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|raw| serde_json::from_str::<Self>(&raw).map_err(|e| e.to_string()));

        match parsed {
            Ok(mut tables) => {
                tables.normalize();
                info!(
                    roles = tables.role_skills.len(),
                    "Analysis tables loaded from {}",
                    path.display()
                );
                tables
            }
            Err(e) => {
                warn!(
                    "Failed to load analysis tables from {}: {e}. Using built-in tables.",
                    path.display()
                );
                Self::default()
            }
        }
    }

    fn normalize(&mut self) {
        for entry in &mut self.role_skills {
            entry.role = entry.role.trim().to_lowercase();
        }
        for list in [
            &mut self.achievement_indicators,
            &mut self.action_verbs,
            &mut self.measurable_phrases,
        ] {
            for item in list.iter_mut() {
                *item = item.to_lowercase();
            }
        }
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

const ROLE_SKILLS: &[(&str, &[&str])] = &[
    ("software developer", &["git", "algorithms", "data structures", "agile", "testing"]),
    ("software engineer", &["git", "algorithms", "data structures", "agile", "testing"]),
    ("web developer", &["html", "css", "javascript", "responsive design", "web apis"]),
    ("frontend developer", &["html", "css", "javascript", "react", "vue", "angular"]),
    ("backend developer", &["apis", "databases", "server management", "authentication"]),
    ("full stack developer", &["frontend", "backend", "databases", "apis", "deployment"]),
    ("data scientist", &["python", "r", "sql", "machine learning", "data visualization"]),
    ("data analyst", &["sql", "excel", "data visualization", "statistics", "reporting"]),
    ("product manager", &["agile", "user stories", "roadmapping", "stakeholder management"]),
    ("project manager", &["agile", "scrum", "project planning", "risk management"]),
    ("designer", &["ui design", "ux design", "wireframing", "prototyping", "user research"]),
];

const ACHIEVEMENT_INDICATORS: &[&str] = &[
    "increase", "decrease", "improve", "reduce", "save", "launch", "develop", "create",
    "implement", "lead", "%", "percent", "million", "thousand", "hundred",
];

const ACTION_VERBS: &[&str] = &[
    "managed", "led", "developed", "created", "implemented", "designed", "improved",
    "increased", "decreased", "reduced", "delivered", "achieved", "negotiated", "initiated",
    "launched", "conducted", "organized",
];

const MEASURABLE_PHRASES: &[&str] = &["%", "$", "increased by", "decreased by", "reduced by"];
