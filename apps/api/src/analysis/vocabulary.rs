//! Reference data store: skill and job-title vocabularies used for matching.
//!
//! Each vocabulary is read from a CSV file with a single named column. Any
//! failure falls back to the curated built-in list; the process never stops
//! because reference data is missing.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

const SKILL_COLUMN: &str = "skill";
const TITLE_COLUMN: &str = "title";

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("vocabulary file not found at {0}")]
    NotFound(PathBuf),

    #[error("malformed vocabulary file: {0}")]
    Csv(#[from] csv::Error),

    #[error("column '{column}' missing from {path}")]
    MissingColumn { column: &'static str, path: PathBuf },
}

/// Read-only vocabularies shared by every analysis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabularies {
    /// Scan order is preserved; matched skills are reported in this order.
    pub skills: Vec<String>,
    pub job_titles: Vec<String>,
}

impl Vocabularies {
    pub fn load(skills_path: &Path, job_titles_path: &Path) -> Self {
        let vocabularies = Self {
            skills: load_skills(skills_path),
            job_titles: load_job_titles(job_titles_path),
        };
        info!(
            skills = vocabularies.skills.len(),
            job_titles = vocabularies.job_titles.len(),
            "Reference vocabularies loaded"
        );
        vocabularies
    }

    #[cfg(test)]
    pub fn builtin() -> Self {
        Self {
            skills: to_owned_list(DEFAULT_SKILLS),
            job_titles: to_owned_list(DEFAULT_JOB_TITLES),
        }
    }
}

pub fn load_skills(path: &Path) -> Vec<String> {
    load_or_default(path, SKILL_COLUMN, DEFAULT_SKILLS)
}

pub fn load_job_titles(path: &Path) -> Vec<String> {
    load_or_default(path, TITLE_COLUMN, DEFAULT_JOB_TITLES)
}

fn load_or_default(path: &Path, column: &'static str, defaults: &[&str]) -> Vec<String> {
    match read_column(path, column) {
        Ok(values) => {
            if values.is_empty() {
                warn!("Vocabulary file {} has no '{column}' values", path.display());
            }
            values
        }
        Err(e) => {
            warn!("{e}. Using default {column} list.");
            to_owned_list(defaults)
        }
    }
}

fn read_column(path: &Path, column: &'static str) -> Result<Vec<String>, VocabularyError> {
    if !path.exists() {
        return Err(VocabularyError::NotFound(path.to_path_buf()));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let index = reader
        .headers()?
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(column))
        .ok_or_else(|| VocabularyError::MissingColumn {
            column,
            path: path.to_path_buf(),
        })?;

    let mut values: Vec<String> = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(value) = record.get(index).map(str::trim) {
            if !value.is_empty() && !values.iter().any(|v| v == value) {
                values.push(value.to_string());
            }
        }
    }
    Ok(values)
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

const DEFAULT_SKILLS: &[&str] = &[
    "Python", "JavaScript", "Java", "C++", "C#", "Ruby", "Go", "PHP", "Swift",
    "Kotlin", "SQL", "NoSQL", "MongoDB", "MySQL", "PostgreSQL", "Oracle",
    "React", "Angular", "Vue.js", "Node.js", "Django", "Flask", "Spring",
    "Docker", "Kubernetes", "AWS", "Azure", "GCP", "DevOps", "CI/CD",
    "Machine Learning", "Data Science", "Artificial Intelligence", "NLP",
    "Project Management", "Agile", "Scrum", "Kanban", "Leadership",
    "Communication", "Problem Solving", "Teamwork", "Critical Thinking",
    "Microsoft Office", "Excel", "PowerPoint", "Word", "Visio", "Photoshop",
    "Illustrator", "InDesign", "Figma", "Adobe XD", "UI/UX Design",
    "HTML", "CSS", "SASS", "LESS", "Bootstrap", "Tailwind CSS",
    "Git", "GitHub", "GitLab", "BitBucket", "SVN", "Mercurial",
    "Linux", "Unix", "Windows", "MacOS", "iOS", "Android",
    "REST API", "GraphQL", "WebSockets", "JSON", "XML", "YAML",
    "TensorFlow", "PyTorch", "Keras", "Scikit-learn", "Pandas", "NumPy",
    "R", "Tableau", "Power BI", "Matplotlib", "Seaborn", "D3.js",
    "Testing", "Unit Testing", "Integration Testing", "QA", "Selenium",
    "Microservices", "Serverless", "Blockchain", "Cybersecurity",
    "Content Writing", "Copywriting", "Technical Writing", "Editing",
    "Sales", "Marketing", "SEO", "SEM", "Social Media", "Email Marketing",
    "Analytics", "Data Analysis", "Business Intelligence", "Forecasting",
    "Finance", "Accounting", "Budgeting", "Financial Analysis",
    "Human Resources", "Recruiting", "Talent Management", "Training",
    "Customer Service", "CRM", "Salesforce", "HubSpot", "Zoho",
    "Product Management", "Product Development", "Product Strategy",
    "UX Research", "User Testing", "Wireframing", "Prototyping",
    "Public Speaking", "Negotiation", "Presentation Skills", "Facilitation",
];

const DEFAULT_JOB_TITLES: &[&str] = &[
    "Software Engineer", "Software Developer", "Web Developer", "Frontend Developer",
    "Backend Developer", "Full Stack Developer", "Mobile Developer", "iOS Developer",
    "Android Developer", "DevOps Engineer", "Site Reliability Engineer", "Data Scientist",
    "Data Analyst", "Data Engineer", "Machine Learning Engineer", "AI Specialist",
    "Product Manager", "Project Manager", "Program Manager", "Scrum Master",
    "UX Designer", "UI Designer", "UI/UX Designer", "Graphic Designer", "Web Designer",
    "QA Engineer", "QA Analyst", "Test Engineer", "Automation Engineer", "Manual Tester",
    "Systems Administrator", "Network Engineer", "Network Administrator", "Security Engineer",
    "Cybersecurity Analyst", "Penetration Tester", "Security Architect", "Cloud Engineer",
    "Cloud Architect", "Solutions Architect", "Technical Architect", "Enterprise Architect",
    "CTO", "CIO", "IT Director", "VP of Engineering", "Engineering Manager",
    "Technical Lead", "Team Lead", "Tech Lead", "Principal Engineer", "Senior Engineer",
    "Junior Developer", "Intern", "Co-op", "Associate", "Consultant",
    "Freelancer", "Contractor", "Business Analyst", "Systems Analyst", "IT Support",
    "Technical Support", "Customer Support", "Help Desk", "Sales Engineer",
    "Pre-Sales Engineer", "Technical Account Manager", "Customer Success Manager",
    "Product Owner", "Director of Product", "VP of Product", "Chief Product Officer",
    "Marketing Manager", "Digital Marketing Specialist", "SEO Specialist", "Content Writer",
    "Technical Writer", "Documentation Specialist", "Instructional Designer", "Trainer",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let skills = load_skills(Path::new("/nonexistent/skills.csv"));
        assert_eq!(skills.len(), DEFAULT_SKILLS.len());
        assert_eq!(skills[0], "Python");
    }

    #[test]
    fn test_loads_named_column_in_order_without_duplicates() {
        let file = write_csv("id,skill\n1,Rust\n2, Go \n3,Rust\n4,\n");
        let skills = load_skills(file.path());
        assert_eq!(skills, vec!["Rust", "Go"]);
    }

    #[test]
    fn test_missing_column_falls_back_to_defaults() {
        let file = write_csv("name\nSoftware Engineer\n");
        let titles = load_job_titles(file.path());
        assert_eq!(titles.len(), DEFAULT_JOB_TITLES.len());
    }

    #[test]
    fn test_header_only_file_yields_empty_vocabulary() {
        let file = write_csv("title\n");
        assert!(load_job_titles(file.path()).is_empty());
    }

    #[test]
    fn test_read_column_reports_missing_column() {
        let file = write_csv("name\nx\n");
        let err = read_column(file.path(), TITLE_COLUMN).unwrap_err();
        assert!(matches!(err, VocabularyError::MissingColumn { .. }));
    }

    #[test]
    fn test_builtin_vocabularies_are_populated() {
        let v = Vocabularies::builtin();
        assert!(v.skills.contains(&"Kubernetes".to_string()));
        assert!(v.job_titles.contains(&"Data Scientist".to_string()));
    }
}
