use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Plain text of a document as produced by the text-extraction collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDocument {
    pub text: String,
    pub page_count: u32,
}

impl RawDocument {
    pub fn new(text: impl Into<String>, page_count: u32) -> Self {
        Self {
            text: text.into(),
            page_count,
        }
    }

    /// Text supplied by the caller rather than extracted; page count unknown.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(text, 0)
    }
}

/// Best-effort structured extraction of a CV.
///
/// Missing data is always represented by emptiness, never by an absent field.
/// Deserialization accepts the field names used by common résumé parsers
/// (`mobile_number`, `designation`, `no_of_pages`, ...) as well as `null`,
/// numeric and list values where a string is expected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StructuredRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(alias = "mobile_number", deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient_list")]
    pub skills: Vec<String>,
    #[serde(alias = "designation", deserialize_with = "lenient_list")]
    pub designations: Vec<String>,
    #[serde(alias = "company_names", deserialize_with = "lenient_list")]
    pub company_names: Vec<String>,
    #[serde(alias = "total_experience", deserialize_with = "lenient_string")]
    pub total_experience: String,
    #[serde(deserialize_with = "lenient_string")]
    pub degree: String,
    #[serde(deserialize_with = "lenient_string")]
    pub location: String,
    #[serde(alias = "no_of_pages", deserialize_with = "lenient_count")]
    pub page_count: u32,
}

impl StructuredRecord {
    /// True when the record carries nothing an analyzer could use.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.email.is_empty()
            && self.phone.is_empty()
            && self.skills.is_empty()
            && self.designations.is_empty()
            && self.company_names.is_empty()
            && self.total_experience.is_empty()
            && self.degree.is_empty()
            && self.location.is_empty()
    }
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => {
            // Parsers report experience as a float; 0 means "unknown".
            if n.as_f64() == Some(0.0) {
                String::new()
            } else {
                n.to_string()
            }
        }
        Value::Bool(_) | Value::Object(_) => String::new(),
        Value::Array(items) => items
            .into_iter()
            .map(value_to_string)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_string(Value::deserialize(deserializer)?))
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().map(value_to_string).collect(),
        other => vec![value_to_string(other)],
    };
    Ok(items.into_iter().filter(|s| !s.is_empty()).collect())
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let count = match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().map(|f| f.max(0.0) as u64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    };
    Ok(u32::try_from(count).unwrap_or(u32::MAX))
}

/// Contact-information completeness of a CV.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfoAnalysis {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    /// Never populated by the current extractors; kept for wire compatibility.
    pub linkedin: String,
    /// 0 – 100
    pub completeness: u8,
    pub suggestions: Vec<String>,
}

/// Experience-section quality of a CV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceAnalysis {
    pub years: String,
    pub companies: Vec<String>,
    pub roles: Vec<String>,
    /// 1 – 10
    pub quality: u8,
    pub suggestions: Vec<String>,
}

impl Default for ExperienceAnalysis {
    fn default() -> Self {
        Self {
            years: String::new(),
            companies: vec![],
            roles: vec![],
            quality: 5,
            suggestions: vec![],
        }
    }
}

/// Full analysis returned to callers. Field names are a wire contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// 1 – 10
    #[serde(rename = "score")]
    pub overall_score: u8,
    pub summary: String,
    pub basic_info: BasicInfoAnalysis,
    pub experience: ExperienceAnalysis,
    pub skills: Vec<String>,
    /// At most five entries.
    pub missing_skills: Vec<String>,
    pub skills_suggestions: String,
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<StructuredRecord>,
}
