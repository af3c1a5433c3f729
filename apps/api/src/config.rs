use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

const DEFAULT_MAX_CONTENT_LENGTH: usize = 20 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub upload_dir: PathBuf,
    pub max_content_length: usize,
    pub skills_db_path: PathBuf,
    pub job_titles_db_path: PathBuf,
    pub analysis_tables_path: Option<PathBuf>,
    pub resume_parser_url: Option<String>,
    pub download_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            rust_log: "info".to_string(),
            upload_dir: std::env::temp_dir(),
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
            skills_db_path: PathBuf::from("data/skills.csv"),
            job_titles_db_path: PathBuf::from("data/job_titles.csv"),
            analysis_tables_path: None,
            resume_parser_url: None,
            download_timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            upload_dir: optional_env("UPLOAD_FOLDER")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            max_content_length: parse_env("MAX_CONTENT_LENGTH", defaults.max_content_length)?,
            skills_db_path: optional_env("SKILLS_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.skills_db_path),
            job_titles_db_path: optional_env("JOB_TITLES_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.job_titles_db_path),
            analysis_tables_path: optional_env("ANALYSIS_TABLES_PATH").map(PathBuf::from),
            resume_parser_url: optional_env("RESUME_PARSER_URL"),
            download_timeout_secs: parse_env("DOWNLOAD_TIMEOUT_SECS", defaults.download_timeout_secs)?,
        })
    }
}

/// Set and non-blank variables only.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u16 = parse_env("CV_ANALYZER_TEST_UNSET_VAR", 5000).unwrap();
        assert_eq!(value, 5000);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("CV_ANALYZER_TEST_BAD_PORT", "eighty");
        let result: Result<u16> = parse_env("CV_ANALYZER_TEST_BAD_PORT", 5000);
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("CV_ANALYZER_TEST_BAD_PORT"), "{message}");
    }

    #[test]
    fn test_parse_env_reads_value() {
        std::env::set_var("CV_ANALYZER_TEST_TIMEOUT", " 45 ");
        let value: u64 = parse_env("CV_ANALYZER_TEST_TIMEOUT", 30).unwrap();
        assert_eq!(value, 45);
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.max_content_length, 20 * 1024 * 1024);
        assert!(config.resume_parser_url.is_none());
    }
}
