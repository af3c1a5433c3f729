//! Staging of uploaded and downloaded documents.
//!
//! Documents are written to named temp files under the upload folder, keeping
//! their extension so the extractor can pick a format. The file is removed
//! when the `StagedDocument` is dropped.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::bail;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::Client;
use tempfile::NamedTempFile;
use tracing::{info, warn};

pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "docx", "doc", "txt", "rtf", "jpg", "jpeg", "png"];

const FALLBACK_FILE_NAME: &str = "document";

#[derive(Debug)]
pub struct StagedDocument {
    file: NamedTempFile,
    file_name: String,
}

impl StagedDocument {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Sanitised original file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Removes the staged file now, logging instead of failing.
    pub fn cleanup(self) {
        let path: PathBuf = self.file.path().to_path_buf();
        match self.file.close() {
            Ok(()) => info!("Temporary file removed: {}", path.display()),
            Err(e) => warn!("Error removing temporary file {}: {e}", path.display()),
        }
    }
}

pub fn allowed_file(file_name: &str) -> bool {
    extension_of(file_name)
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Reduces a client-supplied file name to a safe basename of ASCII letters,
/// digits, `.`, `-` and `_`.
pub fn secure_filename(file_name: &str) -> String {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    let cleaned = cleaned.trim_matches(|c| c == '.' || c == '_').to_string();
    if cleaned.is_empty() {
        FALLBACK_FILE_NAME.to_string()
    } else {
        cleaned
    }
}

fn extension_of(file_name: &str) -> Option<String> {
    let (_, ext) = file_name.rsplit_once('.')?;
    (!ext.is_empty()).then(|| ext.to_lowercase())
}

/// Writes `data` to a new temp file in `dir`.
pub fn stage_bytes(dir: &Path, file_name: &str, data: &[u8]) -> std::io::Result<StagedDocument> {
    let file_name = secure_filename(file_name);
    let suffix = extension_of(&file_name)
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default();

    let mut file = tempfile::Builder::new()
        .prefix("cv-")
        .suffix(&suffix)
        .tempfile_in(dir)?;
    file.write_all(data)?;
    file.flush()?;

    info!("File staged: {} ({} bytes)", file.path().display(), data.len());
    Ok(StagedDocument { file, file_name })
}

/// Downloads a document and stages it. The file name comes from the
/// `Content-Disposition` header when present, else from the URL path.
///
/// Bodies larger than `max_bytes` are rejected, whether announced by
/// `Content-Length` or discovered while streaming.
pub async fn download_document(
    client: &Client,
    url: &str,
    dir: &Path,
    max_bytes: usize,
) -> anyhow::Result<StagedDocument> {
    let mut response = client.get(url).send().await?.error_for_status()?;

    if let Some(length) = response.content_length() {
        if length > max_bytes as u64 {
            bail!("remote document is {length} bytes, limit is {max_bytes}");
        }
    }

    let file_name = response
        .headers()
        .get(CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .and_then(disposition_file_name)
        .unwrap_or_else(|| url_file_name(url));

    let mut data = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if data.len() + chunk.len() > max_bytes {
            bail!("remote document exceeds limit of {max_bytes} bytes");
        }
        data.extend_from_slice(&chunk);
    }

    let staged = stage_bytes(dir, &file_name, &data)?;
    info!("File downloaded from {url} to {}", staged.path().display());
    Ok(staged)
}

fn disposition_file_name(header: &str) -> Option<String> {
    let (_, rest) = header.split_once("filename=")?;
    let name = rest
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .trim_matches(|c| c == '"' || c == '\'');
    (!name.is_empty()).then(|| name.to_string())
}

fn url_file_name(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    path.rsplit('/').next().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_file_checks_extension_case_insensitively() {
        assert!(allowed_file("cv.PDF"));
        assert!(allowed_file("my.cv.docx"));
        assert!(!allowed_file("cv.exe"));
        assert!(!allowed_file("cv"));
        assert!(!allowed_file("cv."));
    }

    #[test]
    fn test_secure_filename_strips_paths_and_unsafe_chars() {
        assert_eq!(secure_filename("../../etc/passwd"), "passwd");
        assert_eq!(secure_filename("C:\\Users\\me\\My CV (final).pdf"), "My_CV_final.pdf");
        assert_eq!(secure_filename("..."), FALLBACK_FILE_NAME);
        assert_eq!(secure_filename(".hidden.txt"), "hidden.txt");
    }

    #[test]
    fn test_stage_bytes_keeps_extension_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let staged = stage_bytes(dir.path(), "Jane Doe.TXT", b"hello").unwrap();
        let path = staged.path().to_path_buf();

        assert_eq!(staged.file_name(), "Jane_Doe.TXT");
        assert_eq!(path.extension().unwrap(), "txt");
        assert_eq!(std::fs::read(&path).unwrap(), b"hello");

        staged.cleanup();
        assert!(!path.exists());
    }

    #[test]
    fn test_disposition_file_name() {
        assert_eq!(
            disposition_file_name("attachment; filename=\"cv.pdf\"").as_deref(),
            Some("cv.pdf")
        );
        assert_eq!(
            disposition_file_name("attachment; filename=cv.txt; size=10").as_deref(),
            Some("cv.txt")
        );
        assert_eq!(disposition_file_name("inline"), None);
    }

    #[test]
    fn test_url_file_name_ignores_query() {
        assert_eq!(url_file_name("https://x.io/files/cv.pdf?token=1"), "cv.pdf");
        assert_eq!(url_file_name("https://x.io/"), "");
    }
}
