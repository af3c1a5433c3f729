use thiserror::Error;

/// Failure of the text-extraction collaborator. Unsupported formats are not
/// errors; they yield an empty document instead.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),

    #[error("unreadable PDF: {0}")]
    Pdf(String),

    #[error("unreadable DOCX: {0}")]
    Docx(String),

    #[error("extraction task failed: {0}")]
    Task(String),
}

/// Failure of the primary structured-extraction collaborator.
/// Always recovered by the fallback extractor.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no resume parser configured")]
    Unavailable,

    #[error("resume parser request failed: {0}")]
    Request(String),

    #[error("resume parser returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("resume parser returned malformed data: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("internal analysis failure: {0}")]
    Panicked(String),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}
