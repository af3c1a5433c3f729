//! Axum route handler for the analysis API.

use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use tracing::{error, info};

use crate::analysis::{AnalysisReport, ExtractionError, RawDocument};
use crate::errors::AppError;
use crate::ingest::text_extract::extract_document;
use crate::ingest::upload::{allowed_file, download_document, stage_bytes, StagedDocument, ALLOWED_EXTENSIONS};
use crate::state::AppState;

/// Fields of the `POST /analyze` multipart form.
#[derive(Debug, Default)]
struct AnalyzeForm {
    file: Option<(String, Bytes)>,
    file_url: Option<String>,
    extracted_text: Option<String>,
}

/// POST /analyze
///
/// Accepts `file` (upload) or `file_url` (download), plus optional
/// `extracted_text` that replaces text extraction. Always answers with a
/// complete report once a document has been staged.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisReport>, AppError> {
    let form = read_form(multipart).await?;
    let staged = stage_document(&state, &form).await?;

    let report = analyze_staged(&state, &staged, form.extracted_text).await;

    staged.cleanup();
    Ok(Json(report))
}

async fn read_form(mut multipart: Multipart) -> Result<AnalyzeForm, AppError> {
    let mut form = AnalyzeForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid file: {e}")))?;
                form.file = Some((file_name, data));
            }
            "file_url" | "extracted_text" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid field '{name}': {e}")))?;
                if name == "file_url" {
                    form.file_url = Some(value);
                } else {
                    form.extracted_text = Some(value);
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn stage_document(state: &AppState, form: &AnalyzeForm) -> Result<StagedDocument, AppError> {
    let upload_dir = &state.config.upload_dir;

    if let Some((file_name, data)) = &form.file {
        if file_name.is_empty() {
            return Err(AppError::Validation("No file selected".to_string()));
        }
        if !allowed_file(file_name) {
            return Err(AppError::Validation(format!(
                "File type not allowed. Allowed types: {}",
                ALLOWED_EXTENSIONS.join(", ")
            )));
        }
        let staged = stage_bytes(upload_dir, file_name, data)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to store upload: {e}")))?;
        info!("File uploaded: {}", staged.path().display());
        return Ok(staged);
    }

    if let Some(url) = &form.file_url {
        let limit = state.config.max_content_length;
        return download_document(&state.http, url, upload_dir, limit)
            .await
            .map_err(|e| {
                error!("Error downloading file from {url}: {e:#}");
                AppError::Download("Failed to download file from URL".to_string())
            });
    }

    Err(AppError::Validation(
        "No file or file URL provided".to_string(),
    ))
}

/// Obtains text and structured data from the collaborators, then hands both
/// results to the analyzer.
async fn analyze_staged(
    state: &AppState,
    staged: &StagedDocument,
    extracted_text: Option<String>,
) -> AnalysisReport {
    let document = match extracted_text.filter(|t| !t.trim().is_empty()) {
        Some(text) => Ok(RawDocument::from_text(text)),
        None => {
            let path = staged.path().to_path_buf();
            tokio::task::spawn_blocking(move || extract_document(&path))
                .await
                .unwrap_or_else(|e| Err(ExtractionError::Task(e.to_string())))
        }
    };

    let parsed = state.parser.parse(staged.path(), staged.file_name()).await;

    state.analyzer.process(document, parsed)
}
