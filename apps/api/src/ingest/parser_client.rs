//! Primary structured-extraction collaborator.
//!
//! `AppState` holds an `Arc<dyn ResumeParser>`, chosen at startup:
//! `RemoteResumeParser` when `RESUME_PARSER_URL` is set, otherwise
//! `UnconfiguredParser`, which always defers to the fallback extractor.

use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::{debug, info};

use crate::analysis::{ParseError, StructuredRecord};

#[async_trait]
pub trait ResumeParser: Send + Sync {
    async fn parse(&self, path: &Path, file_name: &str) -> Result<StructuredRecord, ParseError>;
}

/// Posts the document to an external résumé-parsing service and reads back a
/// JSON record.
pub struct RemoteResumeParser {
    client: Client,
    endpoint: String,
}

impl RemoteResumeParser {
    pub fn new(client: Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl ResumeParser for RemoteResumeParser {
    async fn parse(&self, path: &Path, file_name: &str) -> Result<StructuredRecord, ParseError> {
        let content = tokio::fs::read(path)
            .await
            .map_err(|e| ParseError::Request(format!("failed to read {}: {e}", path.display())))?;

        let form = Form::new().part("file", Part::bytes(content).file_name(file_name.to_string()));

        debug!("Calling resume parser: {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ParseError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ParseError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let record: StructuredRecord = response
            .json()
            .await
            .map_err(|e| ParseError::Malformed(e.to_string()))?;
        info!("Resume parsed successfully for {file_name}");
        Ok(record)
    }
}

/// Used when no parser service is configured.
pub struct UnconfiguredParser;

#[async_trait]
impl ResumeParser for UnconfiguredParser {
    async fn parse(&self, _path: &Path, _file_name: &str) -> Result<StructuredRecord, ParseError> {
        Err(ParseError::Unavailable)
    }
}
