use std::sync::Arc;

use reqwest::Client as HttpClient;

use crate::analysis::Analyzer;
use crate::config::Config;
use crate::ingest::parser_client::ResumeParser;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Built once at startup; read-only afterwards.
    pub analyzer: Arc<Analyzer>,
    /// Primary structured parser. Remote service when configured, else a
    /// parser that always defers to the fallback extractor.
    pub parser: Arc<dyn ResumeParser>,
    pub http: HttpClient,
    pub config: Config,
}
