mod analysis;
mod config;
mod errors;
mod ingest;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::{Analyzer, ReferenceTables, Vocabularies};
use crate::config::Config;
use crate::ingest::parser_client::{RemoteResumeParser, ResumeParser, UnconfiguredParser};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV Analyzer v{}", env!("CARGO_PKG_VERSION"));

    // Reference data is loaded once and shared read-only
    let vocabularies = Vocabularies::load(&config.skills_db_path, &config.job_titles_db_path);
    let tables = ReferenceTables::load(config.analysis_tables_path.as_deref());
    let analyzer = Arc::new(Analyzer::new(vocabularies, tables)?);

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.download_timeout_secs))
        .build()
        .context("Failed to build HTTP client")?;

    let parser: Arc<dyn ResumeParser> = match &config.resume_parser_url {
        Some(url) => {
            info!("Resume parser service: {url}");
            Arc::new(RemoteResumeParser::new(http.clone(), url.clone()))
        }
        None => {
            info!("No resume parser configured; using basic extraction");
            Arc::new(UnconfiguredParser)
        }
    };

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| format!("Failed to create upload folder {}", config.upload_dir.display()))?;
    info!("Upload folder: {}", config.upload_dir.display());

    let state = AppState {
        analyzer,
        parser,
        http,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
