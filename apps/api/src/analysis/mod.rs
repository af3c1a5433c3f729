// CV analysis engine: fallback extraction, section analyzers, scoring,
// summary and recommendations. Synchronous and CPU-only; all I/O lives in
// `ingest`.

pub mod analyzer;
pub mod basic_info;
pub mod error;
pub mod experience;
pub mod extraction;
pub mod models;
pub mod patterns;
pub mod scoring;
pub mod skill_gap;
pub mod skills_section;
pub mod summary;
pub mod tables;
pub mod vocabulary;

// Re-export the public API consumed by the HTTP layer.
pub use analyzer::Analyzer;
pub use error::{ExtractionError, ParseError};
pub use models::{AnalysisReport, RawDocument, StructuredRecord};
pub use tables::ReferenceTables;
pub use vocabulary::Vocabularies;
