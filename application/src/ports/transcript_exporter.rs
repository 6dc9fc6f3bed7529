//! Port for writing exported transcripts and summaries.

use interrogation_domain::{DomainError, ExportDocument};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Nothing to export: {0}")]
    NothingToExport(String),

    #[error("No exporter configured")]
    NotConfigured,

    #[error("Export failed: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DomainError> for ExportError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::NothingToExport(reason) => ExportError::NothingToExport(reason),
            other => ExportError::NothingToExport(other.to_string()),
        }
    }
}

/// Writes an [`ExportDocument`] somewhere durable and reports where.
pub trait TranscriptExporter: Send + Sync {
    fn export(&self, document: &ExportDocument) -> Result<PathBuf, ExportError>;
}
