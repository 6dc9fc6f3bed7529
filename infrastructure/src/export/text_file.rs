//! Plain-text [`TranscriptExporter`] writing into a directory.

use interrogation_application::ports::transcript_exporter::{ExportError, TranscriptExporter};
use interrogation_domain::ExportDocument;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes each document to `<dir>/<Title>_<YYYY-MM-DD>.txt`.
///
/// An existing file with the same name is overwritten.
pub struct TextFileExporter {
    dir: PathBuf,
}

impl TextFileExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl TranscriptExporter for TextFileExporter {
    fn export(&self, document: &ExportDocument) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(&self.dir)?;

        let file_name = document.file_name(chrono::Local::now().date_naive());
        let path = self.dir.join(file_name);
        std::fs::write(&path, document.render())?;

        debug!("Wrote {} lines to {}", document.lines.len(), path.display());
        Ok(path)
    }
}
