//! Transcript and summary export.

mod text_file;

pub use text_file::TextFileExporter;
