//! Plain-text export documents for transcripts and summaries.

use crate::character::role::CharacterRole;
use crate::core::error::DomainError;
use crate::session::entities::Transcript;
use chrono::{Local, NaiveDate};

const SEPARATOR: &str = "--------------------";

/// Which per-role record to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Transcript,
    Summary,
}

/// A titled, line-oriented document ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub title: String,
    pub lines: Vec<String>,
}

impl ExportDocument {
    /// Raw log: header line per message with local time, indented body, separator.
    pub fn from_transcript(
        role: CharacterRole,
        transcript: &Transcript,
    ) -> Result<Self, DomainError> {
        if transcript.is_empty() {
            return Err(DomainError::NothingToExport(format!(
                "no conversation with the {} yet",
                role.label()
            )));
        }

        let mut lines = Vec::new();
        for message in transcript.messages() {
            let time = message.timestamp.with_timezone(&Local).format("%H:%M:%S");
            lines.push(format!("{} ({}):", message.sender.attribution(role), time));
            lines.extend(message.text.lines().map(|line| format!("  {}", line)));
            lines.push(SEPARATOR.to_string());
        }

        Ok(Self {
            title: format!("{} Transcript", role.label()),
            lines,
        })
    }

    pub fn from_summary(role: CharacterRole, summary: Option<&str>) -> Result<Self, DomainError> {
        let summary = summary
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                DomainError::NothingToExport(format!("no summary for the {} yet", role.label()))
            })?;

        Ok(Self {
            title: format!("{} Summary", role.label()),
            lines: summary.lines().map(str::to_string).collect(),
        })
    }

    /// `<Title_With_Underscores>_<YYYY-MM-DD>.txt`
    pub fn file_name(&self, date: NaiveDate) -> String {
        let stem = self.title.split_whitespace().collect::<Vec<_>>().join("_");
        format!("{}_{}.txt", stem, date.format("%Y-%m-%d"))
    }

    /// Title, blank line, then body lines.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.title.len() + 2);
        out.push_str(&self.title);
        out.push_str("\n\n");
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}
