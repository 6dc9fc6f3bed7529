//! Case entities produced by the case pipeline.

use serde::{Deserialize, Serialize};

/// Complaint text used when the generated case carries no overview.
pub const COMPLAINT_UNAVAILABLE: &str =
    "No case overview is available, so a complaint cannot be generated.";

/// Structured case produced once from a legal precedent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseDetails {
    pub overview: String,
    pub issues: Vec<String>,
    pub plan: Vec<String>,
}

impl CaseDetails {
    /// Overview, if it carries any non-whitespace text.
    pub fn usable_overview(&self) -> Option<&str> {
        let overview = self.overview.trim();
        if overview.is_empty() {
            None
        } else {
            Some(&self.overview)
        }
    }
}

/// Complaint letter state after the pipeline ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Complaint {
    Generated(String),
    /// The overview was empty, so no remote call was made.
    Placeholder,
}

impl Complaint {
    pub fn text(&self) -> &str {
        match self {
            Complaint::Generated(text) => text,
            Complaint::Placeholder => COMPLAINT_UNAVAILABLE,
        }
    }
}
