//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed case details: {0}")]
    MalformedCaseDetails(String),

    #[error("Unknown character role: {0}")]
    UnknownRole(String),

    #[error("{0} must not be empty")]
    EmptyInput(&'static str),

    #[error("Nothing to export: {0}")]
    NothingToExport(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_display() {
        let error = DomainError::EmptyInput("Precedent text");
        assert_eq!(error.to_string(), "Precedent text must not be empty");
    }

    #[test]
    fn test_unknown_role_display() {
        let error = DomainError::UnknownRole("judge".to_string());
        assert_eq!(error.to_string(), "Unknown character role: judge");
    }
}
