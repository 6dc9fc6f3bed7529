//! Caller-supplied credential for the model service.

use crate::core::error::DomainError;
use std::fmt;

/// An API credential held only in process memory.
///
/// `Debug` and `Display` never reveal the secret; only the last four
/// characters survive masking.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Build a credential from raw operator input (trimmed, must be non-empty).
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyInput("Credential"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The secret value, for the gateway adapter only.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// `****` followed by the last four characters.
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
        format!("****{}", tail)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&self.masked()).finish()
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}
