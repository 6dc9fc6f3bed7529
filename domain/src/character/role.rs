//! Character roles available for interrogation.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of characters an investigator can question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterRole {
    Complainant,
    Witness,
    Suspect,
}

impl CharacterRole {
    /// Every role, in display order.
    pub const ALL: [CharacterRole; 3] = [
        CharacterRole::Complainant,
        CharacterRole::Witness,
        CharacterRole::Suspect,
    ];

    /// Stable machine identifier (config keys, log payloads, file names).
    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterRole::Complainant => "complainant",
            CharacterRole::Witness => "witness",
            CharacterRole::Suspect => "suspect",
        }
    }

    /// Human-readable label used for display and transcript attribution.
    pub fn label(&self) -> &'static str {
        match self {
            CharacterRole::Complainant => "Complainant",
            CharacterRole::Witness => "Witness",
            CharacterRole::Suspect => "Suspect",
        }
    }
}

impl fmt::Display for CharacterRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CharacterRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "complainant" | "c" => Ok(CharacterRole::Complainant),
            "witness" | "w" => Ok(CharacterRole::Witness),
            "suspect" | "s" => Ok(CharacterRole::Suspect),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role_case_insensitive() {
        assert_eq!(
            "Suspect".parse::<CharacterRole>().unwrap(),
            CharacterRole::Suspect
        );
        assert_eq!(
            " WITNESS ".parse::<CharacterRole>().unwrap(),
            CharacterRole::Witness
        );
        assert_eq!("c".parse::<CharacterRole>().unwrap(), CharacterRole::Complainant);
    }

    #[test]
    fn test_parse_unknown_role() {
        assert!(matches!(
            "judge".parse::<CharacterRole>(),
            Err(DomainError::UnknownRole(_))
        ));
    }

    #[test]
    fn test_label_independent_of_identifier() {
        for role in CharacterRole::ALL {
            assert_eq!(role.label().to_lowercase(), role.as_str());
            assert_eq!(role.to_string(), role.label());
        }
    }

    #[test]
    fn test_serde_uses_identifier() {
        let json = serde_json::to_string(&CharacterRole::Witness).unwrap();
        assert_eq!(json, "\"witness\"");
    }
}
