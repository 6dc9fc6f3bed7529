//! Parsing of the structured case-details response.
//!
//! The model is asked for a single JSON object but frequently wraps it in a
//! markdown code fence (` ```json ... ``` `). The fence is stripped before
//! the payload is validated.

use super::entities::CaseDetails;
use crate::core::error::DomainError;
use crate::util::truncate_str;

/// Remove one optional surrounding code fence (with optional language tag).
///
/// Text that is not fully enclosed in a fence is returned trimmed but
/// otherwise unchanged.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    else {
        return trimmed;
    };

    // Skip the language tag (```json)
    let body = inner.trim_start_matches(|c: char| c.is_alphanumeric() || c == '_');
    let body = body.trim();
    if body.is_empty() { trimmed } else { body }
}

/// Parse case details from the raw model output.
///
/// Fails when the payload is not JSON after fence stripping, or when any of
/// `overview` (string), `issues` and `plan` (arrays of strings) is absent or
/// has the wrong shape. The number of issues is not enforced.
pub fn parse_case_details(raw: &str) -> Result<CaseDetails, DomainError> {
    let payload = strip_code_fence(raw);
    serde_json::from_str::<CaseDetails>(payload).map_err(|e| {
        DomainError::MalformedCaseDetails(format!(
            "{} (response started with: {:?})",
            e,
            truncate_str(payload, 100)
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fence() {
        let text = "```json\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fence(text), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_bare_fence() {
        let text = "  ```\n{\"a\": 1}\n```  ";
        assert_eq!(strip_code_fence(text), "{\"a\": 1}");
    }

    #[test]
    fn test_unfenced_text_is_trimmed_only() {
        assert_eq!(strip_code_fence("  {\"a\": 1}\n"), "{\"a\": 1}");
    }

    #[test]
    fn test_unbalanced_fence_left_alone() {
        let text = "```json\n{\"a\": 1}";
        assert_eq!(strip_code_fence(text), text);
    }

    #[test]
    fn test_parse_fenced_case_details() {
        let raw = r#"```json
{"overview": "O", "issues": ["I1", "I2"], "plan": ["S1"]}
```"#;
        let details = parse_case_details(raw).unwrap();
        assert_eq!(details.overview, "O");
        assert_eq!(details.issues, vec!["I1", "I2"]);
        assert_eq!(details.plan, vec!["S1"]);
    }

    #[test]
    fn test_parse_ignores_extra_keys() {
        let raw = r#"{"overview": "O", "issues": [], "plan": [], "notes": "x"}"#;
        assert!(parse_case_details(raw).is_ok());
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = parse_case_details("Here is your case: overview...").unwrap_err();
        assert!(matches!(err, DomainError::MalformedCaseDetails(_)));
    }

    #[test]
    fn test_missing_key_is_malformed() {
        let raw = r#"{"overview": "O", "issues": ["I1"]}"#;
        assert!(matches!(
            parse_case_details(raw),
            Err(DomainError::MalformedCaseDetails(_))
        ));
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        let raw = r#"{"overview": "O", "issues": "I1", "plan": ["S1"]}"#;
        assert!(parse_case_details(raw).is_err());

        let raw = r#"{"overview": 3, "issues": [], "plan": []}"#;
        assert!(parse_case_details(raw).is_err());
    }

    #[test]
    fn test_empty_overview_is_structurally_valid() {
        let raw = r#"{"overview": "", "issues": [], "plan": []}"#;
        let details = parse_case_details(raw).unwrap();
        assert!(details.usable_overview().is_none());
    }
}
