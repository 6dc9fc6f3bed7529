//! Mapping of HTTP and transport failures onto [`GatewayError`] kinds.

use super::protocol::{ApiErrorBody, GenerateContentResponse};
use interrogation_application::GatewayError;
use interrogation_domain::util::truncate_str;

/// Marker the service puts in the message of a rejected key.
const INVALID_KEY_MARKER: &str = "API key not valid";

/// Classify a non-success HTTP response.
pub fn classify_status(status: u16, body: &str) -> GatewayError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| truncate_str(body.trim(), 200).to_string());

    if status == 401 || status == 403 || message.contains(INVALID_KEY_MARKER) {
        return GatewayError::InvalidCredential(message);
    }

    GatewayError::TransportFailure(format!("HTTP {}: {}", status, message))
}

/// Classify a network-level failure.
pub fn classify_transport(error: &reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::TransportFailure("request timed out".to_string())
    } else if error.is_connect() {
        GatewayError::TransportFailure(format!("connection failed: {}", error))
    } else {
        GatewayError::TransportFailure(error.to_string())
    }
}

/// Pull the reply text out of a successful response body.
///
/// Absent or whitespace-only text is [`GatewayError::EmptyResponse`]. A body
/// that is not a `generateContent` response is a remote failure
/// ([`GatewayError::TransportFailure`]); `MalformedResponse` is left to the
/// case-details parser.
pub fn extract_text(body: &str) -> Result<String, GatewayError> {
    let response: GenerateContentResponse = serde_json::from_str(body).map_err(|e| {
        GatewayError::TransportFailure(format!(
            "unreadable response body ({}): {}",
            e,
            truncate_str(body, 100)
        ))
    })?;

    match response.text() {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(GatewayError::EmptyResponse(response.empty_reason())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_key_message_maps_to_credential_error() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT"}}"#;
        assert!(matches!(
            classify_status(400, body),
            GatewayError::InvalidCredential(m) if m.starts_with("API key not valid")
        ));
    }

    #[test]
    fn test_auth_statuses_map_to_credential_error() {
        assert!(matches!(
            classify_status(401, "unauthorized"),
            GatewayError::InvalidCredential(_)
        ));
        assert!(matches!(
            classify_status(403, r#"{"error": {"message": "permission denied"}}"#),
            GatewayError::InvalidCredential(_)
        ));
    }

    #[test]
    fn test_other_statuses_are_transport_failures() {
        let body = r#"{"error": {"code": 503, "message": "The model is overloaded."}}"#;
        assert_eq!(
            classify_status(503, body),
            GatewayError::TransportFailure("HTTP 503: The model is overloaded.".to_string())
        );
        assert_eq!(
            classify_status(502, "<html>Bad Gateway</html>"),
            GatewayError::TransportFailure("HTTP 502: <html>Bad Gateway</html>".to_string())
        );
    }

    #[test]
    fn test_extract_text() {
        let body = r#"{"candidates": [{"content": {"parts": [{"text": "I saw him."}]}}]}"#;
        assert_eq!(extract_text(body).unwrap(), "I saw him.");
    }

    #[test]
    fn test_whitespace_reply_is_empty() {
        let body = r#"{"candidates": [{"content": {"parts": [{"text": "  \n"}]}, "finishReason": "STOP"}]}"#;
        assert!(matches!(extract_text(body), Err(GatewayError::EmptyResponse(_))));
    }

    #[test]
    fn test_unreadable_body_is_transport_failure() {
        assert!(matches!(
            extract_text("not json"),
            Err(GatewayError::TransportFailure(m)) if m.contains("not json")
        ));
    }
}
