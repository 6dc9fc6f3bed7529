//! Gemini HTTP gateway implementing [`ModelGateway`].

use super::conversation::GeminiConversation;
use super::error::{classify_status, classify_transport, extract_text};
use super::protocol::GenerateContentRequest;
use crate::config::FileGeminiConfig;
use async_trait::async_trait;
use interrogation_application::ports::model_gateway::{
    GatewayError, ModelGateway, TurnReply, TurnRequest,
};
use interrogation_domain::{CaseDetails, Credential, PromptTemplate, parse_case_details};
use std::time::Duration;
use tracing::{debug, info};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Adapter for the Generative Language `generateContent` endpoint.
///
/// Stateless apart from the HTTP connection pool: persona conversation
/// state travels in the handles it returns.
pub struct GeminiGateway {
    client: reqwest::Client,
    config: FileGeminiConfig,
}

impl GeminiGateway {
    pub fn new(config: FileGeminiConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::TransportFailure(format!("HTTP client setup: {}", e)))?;

        info!(model = %config.model, "Gemini gateway ready");
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// POST one request and return the reply text.
    async fn generate(
        &self,
        credential: &Credential,
        request: &GenerateContentRequest,
    ) -> Result<String, GatewayError> {
        debug!(
            model = %self.config.model,
            key = %credential.masked(),
            temperature = request.generation_config.temperature,
            "Calling generateContent"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, credential.expose())
            .json(request)
            .send()
            .await
            .map_err(|e| classify_transport(&e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| classify_transport(&e))?;

        if !status.is_success() {
            return Err(classify_status(status.as_u16(), &body));
        }

        extract_text(&body)
    }
}

#[async_trait]
impl ModelGateway for GeminiGateway {
    async fn generate_case_details(
        &self,
        credential: &Credential,
        precedent: &str,
    ) -> Result<CaseDetails, GatewayError> {
        let request = GenerateContentRequest::prompt(
            PromptTemplate::case_details(precedent),
            self.config.case_temperature,
        )
        .expecting_json();

        let raw = self.generate(credential, &request).await?;
        Ok(parse_case_details(&raw)?)
    }

    async fn generate_complaint(
        &self,
        credential: &Credential,
        overview: &str,
    ) -> Result<String, GatewayError> {
        let request = GenerateContentRequest::prompt(
            PromptTemplate::complaint(overview),
            self.config.complaint_temperature,
        );
        self.generate(credential, &request).await
    }

    async fn exchange_turn(
        &self,
        credential: &Credential,
        request: TurnRequest<'_>,
    ) -> Result<TurnReply, GatewayError> {
        let conversation = match request.handle {
            Some(handle) => GeminiConversation::from_handle(handle).cloned().ok_or_else(|| {
                GatewayError::TransportFailure(format!(
                    "conversation handle for the {} was not created by this gateway",
                    request.role.label()
                ))
            })?,
            None => {
                debug!(role = request.role.as_str(), "Starting persona conversation");
                GeminiConversation::new(
                    request.role,
                    request.system_instruction,
                    request.prior_history.unwrap_or_default(),
                )
            }
        };

        let wire = GenerateContentRequest::prompt(request.prompt, self.config.turn_temperature)
            .with_system_instruction(conversation.system_instruction());

        let text = self.generate(credential, &wire).await?;
        let handle = conversation.with_exchange(request.utterance, &text).into_handle();

        Ok(TurnReply { text, handle })
    }

    async fn summarize(
        &self,
        credential: &Credential,
        raw_transcript: &str,
    ) -> Result<String, GatewayError> {
        let request = GenerateContentRequest::prompt(
            PromptTemplate::summary(raw_transcript),
            self.config.summary_temperature,
        );
        self.generate(credential, &request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use interrogation_domain::{CharacterRole, HistoryRole, HistoryTurn};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one canned HTTP response and hand back the raw request.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let task = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                if request_complete(&raw) {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&raw).to_string()
        });

        (format!("http://{}", addr), task)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        raw.len() >= header_end + 4 + content_length
    }

    fn request_body(raw: &str) -> serde_json::Value {
        let (_, body) = raw.split_once("\r\n\r\n").unwrap();
        serde_json::from_str(body).unwrap()
    }

    fn gateway(base_url: String) -> GeminiGateway {
        GeminiGateway::new(FileGeminiConfig {
            base_url,
            model: "test-model".to_string(),
            timeout_secs: 5,
            ..Default::default()
        })
        .unwrap()
    }

    fn credential() -> Credential {
        Credential::new("secret-key-9876").unwrap()
    }

    const REPLY: &str =
        r#"{"candidates": [{"content": {"role": "model", "parts": [{"text": "I was at home."}]}}]}"#;

    #[tokio::test]
    async fn test_case_details_request_and_parse() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"candidates": [{"content": {"parts": [{"text": "```json\n{\"overview\": \"O\", \"issues\": [\"I\"], \"plan\": [\"S\"]}\n```"}]}}]}"#,
        )
        .await;

        let details = gateway(base_url)
            .generate_case_details(&credential(), "A precedent")
            .await
            .unwrap();
        let raw = server.await.unwrap();

        assert_eq!(details.overview, "O");
        assert!(raw.starts_with("POST /v1beta/models/test-model:generateContent"));
        assert!(raw.to_lowercase().contains("x-goog-api-key: secret-key-9876"));
        let body = request_body(&raw);
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert!(
            body["contents"][0]["parts"][0]["text"]
                .as_str()
                .unwrap()
                .contains("A precedent")
        );
    }

    #[tokio::test]
    async fn test_case_details_missing_fields_is_malformed() {
        let (base_url, _server) = serve_once(
            "200 OK",
            r#"{"candidates": [{"content": {"parts": [{"text": "{\"overview\": \"O\"}"}]}}]}"#,
        )
        .await;

        let result = gateway(base_url)
            .generate_case_details(&credential(), "P")
            .await;
        assert!(matches!(result, Err(GatewayError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_unreadable_body_is_not_malformed_outside_case_details() {
        let (base_url, _server) = serve_once("200 OK", "<html>proxy page</html>").await;

        let result = gateway(base_url)
            .generate_complaint(&credential(), "O")
            .await;
        assert!(matches!(result, Err(GatewayError::TransportFailure(_))));
    }

    #[tokio::test]
    async fn test_rejected_key() {
        let (base_url, _server) = serve_once(
            "400 Bad Request",
            r#"{"error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT"}}"#,
        )
        .await;

        let result = gateway(base_url).summarize(&credential(), "log").await;
        assert!(matches!(result, Err(GatewayError::InvalidCredential(_))));
    }

    #[tokio::test]
    async fn test_empty_complaint() {
        let (base_url, _server) =
            serve_once("200 OK", r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).await;

        let result = gateway(base_url)
            .generate_complaint(&credential(), "O")
            .await;
        assert!(matches!(result, Err(GatewayError::EmptyResponse(_))));
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = gateway(format!("http://{}", addr))
            .summarize(&credential(), "log")
            .await;
        assert!(matches!(result, Err(GatewayError::TransportFailure(_))));
    }

    #[tokio::test]
    async fn test_first_turn_creates_conversation() {
        let (base_url, server) = serve_once("200 OK", REPLY).await;
        let prior = vec![HistoryTurn {
            role: HistoryRole::User,
            text: "Earlier question".to_string(),
        }];

        let reply = gateway(base_url)
            .exchange_turn(
                &credential(),
                TurnRequest {
                    role: CharacterRole::Witness,
                    prompt: "full prompt",
                    utterance: "Where were you?",
                    handle: None,
                    system_instruction: "You are the witness.",
                    prior_history: Some(&prior),
                },
            )
            .await
            .unwrap();
        let body = request_body(&server.await.unwrap());

        assert_eq!(reply.text, "I was at home.");
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "You are the witness.");
        // Only the rebuilt prompt goes on the wire
        assert_eq!(body["contents"].as_array().unwrap().len(), 1);

        let conversation = GeminiConversation::from_handle(&reply.handle).unwrap();
        assert_eq!(conversation.history().len(), 3);
        assert_eq!(conversation.history()[0].text, "Earlier question");
        assert_eq!(conversation.history()[1].text, "Where were you?");
    }

    #[tokio::test]
    async fn test_follow_up_turn_keeps_original_instruction() {
        let (base_url, server) = serve_once("200 OK", REPLY).await;
        let existing = GeminiConversation::new(CharacterRole::Suspect, "Original", &[])
            .with_exchange("q1", "a1")
            .into_handle();

        let reply = gateway(base_url)
            .exchange_turn(
                &credential(),
                TurnRequest {
                    role: CharacterRole::Suspect,
                    prompt: "full prompt with q1 and a1, then q2",
                    utterance: "q2",
                    handle: Some(&existing),
                    system_instruction: "Ignored",
                    prior_history: None,
                },
            )
            .await
            .unwrap();
        let body = request_body(&server.await.unwrap());

        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "Original");
        assert!(!reply.handle.same_as(&existing));
        let before = GeminiConversation::from_handle(&existing).unwrap();
        let after = GeminiConversation::from_handle(&reply.handle).unwrap();
        assert_eq!(before.history().len(), 2);
        assert_eq!(after.history().len(), 4);
        // The rebuilt prompt is sent but never accumulated in the handle
        assert_eq!(after.history()[2].text, "q2");
    }

    #[tokio::test]
    async fn test_foreign_handle_rejected() {
        let foreign = interrogation_domain::ConversationHandle::new("not ours");
        let result = gateway("http://127.0.0.1:9".to_string())
            .exchange_turn(
                &credential(),
                TurnRequest {
                    role: CharacterRole::Complainant,
                    prompt: "p",
                    utterance: "u",
                    handle: Some(&foreign),
                    system_instruction: "s",
                    prior_history: None,
                },
            )
            .await;
        assert!(matches!(result, Err(GatewayError::TransportFailure(_))));
    }
}
