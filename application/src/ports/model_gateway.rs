//! Model Gateway port
//!
//! Defines the interface for the hosted generative-language service. The
//! gateway performs no retries: every failure reaches the caller as one of
//! the [`GatewayError`] kinds.

use async_trait::async_trait;
use interrogation_domain::{
    CaseDetails, CharacterRole, ConversationHandle, Credential, DomainError, HistoryTurn,
};
use thiserror::Error;

/// Errors that can occur during gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Empty response: {0}")]
    EmptyResponse(String),

    #[error("Transport failure: {0}")]
    TransportFailure(String),
}

impl From<DomainError> for GatewayError {
    fn from(error: DomainError) -> Self {
        GatewayError::MalformedResponse(error.to_string())
    }
}

/// One persona turn to send.
#[derive(Debug, Clone, Copy)]
pub struct TurnRequest<'a> {
    pub role: CharacterRole,
    /// Fully rendered prompt for this turn.
    pub prompt: &'a str,
    /// The investigator's words alone, as recorded in the transcript.
    pub utterance: &'a str,
    /// Existing conversation, or `None` to start one.
    pub handle: Option<&'a ConversationHandle>,
    /// Installed only when a new conversation is created.
    pub system_instruction: &'a str,
    /// Seed history, passed only when `handle` is `None`.
    pub prior_history: Option<&'a [HistoryTurn]>,
}

/// Reply text plus the conversation handle to store for the next turn.
#[derive(Debug, Clone)]
pub struct TurnReply {
    pub text: String,
    pub handle: ConversationHandle,
}

/// Gateway for model communication
///
/// This port defines how the application layer talks to the generative
/// model. Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Generate structured case details from a precedent.
    ///
    /// Fails with [`GatewayError::MalformedResponse`] when the output is
    /// not a JSON object with `overview`, `issues`, and `plan`.
    async fn generate_case_details(
        &self,
        credential: &Credential,
        precedent: &str,
    ) -> Result<CaseDetails, GatewayError>;

    /// Generate the complaint letter for a case overview.
    async fn generate_complaint(
        &self,
        credential: &Credential,
        overview: &str,
    ) -> Result<String, GatewayError>;

    /// Send one persona turn, creating the conversation if needed.
    async fn exchange_turn(
        &self,
        credential: &Credential,
        request: TurnRequest<'_>,
    ) -> Result<TurnReply, GatewayError>;

    /// Summarize a flattened transcript.
    async fn summarize(
        &self,
        credential: &Credential,
        raw_transcript: &str,
    ) -> Result<String, GatewayError>;
}
