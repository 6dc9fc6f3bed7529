//! Conduct Turn use case.
//!
//! Executes one investigator → character exchange for a role:
//!
//! 1. Record the investigator's utterance (before any remote call)
//! 2. Render the persona prompt with the case overview and prior statements
//! 3. Exchange the turn through the [`ModelGateway`]
//! 4. Commit the reply and the new conversation handle
//! 5. Re-summarize the full transcript
//!
//! A failed exchange still leaves an audit trail: the utterance and a
//! synthesized error reply are both appended, and the handle is untouched.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::model_gateway::{GatewayError, ModelGateway, TurnRequest};
use crate::ports::progress::{GatewayCall, NoProgress, ProgressNotifier};
use interrogation_domain::util::truncate_str;
use interrogation_domain::{
    CharacterRole, Credential, Message, PersonaRegistry, PromptTemplate, SessionStore,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that abort a turn.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TurnError {
    #[error("Cannot send message: {0}")]
    PreconditionFailed(String),

    #[error("No response from the character: {0}")]
    Gateway(#[from] GatewayError),
}

/// Input for the [`ConductTurnUseCase`].
#[derive(Debug, Clone)]
pub struct ConductTurnInput {
    /// Currently selected role, if any.
    pub role: Option<CharacterRole>,
    /// The investigator's new utterance.
    pub utterance: String,
    /// Case overview, if a case has been generated.
    pub overview: Option<String>,
}

impl ConductTurnInput {
    pub fn new(role: CharacterRole, utterance: impl Into<String>) -> Self {
        Self {
            role: Some(role),
            utterance: utterance.into(),
            overview: None,
        }
    }

    pub fn with_overview(mut self, overview: impl Into<String>) -> Self {
        self.overview = Some(overview.into());
        self
    }
}

/// Result of re-summarizing after a committed turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryUpdate {
    Updated(String),
    /// The turn is committed; only the summary was not refreshed.
    Failed(GatewayError),
}

/// A committed turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub role: CharacterRole,
    pub reply: String,
    pub summary: SummaryUpdate,
}

impl TurnOutcome {
    pub fn summary_error(&self) -> Option<&GatewayError> {
        match &self.summary {
            SummaryUpdate::Failed(e) => Some(e),
            SummaryUpdate::Updated(_) => None,
        }
    }
}

/// Use case for one interrogation turn.
///
/// The store is shared with the rest of the application; its lock is held
/// only for the synchronous read/commit steps, never across a gateway
/// call, so turns for different roles can be in flight together.
#[derive(Clone)]
pub struct ConductTurnUseCase {
    gateway: Arc<dyn ModelGateway>,
    store: Arc<Mutex<SessionStore>>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl ConductTurnUseCase {
    pub fn new(gateway: Arc<dyn ModelGateway>, store: Arc<Mutex<SessionStore>>) -> Self {
        Self {
            gateway,
            store,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    fn lock_store(&self) -> MutexGuard<'_, SessionStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub async fn execute(
        &self,
        credential: Option<&Credential>,
        input: ConductTurnInput,
    ) -> Result<TurnOutcome, TurnError> {
        self.execute_with_progress(credential, input, &NoProgress)
            .await
    }

    pub async fn execute_with_progress(
        &self,
        credential: Option<&Credential>,
        input: ConductTurnInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<TurnOutcome, TurnError> {
        let role = input.role.ok_or_else(|| {
            TurnError::PreconditionFailed("no character is selected".to_string())
        })?;
        let credential = credential.ok_or_else(|| {
            TurnError::PreconditionFailed("no API credential is set".to_string())
        })?;
        let persona = PersonaRegistry::get(role);

        // Record the utterance and snapshot everything the request needs
        let (prompt, handle, prior_history) = {
            let mut store = self.lock_store();
            store.append_message(role, Message::investigator(&input.utterance));

            let transcript = store.transcript(role);
            let prior = transcript.len() - 1;
            let previous_statements = transcript.render_first(role, prior);
            let prompt = PromptTemplate::persona_turn(
                persona,
                input.overview.as_deref(),
                &previous_statements,
                &input.utterance,
            );
            let handle = store.handle(role).cloned();
            let prior_history = handle.is_none().then(|| transcript.history_first(prior));
            (prompt, handle, prior_history)
        };

        info!(
            role = role.as_str(),
            new_session = handle.is_none(),
            "Sending turn: {}",
            truncate_str(&input.utterance, 100)
        );
        self.conversation_logger.log(ConversationEvent::new(
            "turn_started",
            serde_json::json!({
                "role": role.as_str(),
                "utterance": input.utterance,
                "new_session": handle.is_none(),
            }),
        ));

        let request = TurnRequest {
            role,
            prompt: &prompt,
            utterance: &input.utterance,
            handle: handle.as_ref(),
            system_instruction: persona.system_instruction,
            prior_history: prior_history.as_deref(),
        };

        progress.on_call_start(GatewayCall::Turn(role));
        let result = self.gateway.exchange_turn(credential, request).await;
        progress.on_call_complete(GatewayCall::Turn(role), result.is_ok());

        let reply = match result {
            Ok(reply) => reply,
            Err(e) => {
                warn!(role = role.as_str(), "Turn failed: {}", e);
                self.lock_store().append_message(
                    role,
                    Message::character(format!("Error: no response could be obtained. {}", e)),
                );
                self.conversation_logger.log(ConversationEvent::new(
                    "turn_failed",
                    serde_json::json!({
                        "role": role.as_str(),
                        "error": e.to_string(),
                    }),
                ));
                return Err(TurnError::Gateway(e));
            }
        };

        // Commit reply and handle together, then flatten for the summary
        let raw_log = {
            let mut store = self.lock_store();
            store.append_message(role, Message::character(&reply.text));
            store.set_handle(role, reply.handle);
            store.transcript(role).render(role)
        };

        self.conversation_logger.log(ConversationEvent::new(
            "turn_completed",
            serde_json::json!({
                "role": role.as_str(),
                "bytes": reply.text.len(),
                "text": reply.text,
            }),
        ));

        let summary = self.refresh_summary(credential, role, &raw_log, progress).await;

        Ok(TurnOutcome {
            role,
            reply: reply.text,
            summary,
        })
    }

    async fn refresh_summary(
        &self,
        credential: &Credential,
        role: CharacterRole,
        raw_log: &str,
        progress: &dyn ProgressNotifier,
    ) -> SummaryUpdate {
        debug!(role = role.as_str(), bytes = raw_log.len(), "Summarizing transcript");

        progress.on_call_start(GatewayCall::Summary(role));
        let result = self.gateway.summarize(credential, raw_log).await;
        progress.on_call_complete(GatewayCall::Summary(role), result.is_ok());

        match result {
            Ok(summary) => {
                self.lock_store().set_summary(role, summary.clone());
                self.conversation_logger.log(ConversationEvent::new(
                    "summary_updated",
                    serde_json::json!({
                        "role": role.as_str(),
                        "summary": summary,
                    }),
                ));
                SummaryUpdate::Updated(summary)
            }
            Err(e) => {
                warn!(role = role.as_str(), "Summary update skipped: {}", e);
                self.conversation_logger.log(ConversationEvent::new(
                    "summary_failed",
                    serde_json::json!({
                        "role": role.as_str(),
                        "error": e.to_string(),
                    }),
                ));
                SummaryUpdate::Failed(e)
            }
        }
    }
}
