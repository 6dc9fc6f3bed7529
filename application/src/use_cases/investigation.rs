//! Investigation controller.
//!
//! The single entry point used by the presentation layer. It owns the
//! operator's credential, the current case, the active role, and the shared
//! [`SessionStore`], and it enforces the rules the use cases assume:
//!
//! - at most one turn in flight per role
//! - one case generation at a time
//! - no reset or credential change while a turn or case generation is in flight
//! - case state is cleared whenever the pipeline fails

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::transcript_exporter::{ExportError, TranscriptExporter};
use crate::use_cases::conduct_turn::{
    ConductTurnInput, ConductTurnUseCase, TurnError, TurnOutcome,
};
use crate::use_cases::run_case_pipeline::{CaseOutcome, CasePipelineError, RunCasePipelineUseCase};
use crate::ports::model_gateway::{GatewayError, ModelGateway};
use interrogation_domain::{
    CaseDetails, CharacterRole, Complaint, Credential, DomainError, ExportDocument, ExportKind,
    SessionStore, Transcript,
};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::info;

/// Any failure surfaced to the operator, tagged by originating operation.
#[derive(Error, Debug)]
pub enum InvestigationError {
    #[error("{0}")]
    PreconditionFailed(String),

    #[error("Cannot change credential: {0}")]
    Credential(String),

    #[error(transparent)]
    CasePipeline(#[from] CasePipelineError),

    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error("Summary not updated: {0}")]
    Summary(GatewayError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl InvestigationError {
    /// Name of the operation that failed.
    pub fn operation(&self) -> &'static str {
        match self {
            InvestigationError::PreconditionFailed(_) => "precondition",
            InvestigationError::Credential(_) => "credential",
            InvestigationError::CasePipeline(_) => "case_pipeline",
            InvestigationError::Turn(_) => "turn",
            InvestigationError::Summary(_) => "summary",
            InvestigationError::Export(_) => "export",
            InvestigationError::Domain(_) => "input",
        }
    }
}

#[derive(Debug, Default)]
struct CaseState {
    precedent: Option<String>,
    details: Option<CaseDetails>,
    complaint: Option<Complaint>,
}

#[derive(Debug, Default)]
struct OperatorState {
    credential: Option<Credential>,
    case: CaseState,
    active_role: Option<CharacterRole>,
    case_in_flight: bool,
}

/// Clears `case_in_flight` when the pipeline finishes or is dropped.
struct CaseGuard<'a> {
    state: &'a Mutex<OperatorState>,
}

impl Drop for CaseGuard<'_> {
    fn drop(&mut self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .case_in_flight = false;
    }
}

/// Marks a role's turn as in flight until dropped.
struct TurnGuard {
    in_flight: Arc<Mutex<HashSet<CharacterRole>>>,
    role: CharacterRole,
}

impl TurnGuard {
    fn acquire(
        in_flight: &Arc<Mutex<HashSet<CharacterRole>>>,
        role: CharacterRole,
    ) -> Option<Self> {
        let inserted = in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(role);
        inserted.then(|| Self {
            in_flight: in_flight.clone(),
            role,
        })
    }
}

impl Drop for TurnGuard {
    fn drop(&mut self) {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.role);
    }
}

/// Façade over the case pipeline, the turn orchestrator, and session state.
pub struct Investigation {
    pipeline: RunCasePipelineUseCase,
    turns: ConductTurnUseCase,
    store: Arc<Mutex<SessionStore>>,
    state: Mutex<OperatorState>,
    in_flight: Arc<Mutex<HashSet<CharacterRole>>>,
    exporter: Option<Arc<dyn TranscriptExporter>>,
    progress: Arc<dyn ProgressNotifier>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl Investigation {
    pub fn new(gateway: Arc<dyn ModelGateway>) -> Self {
        let store = Arc::new(Mutex::new(SessionStore::new()));
        Self {
            pipeline: RunCasePipelineUseCase::new(gateway.clone()),
            turns: ConductTurnUseCase::new(gateway, store.clone()),
            store,
            state: Mutex::new(OperatorState::default()),
            in_flight: Arc::new(Mutex::new(HashSet::new())),
            exporter: None,
            progress: Arc::new(NoProgress),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.pipeline = self.pipeline.with_conversation_logger(logger.clone());
        self.turns = self.turns.with_conversation_logger(logger.clone());
        self.conversation_logger = logger;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_exporter(mut self, exporter: Arc<dyn TranscriptExporter>) -> Self {
        self.exporter = Some(exporter);
        self
    }

    fn lock_state(&self) -> MutexGuard<'_, OperatorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_store(&self) -> MutexGuard<'_, SessionStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn any_turn_in_flight(&self) -> bool {
        !self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    // ==================== Credential ====================

    /// Install the operator's credential.
    ///
    /// Replacing an existing credential is a change request: the current
    /// case and every role's session are discarded first.
    pub fn set_credential(&self, credential: Credential) -> Result<(), InvestigationError> {
        if self.lock_state().credential.is_some() {
            self.reset()?;
        }
        info!("Credential set ({})", credential.masked());
        self.lock_state().credential = Some(credential);
        Ok(())
    }

    pub fn has_credential(&self) -> bool {
        self.lock_state().credential.is_some()
    }

    /// Masked credential for display.
    pub fn credential_hint(&self) -> Option<String> {
        self.lock_state().credential.as_ref().map(Credential::masked)
    }

    /// Request a credential change: everything tied to the old credential
    /// is discarded and a new one must be set before the next call.
    pub fn change_credential(&self) -> Result<(), InvestigationError> {
        self.reset()
    }

    /// Discard the credential, the case, the role selection, and all sessions.
    pub fn reset(&self) -> Result<(), InvestigationError> {
        let mut state = self.lock_state();
        if state.case_in_flight {
            return Err(InvestigationError::Credential(
                "the case is still being generated".to_string(),
            ));
        }
        if self.any_turn_in_flight() {
            return Err(InvestigationError::Credential(
                "a character is still answering".to_string(),
            ));
        }

        *state = OperatorState::default();
        drop(state);
        self.lock_store().reset_all();

        info!("Investigation reset");
        self.conversation_logger.log(ConversationEvent::new(
            "session_reset",
            serde_json::json!({}),
        ));
        Ok(())
    }

    // ==================== Case ====================

    /// Build a new case from a precedent.
    ///
    /// Rejected without touching state when no credential is set or another
    /// case is still being generated. Otherwise the previous case details
    /// and complaint are cleared up front and stay cleared if the pipeline
    /// fails at any step.
    pub async fn submit_precedent(&self, text: &str) -> Result<CaseOutcome, InvestigationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::EmptyInput("Precedent text").into());
        }

        let (credential, _guard) = {
            let mut state = self.lock_state();
            if state.case_in_flight {
                return Err(InvestigationError::PreconditionFailed(
                    "a case is already being generated".to_string(),
                ));
            }
            let Some(credential) = state.credential.clone() else {
                return Err(CasePipelineError::PreconditionFailed(
                    "no API credential is set".to_string(),
                )
                .into());
            };
            state.case_in_flight = true;
            state.case = CaseState {
                precedent: Some(text.to_string()),
                details: None,
                complaint: None,
            };
            (credential, CaseGuard { state: &self.state })
        };

        let outcome = self
            .pipeline
            .execute_with_progress(Some(&credential), text, self.progress.as_ref())
            .await?;

        let mut state = self.lock_state();
        state.case.details = Some(outcome.details.clone());
        state.case.complaint = Some(outcome.complaint.clone());
        drop(state);
        Ok(outcome)
    }

    /// Whether the case pipeline is currently running.
    pub fn is_case_in_flight(&self) -> bool {
        self.lock_state().case_in_flight
    }

    pub fn precedent(&self) -> Option<String> {
        self.lock_state().case.precedent.clone()
    }

    pub fn case_details(&self) -> Option<CaseDetails> {
        self.lock_state().case.details.clone()
    }

    pub fn complaint(&self) -> Option<Complaint> {
        self.lock_state().case.complaint.clone()
    }

    // ==================== Interrogation ====================

    /// Change which role receives utterances. No other side effect.
    pub fn select_role(&self, role: CharacterRole) {
        self.lock_state().active_role = Some(role);
    }

    pub fn active_role(&self) -> Option<CharacterRole> {
        self.lock_state().active_role
    }

    /// Whether a turn for `role` is currently outstanding.
    pub fn is_turn_in_flight(&self, role: CharacterRole) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&role)
    }

    /// Send an utterance to the active role.
    ///
    /// A summary failure does not fail the turn; check
    /// [`TurnOutcome::summary_error`] or [`Self::summary_alert`].
    pub async fn submit_utterance(&self, text: &str) -> Result<TurnOutcome, InvestigationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::EmptyInput("Message").into());
        }

        let (role, credential, overview) = {
            let state = self.lock_state();
            (
                state.active_role,
                state.credential.clone(),
                state
                    .case
                    .details
                    .as_ref()
                    .and_then(|d| d.usable_overview().map(str::to_string)),
            )
        };

        let Some(role) = role else {
            return Err(TurnError::PreconditionFailed("no character is selected".to_string()).into());
        };
        let Some(_guard) = TurnGuard::acquire(&self.in_flight, role) else {
            return Err(InvestigationError::PreconditionFailed(format!(
                "the {} is still answering the previous question",
                role.label()
            )));
        };

        let input = ConductTurnInput {
            role: Some(role),
            utterance: text.to_string(),
            overview,
        };
        let outcome = self
            .turns
            .execute_with_progress(credential.as_ref(), input, self.progress.as_ref())
            .await?;
        Ok(outcome)
    }

    /// The summary failure of a committed turn as an operator alert.
    pub fn summary_alert(outcome: &TurnOutcome) -> Option<InvestigationError> {
        outcome
            .summary_error()
            .cloned()
            .map(InvestigationError::Summary)
    }

    pub fn transcript(&self, role: CharacterRole) -> Transcript {
        self.lock_store().transcript(role).clone()
    }

    pub fn summary(&self, role: CharacterRole) -> Option<String> {
        self.lock_store().summary(role).map(str::to_string)
    }

    pub fn has_conversation_handle(&self, role: CharacterRole) -> bool {
        self.lock_store().handle(role).is_some()
    }

    // ==================== Export ====================

    /// Export a role's raw transcript or summary through the configured exporter.
    pub fn export(&self, kind: ExportKind, role: CharacterRole) -> Result<PathBuf, InvestigationError> {
        let exporter = self.exporter.as_ref().ok_or(ExportError::NotConfigured)?;

        let document = {
            let store = self.lock_store();
            match kind {
                ExportKind::Transcript => {
                    ExportDocument::from_transcript(role, store.transcript(role))
                }
                ExportKind::Summary => ExportDocument::from_summary(role, store.summary(role)),
            }
        }
        .map_err(ExportError::from)?;

        let path = exporter.export(&document)?;
        info!(role = role.as_str(), "Exported {} to {}", document.title, path.display());
        Ok(path)
    }
}
