//! Application layer for interrogation-sim
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    model_gateway::{GatewayError, ModelGateway, TurnReply, TurnRequest},
    progress::{GatewayCall, NoProgress, ProgressNotifier},
    transcript_exporter::{ExportError, TranscriptExporter},
};
pub use use_cases::conduct_turn::{
    ConductTurnInput, ConductTurnUseCase, SummaryUpdate, TurnError, TurnOutcome,
};
pub use use_cases::investigation::{Investigation, InvestigationError};
pub use use_cases::run_case_pipeline::{CaseOutcome, CasePipelineError, RunCasePipelineUseCase};
