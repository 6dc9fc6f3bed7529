//! Domain layer for interrogation-sim
//!
//! This crate contains the core entities and rules of the interrogation
//! simulation. It has no dependencies on infrastructure or presentation
//! concerns.
//!
//! # Core Concepts
//!
//! - **Case**: structured details (overview, issues, plan) generated once
//!   from a legal precedent, plus a dramatized complaint letter
//! - **Character role**: complainant, witness, or suspect, each bound to a
//!   fixed persona
//! - **Session**: per-role transcript, latest summary, and opaque
//!   model-side conversation handle

pub mod case;
pub mod character;
pub mod config;
pub mod core;
pub mod export;
pub mod prompt;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use case::{
    entities::{COMPLAINT_UNAVAILABLE, CaseDetails, Complaint},
    parsing::{parse_case_details, strip_code_fence},
};
pub use character::{
    persona::{Persona, PersonaRegistry},
    role::CharacterRole,
};
pub use config::{ConfigIssue, OutputFormat, Severity};
pub use core::{credential::Credential, error::DomainError};
pub use export::{ExportDocument, ExportKind};
pub use prompt::{NO_PRIOR_STATEMENTS, OVERVIEW_UNAVAILABLE, PromptTemplate};
pub use session::{
    entities::{HistoryRole, HistoryTurn, INVESTIGATOR_LABEL, Message, Sender, Transcript},
    handle::ConversationHandle,
    store::{RoleSession, SessionStore},
};
