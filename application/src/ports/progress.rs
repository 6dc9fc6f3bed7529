//! Progress notification port
//!
//! Reports when remote model calls start and finish so the presentation
//! layer can show activity while a call is outstanding.

use interrogation_domain::CharacterRole;
use std::fmt;

/// A remote call issued by a use case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayCall {
    CaseDetails,
    Complaint,
    Turn(CharacterRole),
    Summary(CharacterRole),
}

impl fmt::Display for GatewayCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayCall::CaseDetails => f.write_str("Building case details"),
            GatewayCall::Complaint => f.write_str("Drafting complaint"),
            GatewayCall::Turn(role) => write!(f, "Waiting for the {}", role.label()),
            GatewayCall::Summary(role) => write!(f, "Summarizing {} log", role.label()),
        }
    }
}

/// Callback for remote call progress
///
/// Implementations live in the presentation layer.
pub trait ProgressNotifier: Send + Sync {
    fn on_call_start(&self, call: GatewayCall);

    fn on_call_complete(&self, call: GatewayCall, success: bool);
}

/// No-op progress notifier
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_call_start(&self, _call: GatewayCall) {}
    fn on_call_complete(&self, _call: GatewayCall, _success: bool) {}
}
