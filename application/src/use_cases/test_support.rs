//! Scripted [`ModelGateway`] shared by the use case tests.

use crate::ports::model_gateway::{GatewayError, ModelGateway, TurnReply, TurnRequest};
use async_trait::async_trait;
use interrogation_domain::{
    CaseDetails, CharacterRole, ConversationHandle, Credential, HistoryTurn,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Handle state created by [`ScriptedGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockConversation {
    pub turns: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    CaseDetails {
        precedent: String,
    },
    Complaint {
        overview: String,
    },
    Turn {
        role: CharacterRole,
        prompt: String,
        /// Turn count of the handle passed in, `None` when no handle.
        handle_turns: Option<u32>,
        prior_history: Option<Vec<HistoryTurn>>,
    },
    Summary {
        raw_transcript: String,
    },
}

type Script<T> = Mutex<VecDeque<Result<T, GatewayError>>>;

#[derive(Default)]
pub struct ScriptedGateway {
    case_details: Script<CaseDetails>,
    complaints: Script<String>,
    turns: Script<String>,
    summaries: Script<String>,
    calls: Mutex<Vec<RecordedCall>>,
    turn_gate: Option<Arc<Notify>>,
    case_gate: Option<Arc<Notify>>,
}

fn exhausted<T>() -> Result<T, GatewayError> {
    Err(GatewayError::TransportFailure("script exhausted".to_string()))
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_case_details(self, result: Result<CaseDetails, GatewayError>) -> Self {
        self.case_details.lock().unwrap().push_back(result);
        self
    }

    pub fn with_complaint(self, result: Result<&str, GatewayError>) -> Self {
        self.complaints
            .lock()
            .unwrap()
            .push_back(result.map(str::to_string));
        self
    }

    pub fn with_turn(self, result: Result<&str, GatewayError>) -> Self {
        self.turns.lock().unwrap().push_back(result.map(str::to_string));
        self
    }

    pub fn with_summary(self, result: Result<&str, GatewayError>) -> Self {
        self.summaries
            .lock()
            .unwrap()
            .push_back(result.map(str::to_string));
        self
    }

    /// Make every `exchange_turn` wait for a notification before replying.
    pub fn with_turn_gate(mut self, gate: Arc<Notify>) -> Self {
        self.turn_gate = Some(gate);
        self
    }

    /// Make every `generate_case_details` wait for a notification first.
    pub fn with_case_gate(mut self, gate: Arc<Notify>) -> Self {
        self.case_gate = Some(gate);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ModelGateway for ScriptedGateway {
    async fn generate_case_details(
        &self,
        _credential: &Credential,
        precedent: &str,
    ) -> Result<CaseDetails, GatewayError> {
        self.record(RecordedCall::CaseDetails {
            precedent: precedent.to_string(),
        });
        if let Some(gate) = &self.case_gate {
            gate.notified().await;
        }
        let next = self.case_details.lock().unwrap().pop_front();
        next.unwrap_or_else(exhausted)
    }

    async fn generate_complaint(
        &self,
        _credential: &Credential,
        overview: &str,
    ) -> Result<String, GatewayError> {
        self.record(RecordedCall::Complaint {
            overview: overview.to_string(),
        });
        let next = self.complaints.lock().unwrap().pop_front();
        next.unwrap_or_else(exhausted)
    }

    async fn exchange_turn(
        &self,
        _credential: &Credential,
        request: TurnRequest<'_>,
    ) -> Result<TurnReply, GatewayError> {
        let handle_turns = request
            .handle
            .map(|h| h.downcast_ref::<MockConversation>().map_or(0, |c| c.turns));
        self.record(RecordedCall::Turn {
            role: request.role,
            prompt: request.prompt.to_string(),
            handle_turns,
            prior_history: request.prior_history.map(<[HistoryTurn]>::to_vec),
        });

        if let Some(gate) = &self.turn_gate {
            gate.notified().await;
        }

        let next = self.turns.lock().unwrap().pop_front();
        let text = next.unwrap_or_else(exhausted)?;
        Ok(TurnReply {
            text,
            handle: ConversationHandle::new(MockConversation {
                turns: handle_turns.unwrap_or(0) + 1,
            }),
        })
    }

    async fn summarize(
        &self,
        _credential: &Credential,
        raw_transcript: &str,
    ) -> Result<String, GatewayError> {
        self.record(RecordedCall::Summary {
            raw_transcript: raw_transcript.to_string(),
        });
        let next = self.summaries.lock().unwrap().pop_front();
        next.unwrap_or_else(exhausted)
    }
}
