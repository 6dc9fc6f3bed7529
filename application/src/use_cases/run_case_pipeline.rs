//! Run Case Pipeline use case.
//!
//! One-shot sequence triggered by a precedent submission:
//! precedent → structured case details → complaint letter.
//!
//! The pipeline is all-or-nothing: if either step fails, no case state is
//! returned.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::model_gateway::{GatewayError, ModelGateway};
use crate::ports::progress::{GatewayCall, NoProgress, ProgressNotifier};
use interrogation_domain::util::truncate_str;
use interrogation_domain::{CaseDetails, Complaint, Credential};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur while building a case.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CasePipelineError {
    #[error("Cannot build case: {0}")]
    PreconditionFailed(String),

    #[error("Failed to generate case details: {0}")]
    CaseDetails(GatewayError),

    #[error("Failed to generate complaint: {0}")]
    Complaint(GatewayError),
}

impl CasePipelineError {
    /// Underlying gateway error, if the failure came from the remote side.
    pub fn gateway_error(&self) -> Option<&GatewayError> {
        match self {
            CasePipelineError::CaseDetails(e) | CasePipelineError::Complaint(e) => Some(e),
            CasePipelineError::PreconditionFailed(_) => None,
        }
    }
}

/// Case state produced by a successful pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseOutcome {
    pub details: CaseDetails,
    pub complaint: Complaint,
}

/// Use case for building a case from a precedent.
#[derive(Clone)]
pub struct RunCasePipelineUseCase {
    gateway: Arc<dyn ModelGateway>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl RunCasePipelineUseCase {
    pub fn new(gateway: Arc<dyn ModelGateway>) -> Self {
        Self {
            gateway,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub async fn execute(
        &self,
        credential: Option<&Credential>,
        precedent: &str,
    ) -> Result<CaseOutcome, CasePipelineError> {
        self.execute_with_progress(credential, precedent, &NoProgress)
            .await
    }

    pub async fn execute_with_progress(
        &self,
        credential: Option<&Credential>,
        precedent: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<CaseOutcome, CasePipelineError> {
        let credential = credential.ok_or_else(|| {
            CasePipelineError::PreconditionFailed("no API credential is set".to_string())
        })?;
        if precedent.trim().is_empty() {
            return Err(CasePipelineError::PreconditionFailed(
                "precedent text is empty".to_string(),
            ));
        }

        info!("Building case from precedent: {}", truncate_str(precedent, 100));

        // Step 1: structured case details
        progress.on_call_start(GatewayCall::CaseDetails);
        let result = self
            .gateway
            .generate_case_details(credential, precedent)
            .await;
        progress.on_call_complete(GatewayCall::CaseDetails, result.is_ok());
        let details = result.map_err(|e| {
            warn!("Case details generation failed: {}", e);
            CasePipelineError::CaseDetails(e)
        })?;

        info!(
            issues = details.issues.len(),
            plan_steps = details.plan.len(),
            "Case details generated"
        );
        self.conversation_logger.log(ConversationEvent::new(
            "case_details_generated",
            serde_json::json!({
                "overview": details.overview,
                "issues": details.issues,
                "plan": details.plan,
            }),
        ));

        // Step 2: complaint, only when there is an overview to base it on
        let complaint = match details.usable_overview() {
            Some(overview) => {
                progress.on_call_start(GatewayCall::Complaint);
                let result = self.gateway.generate_complaint(credential, overview).await;
                progress.on_call_complete(GatewayCall::Complaint, result.is_ok());
                let text = result.map_err(|e| {
                    warn!("Complaint generation failed: {}", e);
                    CasePipelineError::Complaint(e)
                })?;
                Complaint::Generated(text)
            }
            None => {
                warn!("Case details carry no overview; using complaint placeholder");
                Complaint::Placeholder
            }
        };

        self.conversation_logger.log(ConversationEvent::new(
            "complaint_generated",
            serde_json::json!({ "complaint": complaint }),
        ));

        Ok(CaseOutcome { details, complaint })
    }
}
