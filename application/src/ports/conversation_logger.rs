//! Port for structured conversation logging.
//!
//! Defines the [`ConversationLogger`] trait for recording interrogation
//! events (case generation, turns, summaries, resets) to a structured log.
//!
//! This is separate from `tracing`-based diagnostics: tracing handles
//! human-readable operation messages, while this port captures the
//! investigation record in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured conversation event for logging.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "turn_completed", "summary_updated").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging conversation events.
///
/// `log` is synchronous and infallible; logging failures never disturb a
/// turn.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
