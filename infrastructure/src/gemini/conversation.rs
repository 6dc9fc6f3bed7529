//! Conversation state stored in a [`ConversationHandle`].
//!
//! A persona conversation is created once per role with the persona's system
//! instruction and any history that preceded it. Every successful exchange
//! produces a new value with the exchange recorded; existing values are
//! never mutated, so a failed call leaves the caller's handle intact.
//!
//! Each request already carries the full rebuilt prompt, so only the bare
//! utterance and reply are recorded and the history is never replayed on
//! the wire.

use interrogation_domain::{CharacterRole, ConversationHandle, HistoryRole, HistoryTurn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConversation {
    role: CharacterRole,
    system_instruction: String,
    history: Vec<HistoryTurn>,
}

impl GeminiConversation {
    pub fn new(
        role: CharacterRole,
        system_instruction: impl Into<String>,
        prior_history: &[HistoryTurn],
    ) -> Self {
        Self {
            role,
            system_instruction: system_instruction.into(),
            history: prior_history.to_vec(),
        }
    }

    /// Recover the conversation from a handle created by this adapter.
    pub fn from_handle(handle: &ConversationHandle) -> Option<&Self> {
        handle.downcast_ref::<Self>()
    }

    pub fn role(&self) -> CharacterRole {
        self.role
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    pub fn history(&self) -> &[HistoryTurn] {
        &self.history
    }

    /// A new conversation value with one more exchange recorded.
    pub fn with_exchange(&self, utterance: &str, reply: &str) -> Self {
        let mut next = self.clone();
        next.history.push(HistoryTurn {
            role: HistoryRole::User,
            text: utterance.to_string(),
        });
        next.history.push(HistoryTurn {
            role: HistoryRole::Model,
            text: reply.to_string(),
        });
        next
    }

    pub fn into_handle(self) -> ConversationHandle {
        ConversationHandle::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_with_prior_history() {
        let prior = vec![HistoryTurn {
            role: HistoryRole::User,
            text: "Hello?".to_string(),
        }];
        let conversation = GeminiConversation::new(CharacterRole::Witness, "sys", &prior);

        assert_eq!(conversation.history(), prior.as_slice());
        assert_eq!(conversation.system_instruction(), "sys");
    }

    #[test]
    fn test_exchange_produces_new_value() {
        let original = GeminiConversation::new(CharacterRole::Suspect, "sys", &[]);
        let next = original.with_exchange("Did you do it?", "reply");

        assert!(original.history().is_empty());
        assert_eq!(next.history().len(), 2);
        assert_eq!(next.history()[0].text, "Did you do it?");
        assert_eq!(next.history()[1].role, HistoryRole::Model);
        assert_eq!(next.role(), CharacterRole::Suspect);
    }

    #[test]
    fn test_handle_round_trip() {
        let handle = GeminiConversation::new(CharacterRole::Complainant, "sys", &[]).into_handle();

        let conversation = GeminiConversation::from_handle(&handle).unwrap();
        assert_eq!(conversation.role(), CharacterRole::Complainant);
        assert!(GeminiConversation::from_handle(&ConversationHandle::new(42u8)).is_none());
    }
}
