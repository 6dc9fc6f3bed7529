//! Conversation Session Store: per-role transcript, summary, and handle.

use super::entities::{Message, Transcript};
use super::handle::ConversationHandle;
use crate::character::role::CharacterRole;
use std::collections::HashMap;

/// State kept for one role's interrogation session.
#[derive(Debug, Clone, Default)]
pub struct RoleSession {
    transcript: Transcript,
    summary: Option<String>,
    handle: Option<ConversationHandle>,
}

impl RoleSession {
    const EMPTY: RoleSession = RoleSession {
        transcript: Transcript::new(),
        summary: None,
        handle: None,
    };

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn handle(&self) -> Option<&ConversationHandle> {
        self.handle.as_ref()
    }
}

static EMPTY_SESSION: RoleSession = RoleSession::EMPTY;

/// Per-role session state keyed by [`CharacterRole`].
///
/// No operation spans roles except [`reset_all`](Self::reset_all). The store
/// does not serialize turns; callers keep at most one turn in flight per role.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: HashMap<CharacterRole, RoleSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: CharacterRole::ALL
                .into_iter()
                .map(|role| (role, RoleSession::default()))
                .collect(),
        }
    }

    pub fn session(&self, role: CharacterRole) -> &RoleSession {
        self.sessions.get(&role).unwrap_or(&EMPTY_SESSION)
    }

    fn session_mut(&mut self, role: CharacterRole) -> &mut RoleSession {
        self.sessions.entry(role).or_default()
    }

    pub fn transcript(&self, role: CharacterRole) -> &Transcript {
        &self.session(role).transcript
    }

    pub fn append_message(&mut self, role: CharacterRole, message: Message) {
        self.session_mut(role).transcript.push(message);
    }

    pub fn summary(&self, role: CharacterRole) -> Option<&str> {
        self.session(role).summary()
    }

    /// Overwrite the role's summary.
    pub fn set_summary(&mut self, role: CharacterRole, summary: impl Into<String>) {
        self.session_mut(role).summary = Some(summary.into());
    }

    pub fn handle(&self, role: CharacterRole) -> Option<&ConversationHandle> {
        self.session(role).handle()
    }

    pub fn set_handle(&mut self, role: CharacterRole, handle: ConversationHandle) {
        self.session_mut(role).handle = Some(handle);
    }

    /// Clear transcript, summary, and handle for every role.
    pub fn reset_all(&mut self) {
        for role in CharacterRole::ALL {
            self.sessions.insert(role, RoleSession::default());
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_empty_for_every_role() {
        let store = SessionStore::new();
        for role in CharacterRole::ALL {
            assert!(store.transcript(role).is_empty());
            assert!(store.summary(role).is_none());
            assert!(store.handle(role).is_none());
        }
    }

    #[test]
    fn test_roles_do_not_share_state() {
        let mut store = SessionStore::new();
        store.append_message(CharacterRole::Suspect, Message::investigator("Where were you?"));
        store.set_summary(CharacterRole::Suspect, "Evasive.");
        store.set_handle(CharacterRole::Suspect, ConversationHandle::new(1u32));

        assert_eq!(store.transcript(CharacterRole::Suspect).len(), 1);
        assert!(store.transcript(CharacterRole::Witness).is_empty());
        assert!(store.summary(CharacterRole::Complainant).is_none());
        assert!(store.handle(CharacterRole::Witness).is_none());
    }

    #[test]
    fn test_summary_is_overwritten() {
        let mut store = SessionStore::new();
        store.set_summary(CharacterRole::Witness, "first");
        store.set_summary(CharacterRole::Witness, "second");
        assert_eq!(store.summary(CharacterRole::Witness), Some("second"));
    }

    #[test]
    fn test_reset_all_clears_everything() {
        let mut store = SessionStore::new();
        for role in CharacterRole::ALL {
            store.append_message(role, Message::investigator("hello"));
            store.append_message(role, Message::character("hi"));
            store.set_summary(role, "greeting");
            store.set_handle(role, ConversationHandle::new(role));
        }

        store.reset_all();

        for role in CharacterRole::ALL {
            assert!(store.transcript(role).is_empty());
            assert!(store.summary(role).is_none());
            assert!(store.handle(role).is_none());
        }
    }
}
