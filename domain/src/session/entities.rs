//! Transcript entities

use crate::character::role::CharacterRole;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Attribution used for investigator lines.
pub const INVESTIGATOR_LABEL: &str = "Investigator";

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    Investigator,
    Character,
}

impl Sender {
    /// Attribution shown in rendered transcripts.
    pub fn attribution(&self, role: CharacterRole) -> &'static str {
        match self {
            Sender::Investigator => INVESTIGATOR_LABEL,
            Sender::Character => role.label(),
        }
    }
}

/// A single immutable transcript entry (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn investigator(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Investigator,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn character(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Character,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// `"<attribution>: <text>"`
    pub fn render(&self, role: CharacterRole) -> String {
        format!("{}: {}", self.sender.attribution(role), self.text)
    }
}

/// Speaker of a turn in the model's own history format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryRole {
    User,
    Model,
}

/// One prior turn handed to the gateway when a conversation is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub role: HistoryRole,
    pub text: String,
}

impl From<&Message> for HistoryTurn {
    fn from(message: &Message) -> Self {
        let role = match message.sender {
            Sender::Investigator => HistoryRole::User,
            Sender::Character => HistoryRole::Model,
        };
        Self {
            role,
            text: message.text.clone(),
        }
    }
}

/// Append-only message history for one role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Render the first `count` messages as attribution lines joined by newline.
    pub fn render_first(&self, role: CharacterRole, count: usize) -> String {
        self.messages
            .iter()
            .take(count)
            .map(|m| m.render(role))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render every message as attribution lines joined by newline.
    pub fn render(&self, role: CharacterRole) -> String {
        self.render_first(role, self.messages.len())
    }

    /// First `count` messages translated into gateway history turns.
    pub fn history_first(&self, count: usize) -> Vec<HistoryTurn> {
        self.messages.iter().take(count).map(HistoryTurn::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transcript {
        let mut transcript = Transcript::new();
        transcript.push(Message::investigator("Did you take it?"));
        transcript.push(Message::character("No."));
        transcript
    }

    #[test]
    fn test_render_uses_role_label() {
        let transcript = sample();
        assert_eq!(
            transcript.render(CharacterRole::Suspect),
            "Investigator: Did you take it?\nSuspect: No."
        );
    }

    #[test]
    fn test_render_first_excludes_tail() {
        let transcript = sample();
        assert_eq!(
            transcript.render_first(CharacterRole::Witness, 1),
            "Investigator: Did you take it?"
        );
        assert_eq!(transcript.render_first(CharacterRole::Witness, 0), "");
    }

    #[test]
    fn test_history_translation() {
        let history = sample().history_first(2);
        assert_eq!(
            history,
            vec![
                HistoryTurn {
                    role: HistoryRole::User,
                    text: "Did you take it?".to_string()
                },
                HistoryTurn {
                    role: HistoryRole::Model,
                    text: "No.".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_push_appends_in_order() {
        let transcript = sample();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.messages()[0].sender, Sender::Investigator);
        assert_eq!(transcript.last().unwrap().text, "No.");
    }
}
