//! Transcript turn model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::llm::ChatMessage;

/// Author of a transcript turn or model message.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    /// Instructions for the model.
    System,
    /// Shopper input.
    User,
    /// Assistant reply.
    Assistant,
}

/// A single timestamped transcript entry.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Author of the turn.
    pub role: ChatRole,
    /// Turn text.
    pub content: String,
    /// When the turn was recorded.
    pub timestamp: DateTime<Utc>,
}

impl ChatTurn {
    /// Build a user turn stamped now.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::now(ChatRole::User, content)
    }

    /// Build an assistant turn stamped now.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::now(ChatRole::Assistant, content)
    }

    fn now(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Model message for this turn.
    #[must_use]
    pub fn to_message(&self) -> ChatMessage {
        ChatMessage {
            role: self.role,
            content: self.content.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        assert_eq!(serde_json::to_value(ChatRole::System).unwrap(), "system");
        assert_eq!(serde_json::to_value(ChatRole::Assistant).unwrap(), "assistant");
        assert!(serde_json::from_str::<ChatRole>(r#""tool""#).is_err());
    }

    #[test]
    fn test_turn_to_message() {
        let turn = ChatTurn::user("any red mugs?");
        let message = turn.to_message();
        assert_eq!(message.role, ChatRole::User);
        assert_eq!(message.content, "any red mugs?");
    }
}
