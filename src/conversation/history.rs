//! Bounded per-user conversation state.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::turn::ChatTurn;
use crate::catalog::Product;
use crate::llm::ChatMessage;

/// Transcript window plus the products last shown to the user.
///
/// The transcript is a ring buffer: once `max_turns` is reached the oldest
/// turn is dropped for every new one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    max_turns: usize,
    turns: VecDeque<ChatTurn>,
    /// Products offered on the most recent turn.
    pub last_recommended: Vec<Product>,
}

impl ConversationState {
    /// Create an empty conversation keeping at most `max_turns` turns.
    #[must_use]
    pub fn new(max_turns: usize) -> Self {
        let max_turns = max_turns.max(1);
        Self {
            max_turns,
            turns: VecDeque::with_capacity(max_turns),
            last_recommended: Vec::new(),
        }
    }

    /// Append a turn, evicting the oldest when full.
    pub fn push(&mut self, turn: ChatTurn) {
        while self.turns.len() >= self.max_turns {
            self.turns.pop_front();
        }
        self.turns.push_back(turn);
    }

    /// Retained turns, oldest first.
    pub fn turns(&self) -> impl Iterator<Item = &ChatTurn> {
        self.turns.iter()
    }

    /// Number of retained turns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether no turn has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Retained turns as model messages.
    #[must_use]
    pub fn to_messages(&self) -> Vec<ChatMessage> {
        self.turns.iter().map(ChatTurn::to_message).collect()
    }
}
