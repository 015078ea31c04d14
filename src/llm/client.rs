//! Chat-completion client abstraction.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use super::error::LlmResult;
use crate::conversation::ChatRole;

/// Boxed future type for chat-completion operations.
pub type LlmFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One `{role, content}` message sent to the model.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author of the message.
    pub role: ChatRole,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// Build a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// Build a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Build an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Chat-completion backend.
pub trait ChatClient: Send + Sync {
    /// Send an ordered message list and return the generated text.
    ///
    /// # Errors
    /// Returns an error if the request fails or the response is malformed.
    fn complete<'a>(&'a self, messages: &'a [ChatMessage]) -> LlmFuture<'a, LlmResult<String>>;

    /// Model identifier used for requests.
    fn model(&self) -> &str;
}
