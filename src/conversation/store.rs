//! Conversation storage keyed by user id.

use dashmap::DashMap;

use super::history::ConversationState;
use crate::errors::AssistantResult;
use crate::profile::StoreFuture;

/// Conversation store trait.
pub trait ConversationStore: Send + Sync {
    /// Get the conversation for a user.
    ///
    /// # Errors
    /// Returns an error if storage access fails.
    fn get<'a>(
        &'a self,
        user_id: &'a str,
    ) -> StoreFuture<'a, AssistantResult<Option<ConversationState>>>;

    /// Save or replace the conversation for a user.
    ///
    /// # Errors
    /// Returns an error if storage access fails.
    fn put<'a>(
        &'a self,
        user_id: &'a str,
        state: ConversationState,
    ) -> StoreFuture<'a, AssistantResult<()>>;

    /// Delete the conversation for a user, returning whether one existed.
    ///
    /// # Errors
    /// Returns an error if storage access fails.
    fn delete<'a>(&'a self, user_id: &'a str) -> StoreFuture<'a, AssistantResult<bool>>;
}

/// Process-lifetime in-memory conversation store.
#[derive(Debug, Default)]
pub struct InMemoryConversationStore {
    conversations: DashMap<String, ConversationState>,
}

impl InMemoryConversationStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConversationStore for InMemoryConversationStore {
    fn get<'a>(
        &'a self,
        user_id: &'a str,
    ) -> StoreFuture<'a, AssistantResult<Option<ConversationState>>> {
        Box::pin(async move { Ok(self.conversations.get(user_id).map(|entry| entry.clone())) })
    }

    fn put<'a>(
        &'a self,
        user_id: &'a str,
        state: ConversationState,
    ) -> StoreFuture<'a, AssistantResult<()>> {
        Box::pin(async move {
            self.conversations.insert(user_id.to_string(), state);
            Ok(())
        })
    }

    fn delete<'a>(&'a self, user_id: &'a str) -> StoreFuture<'a, AssistantResult<bool>> {
        Box::pin(async move { Ok(self.conversations.remove(user_id).is_some()) })
    }
}
