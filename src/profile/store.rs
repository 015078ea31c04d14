//! Profile storage keyed by user id.

use std::future::Future;
use std::pin::Pin;

use dashmap::DashMap;

use super::user_profile::UserProfile;
use crate::errors::AssistantResult;

/// Boxed future type for store operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// User profile store trait.
pub trait ProfileStore: Send + Sync {
    /// Get a profile by user id.
    ///
    /// # Errors
    /// Returns an error if storage access fails.
    fn get<'a>(&'a self, user_id: &'a str) -> StoreFuture<'a, AssistantResult<Option<UserProfile>>>;

    /// Save or replace a profile.
    ///
    /// # Errors
    /// Returns an error if storage access fails.
    fn put<'a>(
        &'a self,
        user_id: &'a str,
        profile: UserProfile,
    ) -> StoreFuture<'a, AssistantResult<()>>;

    /// Delete a profile, returning whether one existed.
    ///
    /// # Errors
    /// Returns an error if storage access fails.
    fn delete<'a>(&'a self, user_id: &'a str) -> StoreFuture<'a, AssistantResult<bool>>;
}

/// Process-lifetime in-memory profile store.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: DashMap<String, UserProfile>,
}

impl InMemoryProfileStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn get<'a>(&'a self, user_id: &'a str) -> StoreFuture<'a, AssistantResult<Option<UserProfile>>> {
        Box::pin(async move { Ok(self.profiles.get(user_id).map(|entry| entry.clone())) })
    }

    fn put<'a>(
        &'a self,
        user_id: &'a str,
        profile: UserProfile,
    ) -> StoreFuture<'a, AssistantResult<()>> {
        Box::pin(async move {
            self.profiles.insert(user_id.to_string(), profile);
            Ok(())
        })
    }

    fn delete<'a>(&'a self, user_id: &'a str) -> StoreFuture<'a, AssistantResult<bool>> {
        Box::pin(async move { Ok(self.profiles.remove(user_id).is_some()) })
    }
}
