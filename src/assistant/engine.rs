//! One conversational turn, end to end.

use std::num::NonZeroUsize;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{error, info};

use super::hints::derive_hints;
use crate::catalog::{Catalog, Product};
use crate::config::AssistantConfig;
use crate::conversation::{ChatTurn, ConversationState, ConversationStore, InMemoryConversationStore};
use crate::errors::{AssistantError, AssistantResult};
use crate::llm::{
    CategoryClassifier, CategoryInference, ChatClient, ChatMessage, LlmFuture, ReplyPromptBuilder,
    RetryPolicy,
};
use crate::matching::CatalogMatcher;
use crate::profile::{InMemoryProfileStore, PreferenceExtractor, ProfileStore, UserProfile};
use crate::recommend::{AiSuggestion, recommend};

/// Reply used when generation keeps failing.
pub const APOLOGY: &str =
    "Sorry, I'm having trouble putting together an answer right now. Please try again in a moment.";

/// Result of a chat turn.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnOutcome {
    /// Assistant reply text.
    pub response: String,
    /// Profile after this turn's update.
    pub user_profile: UserProfile,
    /// Final recommendation list.
    pub recommendations: Vec<Product>,
}

/// Category already inferred earlier in the same turn.
struct InferredCategory<'c>(&'c str);

impl CategoryInference for InferredCategory<'_> {
    fn infer_category<'a>(&'a self, _message: &'a str) -> LlmFuture<'a, String> {
        let category = self.0.to_string();
        Box::pin(async move { category })
    }
}

/// Shopping assistant shared by every request handler.
pub struct ShoppingAssistant {
    catalog: Arc<Catalog>,
    client: Arc<dyn ChatClient>,
    profiles: Arc<dyn ProfileStore>,
    conversations: Arc<dyn ConversationStore>,
    classifier: CategoryClassifier,
    extractor: PreferenceExtractor,
    matcher: CatalogMatcher,
    prompts: ReplyPromptBuilder,
    retry: RetryPolicy,
    turn_locks: DashMap<String, Arc<Mutex<()>>>,
    max_turns: usize,
}

impl ShoppingAssistant {
    /// Build an assistant with in-memory stores.
    ///
    /// # Errors
    /// Returns an error if the classifier cache is sized zero or the
    /// catalog cannot be rendered into prompts.
    pub fn new(
        catalog: Arc<Catalog>,
        client: Arc<dyn ChatClient>,
        config: &AssistantConfig,
    ) -> AssistantResult<Self> {
        let retry = RetryPolicy::from_config(&config.llm);
        let cache_capacity = NonZeroUsize::new(config.classifier.cache_capacity).ok_or_else(|| {
            AssistantError::InvalidConfig("classifier.cache_capacity must be > 0".to_string())
        })?;

        let classifier = CategoryClassifier::new(Arc::clone(&client), &catalog, retry, cache_capacity)?;
        let extractor = PreferenceExtractor::new(catalog.vocabulary().clone())?;
        let prompts = ReplyPromptBuilder::new(&catalog)?;

        Ok(Self {
            matcher: CatalogMatcher::new(Arc::clone(&catalog)),
            catalog,
            client,
            profiles: Arc::new(InMemoryProfileStore::new()),
            conversations: Arc::new(InMemoryConversationStore::new()),
            classifier,
            extractor,
            prompts,
            retry,
            turn_locks: DashMap::new(),
            max_turns: config.conversation.max_turns,
        })
    }

    /// Replace the profile and conversation stores.
    #[must_use]
    pub fn with_stores(
        mut self,
        profiles: Arc<dyn ProfileStore>,
        conversations: Arc<dyn ConversationStore>,
    ) -> Self {
        self.profiles = profiles;
        self.conversations = conversations;
        self
    }

    /// Catalog backing this assistant.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Model used for generation.
    #[must_use]
    pub fn model(&self) -> &str {
        self.client.model()
    }

    /// Process one shopper message.
    ///
    /// Turns for the same user run one at a time.
    ///
    /// # Errors
    /// Returns an error if a store fails. Generation failures do not fail the
    /// turn; they produce [`APOLOGY`].
    pub async fn handle_turn(&self, user_id: &str, message: &str) -> AssistantResult<TurnOutcome> {
        let lock = self.turn_lock(user_id);
        let _turn = lock.lock().await;

        let mut profile = self.profiles.get(user_id).await?.unwrap_or_default();
        let mut conversation = self
            .conversations
            .get(user_id)
            .await?
            .unwrap_or_else(|| ConversationState::new(self.max_turns));

        let category = self.classifier.infer_category(message).await;
        let hints = derive_hints(&self.catalog, message, &category);
        self.extractor.update(&mut profile, message, &hints);

        let best = self
            .matcher
            .find_best_match(message, &InferredCategory(&category))
            .await;
        let (system_prompt, candidates) = match best {
            Some(product) => (self.prompts.matched(&profile, &product), vec![product]),
            None => {
                let alternatives = self.matcher.suggest_alternatives();
                (self.prompts.alternatives(&alternatives), alternatives)
            }
        };

        conversation.push(ChatTurn::user(message));
        let mut messages = Vec::with_capacity(conversation.len() + 1);
        messages.push(ChatMessage::system(system_prompt));
        messages.extend(conversation.to_messages());

        let response = match self
            .retry
            .run("reply generation", || self.client.complete(&messages))
            .await
        {
            Ok(reply) => {
                conversation.push(ChatTurn::assistant(reply.clone()));
                reply
            }
            Err(err) => {
                error!("Reply generation failed for user {user_id}: {err}");
                APOLOGY.to_string()
            }
        };

        conversation.last_recommended.clone_from(&candidates);
        let recommendations = recommend(&profile, &self.catalog, candidates);

        self.profiles.put(user_id, profile.clone()).await?;
        self.conversations.put(user_id, conversation).await?;

        info!(
            "Turn for {user_id}: {} recommendation(s), profile {}",
            recommendations.len(),
            profile.summary()
        );

        Ok(TurnOutcome {
            response,
            user_profile: profile,
            recommendations,
        })
    }

    /// Recommendations from the stored profile alone.
    ///
    /// # Errors
    /// Returns [`AssistantError::ProfileNotFound`] before the user's first
    /// chat turn.
    pub async fn recommendations(&self, user_id: &str) -> AssistantResult<Vec<Product>> {
        let profile = self
            .profiles
            .get(user_id)
            .await?
            .ok_or_else(|| AssistantError::ProfileNotFound(user_id.to_string()))?;
        Ok(recommend(&profile, &self.catalog, AiSuggestion::None))
    }

    fn turn_lock(&self, user_id: &str) -> Arc<Mutex<()>> {
        Arc::clone(
            self.turn_locks
                .entry(user_id.to_string())
                .or_default()
                .value(),
        )
    }
}
