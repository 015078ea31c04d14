//! Category inference through the chat-completion API.
//!
//! Answers are accepted only when they name a catalog category exactly;
//! anything else, including transport failures, degrades to
//! [`UNKNOWN_CATEGORY`]. Accepted answers are memoized per lowercased
//! message so one turn never pays for the same classification twice.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::client::{ChatClient, ChatMessage, LlmFuture};
use super::error::LlmResult;
use super::prompts::build_classification_prompt;
use super::retry::RetryPolicy;
use crate::catalog::Catalog;

/// Placeholder returned when no catalog category could be inferred.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Anything able to map a message to a category name.
pub trait CategoryInference: Send + Sync {
    /// Infer a category for `message`; never fails, may return
    /// [`UNKNOWN_CATEGORY`].
    fn infer_category<'a>(&'a self, message: &'a str) -> LlmFuture<'a, String>;
}

/// LLM-backed category classifier with an LRU memo.
pub struct CategoryClassifier {
    client: Arc<dyn ChatClient>,
    categories: Vec<String>,
    system_prompt: String,
    retry: RetryPolicy,
    cache: Mutex<LruCache<String, String>>,
}

impl CategoryClassifier {
    /// Create a classifier over the catalog's categories.
    ///
    /// # Errors
    /// Returns an error if the category list cannot be rendered.
    pub fn new(
        client: Arc<dyn ChatClient>,
        catalog: &Catalog,
        retry: RetryPolicy,
        cache_capacity: NonZeroUsize,
    ) -> serde_json::Result<Self> {
        let categories: Vec<String> = catalog
            .categories()
            .into_iter()
            .map(str::to_string)
            .collect();
        let system_prompt = build_classification_prompt(&categories)?;

        Ok(Self {
            client,
            categories,
            system_prompt,
            retry,
            cache: Mutex::new(LruCache::new(cache_capacity)),
        })
    }

    /// Ask the model for a category, validating the answer.
    ///
    /// Returns [`UNKNOWN_CATEGORY`] when the answer is not a catalog category.
    ///
    /// # Errors
    /// Returns an error if the remote call fails after retries.
    pub async fn classify(&self, message: &str) -> LlmResult<String> {
        let messages = [
            ChatMessage::system(self.system_prompt.clone()),
            ChatMessage::user(message),
        ];

        let answer = self
            .retry
            .run("category classification", || self.client.complete(&messages))
            .await?;
        let answer = answer.trim();

        if self.categories.iter().any(|c| c == answer) {
            info!("AI-inferred category: {answer}");
            Ok(answer.to_string())
        } else {
            warn!("Invalid AI-inferred category `{answer}`, falling back to {UNKNOWN_CATEGORY}");
            Ok(UNKNOWN_CATEGORY.to_string())
        }
    }

    async fn infer_cached(&self, message: &str) -> String {
        if self.categories.is_empty() {
            return UNKNOWN_CATEGORY.to_string();
        }

        let key = message.to_lowercase();
        if let Some(hit) = self.cache.lock().await.get(&key) {
            debug!("Category cache hit: {hit}");
            return hit.clone();
        }

        match self.classify(message).await {
            Ok(category) if category != UNKNOWN_CATEGORY => {
                self.cache.lock().await.put(key, category.clone());
                category
            }
            Ok(category) => category,
            Err(err) => {
                warn!("Error inferring category: {err}");
                UNKNOWN_CATEGORY.to_string()
            }
        }
    }
}

impl CategoryInference for CategoryClassifier {
    fn infer_category<'a>(&'a self, message: &'a str) -> LlmFuture<'a, String> {
        Box::pin(self.infer_cached(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::sample_catalog;
    use crate::llm::fakes::FakeChatClient;
    use std::time::Duration;

    fn classifier(client: Arc<FakeChatClient>) -> CategoryClassifier {
        CategoryClassifier::new(
            client,
            &sample_catalog(),
            RetryPolicy::new(1, Duration::from_millis(1)),
            NonZeroUsize::new(8).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_valid_answer_is_accepted() {
        let client = Arc::new(FakeChatClient::replying("  Shoes\n"));
        let classifier = classifier(client.clone());
        assert_eq!(classifier.infer_category("running gear").await, "Shoes");

        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0][0].content.contains("\"Shoes\""));
        assert_eq!(calls[0][1], ChatMessage::user("running gear"));
    }

    #[tokio::test]
    async fn test_invalid_answer_falls_back() {
        let client = Arc::new(FakeChatClient::replying("shoes"));
        let classifier = classifier(client);
        assert_eq!(classifier.infer_category("sneakers").await, UNKNOWN_CATEGORY);
    }

    #[tokio::test]
    async fn test_failure_falls_back_and_is_not_cached() {
        let client = Arc::new(FakeChatClient::failing(500));
        let classifier = classifier(client.clone());
        assert_eq!(classifier.infer_category("lamp").await, UNKNOWN_CATEGORY);
        // One retry per lookup, nothing memoized.
        assert_eq!(client.call_count(), 2);
        assert_eq!(classifier.infer_category("lamp").await, UNKNOWN_CATEGORY);
        assert_eq!(client.call_count(), 4);
    }

    #[tokio::test]
    async fn test_results_are_memoized_case_insensitively() {
        let client = Arc::new(FakeChatClient::replying("Home"));
        let classifier = classifier(client.clone());
        assert_eq!(classifier.infer_category("A Desk Light").await, "Home");
        assert_eq!(classifier.infer_category("a desk light").await, "Home");
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_catalog_skips_remote_call() {
        let client = Arc::new(FakeChatClient::replying("Home"));
        let classifier = CategoryClassifier::new(
            client.clone(),
            &Catalog::default(),
            RetryPolicy::new(0, Duration::ZERO),
            NonZeroUsize::new(1).unwrap(),
        )
        .unwrap();
        assert_eq!(classifier.infer_category("anything").await, UNKNOWN_CATEGORY);
        assert_eq!(client.call_count(), 0);
    }
}
