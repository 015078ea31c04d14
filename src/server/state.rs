//! Application state shared across all request handlers.

use std::sync::Arc;

use tracing::info;

use crate::assistant::ShoppingAssistant;
use crate::catalog::Catalog;
use crate::config::AssistantConfig;
use crate::errors::AssistantResult;
use crate::llm::OpenAiChatClient;

/// Shared application state.
pub struct AppState {
    /// Turn orchestrator.
    pub assistant: ShoppingAssistant,
    /// Model name used for generation.
    pub model_name: String,
}

impl AppState {
    /// Load the catalog and wire the assistant to the configured model.
    ///
    /// # Errors
    /// Returns an error if the catalog cannot be loaded or the HTTP client
    /// cannot be built.
    pub fn new(config: &AssistantConfig) -> AssistantResult<Arc<Self>> {
        let catalog = Arc::new(Catalog::load(&config.catalog.path)?);
        let client = Arc::new(OpenAiChatClient::new(&config.llm)?);
        info!("Chat model: {} at {}", config.llm.model, config.llm.base_url);

        let assistant = ShoppingAssistant::new(catalog, client, config)?;
        Ok(Self::from_assistant(assistant))
    }

    /// Wrap an already-built assistant.
    #[must_use]
    pub fn from_assistant(assistant: ShoppingAssistant) -> Arc<Self> {
        let model_name = assistant.model().to_string();
        Arc::new(Self {
            assistant,
            model_name,
        })
    }
}
