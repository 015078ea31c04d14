//! Configuration for the shopping assistant.
//!
//! Defaults are overlaid with environment variables by
//! [`AssistantConfig::from_env`]; the API key is the only required value.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::{AssistantError, AssistantResult};

/// Environment variable holding the chat-completion API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Environment variable overriding the model name.
pub const MODEL_ENV: &str = "SHOPPING_AGENT_MODEL";
/// Environment variable overriding the chat-completion base URL.
pub const LLM_URL_ENV: &str = "SHOPPING_AGENT_LLM_URL";
/// Environment variable overriding the catalog path.
pub const CATALOG_ENV: &str = "SHOPPING_AGENT_CATALOG";
/// Environment variable overriding the listen address.
pub const HOST_ENV: &str = "SHOPPING_AGENT_HOST";
/// Environment variable overriding the HTTP port.
pub const PORT_ENV: &str = "SHOPPING_AGENT_PORT";
/// Environment variable overriding the transcript window.
pub const HISTORY_TURNS_ENV: &str = "SHOPPING_AGENT_HISTORY_TURNS";
/// Environment variable overriding the retry count for LLM calls.
pub const LLM_RETRIES_ENV: &str = "SHOPPING_AGENT_LLM_RETRIES";

/// Top-level configuration for the assistant.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Chat-completion settings.
    pub llm: LlmConfig,
    /// Catalog source settings.
    pub catalog: CatalogConfig,
    /// Transcript settings.
    pub conversation: ConversationConfig,
    /// Category classifier settings.
    pub classifier: ClassifierConfig,
    /// HTTP server settings.
    pub server: ServerConfig,
}

impl AssistantConfig {
    /// Build a configuration from defaults and process environment variables.
    ///
    /// # Errors
    /// Returns an error if the API key is missing or a value is malformed.
    pub fn from_env() -> AssistantResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from defaults and a key lookup function.
    ///
    /// # Errors
    /// Returns an error if the API key is missing or a value is malformed.
    pub fn from_lookup<F>(lookup: F) -> AssistantResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        config.llm.api_key = lookup(API_KEY_ENV)
            .filter(|key| !key.trim().is_empty())
            .ok_or(AssistantError::MissingApiKey)?;

        if let Some(model) = lookup(MODEL_ENV) {
            config.llm.model = model;
        }
        if let Some(base_url) = lookup(LLM_URL_ENV) {
            config.llm.base_url = base_url;
        }
        if let Some(path) = lookup(CATALOG_ENV) {
            config.catalog.path = PathBuf::from(path);
        }
        if let Some(host) = lookup(HOST_ENV) {
            config.server.host = parse_env(HOST_ENV, &host)?;
        }
        if let Some(port) = lookup(PORT_ENV) {
            config.server.port = parse_env(PORT_ENV, &port)?;
        }
        if let Some(turns) = lookup(HISTORY_TURNS_ENV) {
            config.conversation.max_turns = parse_env(HISTORY_TURNS_ENV, &turns)?;
        }
        if let Some(retries) = lookup(LLM_RETRIES_ENV) {
            config.llm.max_retries = parse_env(LLM_RETRIES_ENV, &retries)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    /// Returns an error if any values are out of range or invalid.
    pub fn validate(&self) -> AssistantResult<()> {
        if self.llm.model.trim().is_empty() {
            return Err(AssistantError::InvalidConfig(
                "llm.model must not be empty".to_string(),
            ));
        }

        if self.conversation.max_turns == 0 {
            return Err(AssistantError::InvalidConfig(
                "conversation.max_turns must be > 0".to_string(),
            ));
        }

        if self.classifier.cache_capacity == 0 {
            return Err(AssistantError::InvalidConfig(
                "classifier.cache_capacity must be > 0".to_string(),
            ));
        }

        if self.llm.request_timeout_secs == 0 {
            return Err(AssistantError::InvalidConfig(
                "llm.request_timeout_secs must be > 0".to_string(),
            ));
        }

        Url::parse(&self.llm.base_url)?;

        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> AssistantResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| AssistantError::InvalidConfig(format!("{key} has invalid value `{value}`")))
}

/// Chat-completion model settings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Model identifier sent with every request.
    pub model: String,
    /// Base URL of an OpenAI-compatible API.
    pub base_url: String,
    /// Bearer token for the API.
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Retries after the first failed attempt.
    pub max_retries: u32,
    /// Base delay between retries in milliseconds (doubled each attempt).
    pub retry_delay_ms: u64,
}

impl LlmConfig {
    /// Connect timeout as a [`Duration`].
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            temperature: 0.7,
            connect_timeout_secs: 5,
            request_timeout_secs: 60,
            max_retries: 2,
            retry_delay_ms: 500,
        }
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("temperature", &self.temperature)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .finish()
    }
}

/// Catalog source settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path of the JSON product list.
    pub path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/products.json"),
        }
    }
}

/// Transcript settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationConfig {
    /// Most recent turns kept per user.
    pub max_turns: usize,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self { max_turns: 20 }
    }
}

/// Category classifier settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// LRU capacity for memoized classifications.
    pub cache_capacity: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 256,
        }
    }
}

/// HTTP server settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address.
    pub host: IpAddr,
    /// Listening port.
    pub port: u16,
}

impl ServerConfig {
    /// Socket the server binds to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8000,
        }
    }
}
