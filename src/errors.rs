//! Error types for the shopping assistant.

use std::path::PathBuf;

use thiserror::Error;

use crate::llm::LlmError;

/// Top-level assistant error type.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// Invalid configuration or unsupported values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The chat-completion API key was not provided.
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,
    /// The catalog file could not be read.
    #[error("cannot read catalog at {path}: {source}")]
    CatalogIo {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The catalog file is not a valid product list.
    #[error("catalog parse error: {0}")]
    CatalogParse(#[from] serde_json::Error),
    /// The catalog parsed but contains an invalid record.
    #[error("invalid catalog record: {0}")]
    InvalidProduct(String),
    /// No profile exists yet for the requested user.
    #[error("user profile not found for `{0}`; start a chat first")]
    ProfileNotFound(String),
    /// Chat-completion call failed.
    #[error("llm error: {0}")]
    Llm(#[from] LlmError),
    /// A built-in pattern failed to compile.
    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),
    /// The HTTP listener could not be bound or failed while serving.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
    /// URL parse error.
    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl AssistantError {
    /// Whether the error was caused by the caller rather than the service.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::ProfileNotFound(_))
    }
}

/// Convenience result alias for assistant operations.
pub type AssistantResult<T> = Result<T, AssistantError>;
