//! Error types for chat-completion calls.

use thiserror::Error;

/// Errors that can occur while talking to the chat-completion API.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP transport failed (connect, timeout, body decode).
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("chat completion returned status {status}: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// The response carried no usable message content.
    #[error("chat completion returned no content")]
    EmptyResponse,
}

impl LlmError {
    /// Check if this error is worth retrying.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::HttpRequest(err) => !err.is_builder() && !err.is_decode(),
            Self::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            Self::EmptyResponse => false,
        }
    }
}

/// Convenience result alias for chat-completion calls.
pub type LlmResult<T> = Result<T, LlmError>;
