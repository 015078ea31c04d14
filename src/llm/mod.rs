//! Chat-completion plumbing: the client seam, the OpenAI-compatible
//! backend, retries, category inference and prompt rendering.

pub mod classifier;
pub mod client;
pub mod error;
pub mod openai;
pub mod prompts;
pub mod retry;

#[cfg(test)]
pub(crate) mod fakes;

pub use classifier::{CategoryClassifier, CategoryInference, UNKNOWN_CATEGORY};
pub use client::{ChatClient, ChatMessage, LlmFuture};
pub use error::{LlmError, LlmResult};
pub use openai::OpenAiChatClient;
pub use prompts::{ReplyPromptBuilder, build_classification_prompt};
pub use retry::RetryPolicy;
