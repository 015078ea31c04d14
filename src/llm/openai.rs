//! OpenAI-compatible chat-completion client.
//!
//! Talks to `POST {base_url}/chat/completions` with bearer auth and returns
//! the first choice's message content.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::client::{ChatClient, ChatMessage, LlmFuture};
use super::error::{LlmError, LlmResult};
use crate::config::LlmConfig;

/// Longest error body kept in [`LlmError::HttpStatus`].
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

/// Async client for an OpenAI-compatible chat-completion API.
pub struct OpenAiChatClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl OpenAiChatClient {
    /// Build a client from the model settings.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &LlmConfig) -> LlmResult<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            endpoint: completions_endpoint(&config.base_url),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    async fn post_completion(&self, messages: &[ChatMessage]) -> LlmResult<String> {
        let request = CompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::HttpStatus {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let parsed = response.json::<CompletionResponse>().await?;
        first_content(parsed)
    }
}

impl ChatClient for OpenAiChatClient {
    fn complete<'a>(&'a self, messages: &'a [ChatMessage]) -> LlmFuture<'a, LlmResult<String>> {
        Box::pin(self.post_completion(messages))
    }

    fn model(&self) -> &str {
        &self.model
    }
}

fn completions_endpoint(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

fn first_content(response: CompletionResponse) -> LlmResult<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(LlmError::EmptyResponse)
}
