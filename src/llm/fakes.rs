//! Scripted chat client for unit tests.

use std::sync::Mutex;

use super::client::{ChatClient, ChatMessage, LlmFuture};
use super::error::{LlmError, LlmResult};

type Responder = Box<dyn Fn(&[ChatMessage]) -> LlmResult<String> + Send + Sync>;

/// Records every request and answers through a closure.
pub struct FakeChatClient {
    responder: Responder,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl FakeChatClient {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&[ChatMessage]) -> LlmResult<String> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always answers with `text`.
    pub fn replying(text: &str) -> Self {
        let text = text.to_string();
        Self::new(move |_| Ok(text.clone()))
    }

    /// Always fails with the given HTTP status.
    pub fn failing(status: u16) -> Self {
        Self::new(move |_| {
            Err(LlmError::HttpStatus {
                status,
                body: "scripted failure".to_string(),
            })
        })
    }

    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl ChatClient for FakeChatClient {
    fn complete<'a>(&'a self, messages: &'a [ChatMessage]) -> LlmFuture<'a, LlmResult<String>> {
        self.calls.lock().unwrap().push(messages.to_vec());
        let result = (self.responder)(messages);
        Box::pin(async move { result })
    }

    fn model(&self) -> &str {
        "fake-model"
    }
}
