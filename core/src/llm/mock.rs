use super::{ChatCompletion, ChatRequest, LlmClient, LlmError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Scripted LLM client that replays queued replies in order.
///
/// Every request is recorded so tests can inspect prompts and tool
/// definitions after the fact. Running past the end of the script is
/// reported as an API error.
pub struct MockLlmClient {
    model: String,
    script: Mutex<VecDeque<Result<ChatCompletion, LlmError>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self {
            model: "mock-model".to_string(),
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful reply
    pub fn with_reply(self, completion: ChatCompletion) -> Self {
        self.push(Ok(completion));
        self
    }

    /// Queue a plain text reply
    pub fn with_text(self, text: &str) -> Self {
        self.with_reply(ChatCompletion::text(text))
    }

    /// Queue a failure
    pub fn with_error(self, error: LlmError) -> Self {
        self.push(Err(error));
        self
    }

    pub fn push(&self, reply: Result<ChatCompletion, LlmError>) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(reply);
        }
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn remaining(&self) -> usize {
        self.script.lock().map(|s| s.len()).unwrap_or(0)
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatCompletion, LlmError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        let next = self.script.lock().ok().and_then(|mut s| s.pop_front());
        next.unwrap_or_else(|| {
            Err(LlmError::Api {
                status: 500,
                message: "mock script exhausted".to_string(),
            })
        })
    }

    fn model(&self) -> &str {
        &self.model
    }
}
