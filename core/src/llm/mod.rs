pub mod error;
pub mod groq;
pub mod mock;
pub mod types;

pub use error::LlmError;
pub use groq::GroqClient;
pub use mock::MockLlmClient;
pub use types::*;

use async_trait::async_trait;

/// Chat-completion backend used by the agent and the LLM-backed tools
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Run one chat completion
    async fn chat(&self, request: ChatRequest) -> Result<ChatCompletion, LlmError>;

    /// Model identifier requests are sent to
    fn model(&self) -> &str;

    /// Send a single user prompt and return the text of the reply
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let completion = self
            .chat(ChatRequest::new(vec![LlmMessage::user(prompt)]))
            .await?;
        match completion.content {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(LlmError::EmptyResponse),
        }
    }
}
