use crate::config::AssistantConfig;
use crate::credentials::ApiKey;
use crate::events::ProgressSink;
use crate::llm::{GroqClient, LlmClient, LlmError};
use crate::tools::{ToolError, ToolRegistry};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use thiserror::Error;
use tracing::info;

pub mod mock;
pub mod tool_calling;

pub use mock::MockAgent;
pub use tool_calling::ToolCallingAgent;

/// Answers a question, choosing tools on its own.
///
/// The loop behind this trait is opaque to callers: they hand in a question
/// and get back either a final answer or an error once the agent's own
/// recovery is exhausted.
#[async_trait]
pub trait Agent: Send + Sync {
    async fn solve(
        &self,
        question: &str,
        progress: &dyn ProgressSink,
    ) -> Result<AgentResponse, AgentError>;

    /// Get agent information
    fn info(&self) -> AgentInfo;
}

/// Response from an agent
#[derive(Debug, Clone)]
pub struct AgentResponse {
    pub content: String,
    pub metadata: ResponseMetadata,
}

/// Metadata about the response
#[derive(Debug, Clone)]
pub struct ResponseMetadata {
    pub processing_time: Option<Duration>,
    pub tokens_used: Option<u32>,
    pub model: Option<String>,
    pub iterations: usize,
    pub timestamp: SystemTime,
}

impl ResponseMetadata {
    pub fn new() -> Self {
        Self {
            processing_time: None,
            tokens_used: None,
            model: None,
            iterations: 0,
            timestamp: SystemTime::now(),
        }
    }

    pub fn with_processing_time(mut self, duration: Duration) -> Self {
        self.processing_time = Some(duration);
        self
    }
}

impl Default for ResponseMetadata {
    fn default() -> Self {
        Self::new()
    }
}

/// Information about an agent
#[derive(Debug, Clone)]
pub struct AgentInfo {
    pub name: String,
    pub description: String,
    pub version: String,
}

/// Errors that can occur during agent operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    #[error("Backend error: {0}")]
    Backend(#[from] LlmError),

    #[error("Tool '{tool}' failed: {source}")]
    Tool { tool: String, source: ToolError },

    #[error("Agent stopped after {0} iterations without a final answer")]
    IterationLimit(usize),

    #[error("Agent configuration error: {0}")]
    Configuration(String),
}

/// Builds the session's agent once the credential gate is open
pub struct AgentFactory;

impl AgentFactory {
    /// Groq-backed agent with the standard tool set
    pub fn create_groq(api_key: ApiKey, config: &AssistantConfig) -> Result<Arc<dyn Agent>, AgentError> {
        if config.max_iterations == 0 {
            return Err(AgentError::Configuration("max_iterations must be at least 1".to_string()));
        }
        info!("Creating agent for model {}", config.model);
        let llm: Arc<dyn LlmClient> = Arc::new(GroqClient::new(api_key, config));
        Self::create_with_client(llm, config)
    }

    /// Agent over an arbitrary client, with the standard tool set
    pub fn create_with_client(
        llm: Arc<dyn LlmClient>,
        config: &AssistantConfig,
    ) -> Result<Arc<dyn Agent>, AgentError> {
        let tools = ToolRegistry::standard(llm.clone(), config)
            .map_err(|e| AgentError::Configuration(e.to_string()))?;
        Ok(Arc::new(ToolCallingAgent::new(llm, tools, config.max_iterations)))
    }
}
