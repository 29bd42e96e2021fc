use crate::llm::LlmError;
use crate::tools::executors::expr::ExprError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// A named capability the agent can call with a text query
#[async_trait]
pub trait Tool: Send + Sync {
    /// Function name shown to the model
    fn name(&self) -> &str;

    /// What the tool is for. The model picks tools by this text alone.
    fn description(&self) -> &str;

    async fn invoke(&self, query: &str) -> Result<String, ToolError>;
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToolError {
    #[error("Invalid tool input: {0}")]
    InvalidInput(String),

    #[error("Backend request failed: {0}")]
    Backend(String),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("Could not evaluate expression: {0}")]
    Expression(#[from] ExprError),

    #[error("Unknown format from LLM: {0}")]
    UnexpectedFormat(String),

    #[error("Tool already registered: {0}")]
    Duplicate(String),
}

impl From<reqwest::Error> for ToolError {
    fn from(err: reqwest::Error) -> Self {
        ToolError::Backend(err.to_string())
    }
}

/// Arguments every tool accepts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolInput {
    pub query: String,
}

impl ToolInput {
    /// Parse the raw argument string produced by the model.
    ///
    /// Accepts `{"query": "..."}` or a bare JSON string.
    pub fn parse(arguments: &str) -> Result<Self, String> {
        let value: Value = serde_json::from_str(arguments.trim())
            .map_err(|e| format!("arguments are not valid JSON ({})", e))?;
        match value {
            Value::String(query) => Ok(Self { query }),
            Value::Object(_) => serde_json::from_value::<ToolInput>(value)
                .map_err(|e| format!("expected an object with a string `query` field ({})", e)),
            other => Err(format!("expected an object with a string `query` field, got {}", other)),
        }
    }

    /// JSON Schema of the arguments object
    pub fn schema(query_description: &str) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": { "type": "string", "description": query_description }
            },
            "required": ["query"]
        })
    }
}
