use crate::llm::LlmClient;
use crate::tools::types::{Tool, ToolError};
use async_trait::async_trait;
use std::sync::Arc;

pub const REASONING_NAME: &str = "math_reasoning";
pub const REASONING_DESCRIPTION: &str =
    "Use this for solving word problems or logic-based math questions.";

const REASONING_PROMPT: &str = include_str!("../../prompts/reasoning_prompt.md");

/// Sends word problems straight to the model with a step-by-step template
pub struct ReasoningTool {
    llm: Arc<dyn LlmClient>,
}

impl ReasoningTool {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    pub fn render_prompt(question: &str) -> String {
        REASONING_PROMPT.replace("{question}", question)
    }
}

#[async_trait]
impl Tool for ReasoningTool {
    fn name(&self) -> &str {
        REASONING_NAME
    }

    fn description(&self) -> &str {
        REASONING_DESCRIPTION
    }

    async fn invoke(&self, query: &str) -> Result<String, ToolError> {
        let prompt = Self::render_prompt(query);
        Ok(self.llm.complete(&prompt).await?)
    }
}
