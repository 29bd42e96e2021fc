use super::expr::{evaluate, format_number};
use crate::llm::LlmClient;
use crate::tools::types::{Tool, ToolError};
use async_trait::async_trait;
use regex::Regex;
use std::sync::Arc;
use tracing::debug;

pub const CALCULATOR_NAME: &str = "calculator";
pub const CALCULATOR_DESCRIPTION: &str = "Use this tool for simple math expressions like 2 + 2 * 5.";

const CALCULATOR_PROMPT: &str = include_str!("../../prompts/calculator_prompt.md");

/// Fenced expression the model is asked to produce
const EXPRESSION_BLOCK: &str = r"(?s)^```text(.*?)```";

/// LLM-backed calculator.
///
/// The model only translates the question into an expression; the
/// arithmetic itself is done locally.
pub struct CalculatorTool {
    llm: Arc<dyn LlmClient>,
}

impl CalculatorTool {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Turn the model's reply into `Answer: <value>`
    pub fn process_llm_output(llm_output: &str) -> Result<String, ToolError> {
        let llm_output = llm_output.trim();
        let block = Regex::new(EXPRESSION_BLOCK).map_err(|e| ToolError::InvalidInput(e.to_string()))?;

        if let Some(captures) = block.captures(llm_output) {
            let expression = captures.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
            debug!("Evaluating expression: {}", expression);
            let value = evaluate(expression)?;
            return Ok(format!("Answer: {}", format_number(value)));
        }

        if llm_output.starts_with("Answer:") {
            return Ok(llm_output.to_string());
        }
        if let Some((_, tail)) = llm_output.rsplit_once("Answer:") {
            return Ok(format!("Answer: {}", tail.trim()));
        }

        Err(ToolError::UnexpectedFormat(llm_output.to_string()))
    }
}

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        CALCULATOR_NAME
    }

    fn description(&self) -> &str {
        CALCULATOR_DESCRIPTION
    }

    async fn invoke(&self, query: &str) -> Result<String, ToolError> {
        let prompt = CALCULATOR_PROMPT.replace("{question}", query.trim());
        let llm_output = self.llm.complete(&prompt).await?;
        Self::process_llm_output(&llm_output)
    }
}
