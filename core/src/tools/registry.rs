use crate::config::AssistantConfig;
use crate::llm::{LlmClient, ToolDefinition};
use crate::tools::executors::{CalculatorTool, ReasoningTool, WikipediaTool};
use crate::tools::types::{Tool, ToolError, ToolInput};
use std::sync::Arc;

/// Registry of the tools available to the agent, in registration order
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// The session's tool set: knowledge lookup, calculator, word-problem reasoning
    pub fn standard(llm: Arc<dyn LlmClient>, config: &AssistantConfig) -> Result<Self, ToolError> {
        let tools: Vec<Arc<dyn Tool>> = vec![
            Arc::new(WikipediaTool::new(config.wikipedia.clone())?),
            Arc::new(CalculatorTool::new(llm.clone())),
            Arc::new(ReasoningTool::new(llm)),
        ];
        Ok(Self { tools })
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<(), ToolError> {
        if self.get(tool.name()).is_some() {
            return Err(ToolError::Duplicate(tool.name().to_string()));
        }
        self.tools.push(tool);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name).cloned()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Function definitions handed to the model
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|tool| ToolDefinition {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                parameters: ToolInput::schema("The input to send to the tool"),
            })
            .collect()
    }

    /// One `name: description` line per tool, for the system prompt
    pub fn describe(&self) -> String {
        self.tools
            .iter()
            .map(|t| format!("{}: {}", t.name(), t.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
