//! Tool-calling agent loop
//!
//! Each iteration asks the model for either tool calls or a final answer.
//! Tool results are appended as observations and the loop continues until
//! the model answers in plain text or the iteration budget runs out.
//! Malformed tool selections (unknown tool, bad arguments, empty turn) are
//! reported back to the model instead of failing the run.

use crate::agent::{Agent, AgentError, AgentInfo, AgentResponse, ResponseMetadata};
use crate::events::{ProgressEvent, ProgressSink};
use crate::llm::{ChatRequest, LlmClient, LlmMessage, TokenUsage, ToolCall};
use crate::tools::{ToolInput, ToolRegistry};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};
use uuid::Uuid;

const SYSTEM_PROMPT: &str = include_str!("../prompts/system_prompt.md");

const EMPTY_TURN_OBSERVATION: &str =
    "Invalid or incomplete response. Either call one of the tools or reply with the final answer.";

pub struct ToolCallingAgent {
    info: AgentInfo,
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
    max_iterations: usize,
}

/// What to feed back to the model for one tool call
enum Observation {
    Output(String),
    Invalid(String),
}

impl ToolCallingAgent {
    pub fn new(llm: Arc<dyn LlmClient>, tools: ToolRegistry, max_iterations: usize) -> Self {
        Self {
            info: AgentInfo {
                name: "Math & Knowledge Agent".to_string(),
                description: format!("Tool-calling agent on {}", llm.model()),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            llm,
            tools,
            max_iterations,
        }
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    fn system_prompt(&self) -> String {
        SYSTEM_PROMPT.replace("{tools}", &self.tools.describe())
    }

    async fn run_tool_call(
        &self,
        call: &ToolCall,
        progress: &dyn ProgressSink,
    ) -> Result<Observation, AgentError> {
        let name = call.function.name.as_str();
        let Some(tool) = self.tools.get(name) else {
            return Ok(Observation::Invalid(format!(
                "{} is not a valid tool, try one of [{}].",
                name,
                self.tools.names().join(", ")
            )));
        };

        let input = match ToolInput::parse(&call.function.arguments) {
            Ok(input) => input,
            Err(e) => {
                return Ok(Observation::Invalid(format!(
                    "Invalid Format: arguments for {} could not be read: {}",
                    name, e
                )))
            }
        };

        progress.emit(ProgressEvent::ToolStarted {
            id: call.id.clone(),
            tool: name.to_string(),
            input: input.query.clone(),
        });
        let start = Instant::now();

        let output = tool
            .invoke(&input.query)
            .await
            .map_err(|source| AgentError::Tool {
                tool: name.to_string(),
                source,
            })?;

        progress.emit(ProgressEvent::ToolFinished {
            id: call.id.clone(),
            tool: name.to_string(),
            output: output.clone(),
            duration_ms: start.elapsed().as_millis() as u64,
        });
        Ok(Observation::Output(output))
    }
}

#[async_trait]
impl Agent for ToolCallingAgent {
    async fn solve(
        &self,
        question: &str,
        progress: &dyn ProgressSink,
    ) -> Result<AgentResponse, AgentError> {
        let start = Instant::now();
        progress.emit(ProgressEvent::RunStarted {
            question: question.to_string(),
        });

        let mut messages = vec![
            LlmMessage::system(self.system_prompt()),
            LlmMessage::user(question),
        ];
        let definitions = self.tools.definitions();
        let mut usage = TokenUsage::default();
        let mut saw_usage = false;

        for iteration in 1..=self.max_iterations {
            let request = ChatRequest::new(messages.clone()).with_tools(definitions.clone());
            let completion = self.llm.chat(request).await?;
            if let Some(u) = completion.usage {
                usage.add(u);
                saw_usage = true;
            }

            let thought = completion
                .content
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_string);

            if !completion.tool_calls.is_empty() {
                if let Some(ref text) = thought {
                    progress.emit(ProgressEvent::Thought(text.clone()));
                }

                // Some providers omit call ids; the transcript needs them to pair results
                let calls: Vec<ToolCall> = completion
                    .tool_calls
                    .into_iter()
                    .map(|mut call| {
                        if call.id.is_empty() {
                            call.id = format!("call_{}", Uuid::new_v4().simple());
                        }
                        call
                    })
                    .collect();
                messages.push(LlmMessage::assistant_tool_calls(completion.content, calls.clone()));

                for call in &calls {
                    debug!("Iteration {}: tool call {}", iteration, call.function.name);
                    let observation = match self.run_tool_call(call, progress).await? {
                        Observation::Output(output) => output,
                        Observation::Invalid(message) => {
                            warn!("Recovering from invalid tool call: {}", message);
                            progress.emit(ProgressEvent::InvalidAction {
                                message: message.clone(),
                            });
                            message
                        }
                    };
                    messages.push(LlmMessage::tool_result(call.id.clone(), observation));
                }
                continue;
            }

            match thought {
                Some(answer) => {
                    progress.emit(ProgressEvent::RunFinished { iterations: iteration });
                    let mut metadata = ResponseMetadata::new().with_processing_time(start.elapsed());
                    metadata.tokens_used = saw_usage.then_some(usage.total_tokens);
                    metadata.model = Some(self.llm.model().to_string());
                    metadata.iterations = iteration;
                    return Ok(AgentResponse {
                        content: answer,
                        metadata,
                    });
                }
                None => {
                    warn!("Iteration {}: model returned neither content nor tool calls", iteration);
                    progress.emit(ProgressEvent::InvalidAction {
                        message: EMPTY_TURN_OBSERVATION.to_string(),
                    });
                    messages.push(LlmMessage::assistant(""));
                    messages.push(LlmMessage::user(EMPTY_TURN_OBSERVATION));
                }
            }
        }

        Err(AgentError::IterationLimit(self.max_iterations))
    }

    fn info(&self) -> AgentInfo {
        self.info.clone()
    }
}
