use super::{Agent, AgentError, AgentInfo, AgentResponse, ResponseMetadata};
use crate::events::{ProgressEvent, ProgressSink};
use crate::llm::LlmError;
use async_trait::async_trait;
use std::time::{Duration, Instant};

/// Mock agent that echoes back the question with a simulated delay
pub struct MockAgent {
    info: AgentInfo,
    delay: Duration,
}

impl MockAgent {
    pub fn new() -> Self {
        Self {
            info: AgentInfo {
                name: "Mock Agent".to_string(),
                description: "Echo agent for exercising the UI without a backend".to_string(),
                version: "0.1.0".to_string(),
            },
            delay: Duration::from_millis(300), // Simulate processing time
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Default for MockAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Agent for MockAgent {
    async fn solve(
        &self,
        question: &str,
        progress: &dyn ProgressSink,
    ) -> Result<AgentResponse, AgentError> {
        let start = Instant::now();
        progress.emit(ProgressEvent::RunStarted {
            question: question.to_string(),
        });

        // Simulate potential errors for testing
        if question.trim().eq_ignore_ascii_case("error") {
            return Err(AgentError::Backend(LlmError::Api {
                status: 500,
                message: "Simulated error".to_string(),
            }));
        }

        if question.trim().eq_ignore_ascii_case("network error") {
            return Err(AgentError::Backend(LlmError::Network(
                "Simulated network failure".to_string(),
            )));
        }

        progress.emit(ProgressEvent::Thought(
            "No tools needed, echoing the question back.".to_string(),
        ));
        tokio::time::sleep(self.delay).await;
        progress.emit(ProgressEvent::RunFinished { iterations: 1 });

        let mut metadata = ResponseMetadata::new().with_processing_time(start.elapsed());
        metadata.iterations = 1;
        Ok(AgentResponse {
            content: format!("I'm going to help you with: {}", question),
            metadata,
        })
    }

    fn info(&self) -> AgentInfo {
        self.info.clone()
    }
}
