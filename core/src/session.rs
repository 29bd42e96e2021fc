use crate::agent::{Agent, AgentError, AgentInfo, AgentResponse};
use crate::conversation::{ChatMessage, ConversationLog};
use crate::events::EventSender;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Prefix of the assistant message recorded for a failed run
pub const ERROR_PREFIX: &str = "⚠️ Error: ";

/// Whether an agent call is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    Processing,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Please enter a question.")]
    EmptyQuestion,

    #[error("Still working on the previous question.")]
    Busy,
}

/// One user's session: the conversation log plus the agent answering in it
pub struct Session {
    log: ConversationLog,
    agent: Arc<dyn Agent>,
    event_sender: EventSender,
    state: InteractionState,
}

impl Session {
    /// Create a new session with the given agent
    pub fn new(agent: Arc<dyn Agent>, event_sender: EventSender) -> Self {
        Self {
            log: ConversationLog::new(),
            agent,
            event_sender,
            state: InteractionState::Idle,
        }
    }

    /// Get all messages in the session
    pub fn messages(&self) -> &[ChatMessage] {
        self.log.all()
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn is_processing(&self) -> bool {
        self.state == InteractionState::Processing
    }

    /// Record the question and start the agent on a background task.
    ///
    /// The outcome comes back on the event bus as `AgentResponse` or
    /// `AgentError` and must be handed to [`Session::finish`].
    pub fn submit(&mut self, question: &str) -> Result<(), SubmitError> {
        let question = self.accept(question)?;

        let agent = self.agent.clone();
        let sender = self.event_sender.clone();
        tokio::spawn(async move {
            let sent = match agent.solve(&question, &sender).await {
                Ok(response) => sender.send_agent_response(response),
                Err(error) => sender.send_agent_error(error),
            };
            if let Err(e) = sent {
                error!("Dropping agent outcome: {}", e);
            }
        });
        Ok(())
    }

    /// Record the outcome of the in-flight run and return to Idle
    pub fn finish(&mut self, outcome: Result<AgentResponse, AgentError>) {
        if self.state == InteractionState::Idle {
            warn!("Ignoring agent outcome with no question in flight");
            return;
        }
        self.record(outcome);
    }

    /// Same transitions as `submit` + `finish`, awaited inline
    pub async fn ask(&mut self, question: &str) -> Result<&ChatMessage, SubmitError> {
        let question = self.accept(question)?;
        let outcome = self.agent.solve(&question, &self.event_sender).await;
        Ok(self.record(outcome))
    }

    /// Get agent information
    pub fn agent_info(&self) -> AgentInfo {
        self.agent.info()
    }

    fn record(&mut self, outcome: Result<AgentResponse, AgentError>) -> &ChatMessage {
        let content = match outcome {
            Ok(response) => {
                debug!(
                    "Answer after {} iterations in {:?}",
                    response.metadata.iterations, response.metadata.processing_time
                );
                response.content
            }
            Err(e) => {
                warn!("Agent run failed: {}", e);
                format!("{}{}", ERROR_PREFIX, e)
            }
        };
        self.state = InteractionState::Idle;
        self.log.append(ChatMessage::assistant(content))
    }

    fn accept(&mut self, question: &str) -> Result<String, SubmitError> {
        if self.state == InteractionState::Processing {
            return Err(SubmitError::Busy);
        }
        if question.trim().is_empty() {
            return Err(SubmitError::EmptyQuestion);
        }

        // Stored and sent exactly as typed
        self.log.append(ChatMessage::user(question));
        self.state = InteractionState::Processing;
        Ok(question.to_string())
    }
}
