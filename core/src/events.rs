use crate::agent::{AgentError, AgentResponse};
use tokio::sync::mpsc;

/// Events that flow through the application
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Agent produced a final answer
    AgentResponse(AgentResponse),

    /// Agent run failed
    AgentError(AgentError),

    /// Intermediate step of a running agent call
    Progress(ProgressEvent),

    /// Application should quit
    Quit,
}

/// Observable steps of one agent run, in the order they happen
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    RunStarted { question: String },
    /// Text the model produced alongside a tool call
    Thought(String),
    ToolStarted { id: String, tool: String, input: String },
    ToolFinished { id: String, tool: String, output: String, duration_ms: u64 },
    /// A malformed tool selection that was fed back to the model
    InvalidAction { message: String },
    RunFinished { iterations: usize },
}

/// Receives progress of an agent run.
///
/// Purely observational: sinks cannot influence the run.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ProgressEvent);
}

/// Sink that drops everything
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn emit(&self, _event: ProgressEvent) {}
}

/// Event bus for communication between components
#[derive(Debug)]
pub struct EventBus {
    sender: mpsc::UnboundedSender<AppEvent>,
    receiver: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self { sender, receiver }
    }

    /// Get a sender handle for the event bus
    pub fn sender(&self) -> EventSender {
        EventSender {
            inner: self.sender.clone(),
        }
    }

    /// Get the receiver (should only be used by the main event loop)
    pub fn into_receiver(self) -> mpsc::UnboundedReceiver<AppEvent> {
        self.receiver
    }

    /// Split into a sender handle and the receiver
    pub fn split(self) -> (EventSender, mpsc::UnboundedReceiver<AppEvent>) {
        let sender = self.sender();
        (sender, self.receiver)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle for sending events to the event bus
#[derive(Debug, Clone)]
pub struct EventSender {
    inner: mpsc::UnboundedSender<AppEvent>,
}

impl EventSender {
    /// Send an event to the bus
    pub fn send(&self, event: AppEvent) -> Result<(), EventSendError> {
        self.inner
            .send(event)
            .map_err(|_| EventSendError::ChannelClosed)
    }

    /// Send agent response
    pub fn send_agent_response(&self, response: AgentResponse) -> Result<(), EventSendError> {
        self.send(AppEvent::AgentResponse(response))
    }

    /// Send agent error
    pub fn send_agent_error(&self, error: AgentError) -> Result<(), EventSendError> {
        self.send(AppEvent::AgentError(error))
    }

    /// Send quit signal
    pub fn send_quit(&self) -> Result<(), EventSendError> {
        self.send(AppEvent::Quit)
    }
}

impl ProgressSink for EventSender {
    fn emit(&self, event: ProgressEvent) {
        // A closed bus only means nobody is watching any more
        let _ = self.send(AppEvent::Progress(event));
    }
}

/// Errors that can occur when sending events
#[derive(Debug, thiserror::Error)]
pub enum EventSendError {
    #[error("Event channel is closed")]
    ChannelClosed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_bus() {
        let bus = EventBus::new();
        let sender = bus.sender();
        let mut receiver = bus.into_receiver();

        sender.send_quit().unwrap();

        let event = receiver.recv().await.unwrap();
        assert!(matches!(event, AppEvent::Quit));
    }

    #[tokio::test]
    async fn test_sender_forwards_progress() {
        let (sender, mut receiver) = EventBus::new().split();

        sender.emit(ProgressEvent::Thought("I should use the calculator".into()));

        match receiver.recv().await.unwrap() {
            AppEvent::Progress(ProgressEvent::Thought(text)) => {
                assert_eq!(text, "I should use the calculator")
            }
            other => panic!("Expected progress event, got {:?}", other),
        }
    }

    #[test]
    fn test_emit_after_receiver_dropped_is_silent() {
        let (sender, receiver) = EventBus::new().split();
        drop(receiver);
        sender.emit(ProgressEvent::RunFinished { iterations: 1 });
        assert!(sender.send_quit().is_err());
    }
}
