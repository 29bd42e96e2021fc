pub mod agent;
pub mod config;
pub mod conversation;
pub mod credentials;
pub mod events;
pub mod llm;
pub mod session;
pub mod tools;

// Re-export main types for convenience
pub use agent::{Agent, AgentError, AgentFactory, AgentResponse};
pub use config::AssistantConfig;
pub use conversation::{ChatMessage, ConversationLog, MessageRole, GREETING};
pub use credentials::{ApiKey, CredentialGate, Gate, API_KEY_ENV, MISSING_KEY_NOTICE};
pub use events::{AppEvent, EventBus, EventSender, ProgressEvent, ProgressSink};
pub use session::{InteractionState, Session, SubmitError, ERROR_PREFIX};
pub use tools::{Tool, ToolError, ToolRegistry};
