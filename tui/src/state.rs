use mathsolver_core::{
    Agent, AgentFactory, AppEvent, AssistantConfig, CredentialGate, EventBus, EventSender, Gate,
    ProgressEvent, Session,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// One-line message shown to the user until the next action replaces it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            text: text.into(),
        }
    }
}

/// Application state
pub struct AppState {
    pub config: AssistantConfig,

    /// Handed to the session so agent runs can report back
    pub event_sender: EventSender,

    /// Event receiver for handling app events
    pub event_receiver: mpsc::UnboundedReceiver<AppEvent>,

    /// The chat session; `None` while the credential gate is halted
    pub session: Option<Session>,

    /// API key typed on the credential screen
    pub credential_input: String,

    pub notice: Option<Notice>,

    /// Current input text
    pub input: String,

    /// Cursor position in input text (byte index)
    pub input_cursor: usize,

    /// Whether the application should quit
    pub should_quit: bool,

    /// Chat scroll state
    pub chat_scroll: usize,

    /// Reasoning panel scroll state
    pub reasoning_scroll: usize,

    /// Input scroll state (for multi-line input)
    pub input_scroll: usize,

    /// Currently focused panel (0 = input, 1 = chat history, 2 = reasoning)
    pub focused_panel: usize,

    /// Whether to auto-scroll chat to bottom on new messages
    pub auto_scroll_chat: bool,

    /// Whether to auto-scroll reasoning to bottom on new steps
    pub auto_scroll_reasoning: bool,

    /// Whether cursor is visible (for blinking effect)
    pub cursor_visible: bool,

    /// Last time cursor blinked
    pub last_cursor_blink: Instant,

    /// Steps of the current (or most recent) agent run
    pub reasoning: Vec<ProgressEvent>,
}

impl AppState {
    /// Create the state and try to open the gate with `api_key`
    pub fn new(config: AssistantConfig, bus: EventBus, api_key: Option<&str>) -> Self {
        let mut state = Self::locked(config, bus);
        state.unlock(api_key);
        state
    }

    /// Create the state with a ready agent, skipping the credential gate
    pub fn with_agent(config: AssistantConfig, bus: EventBus, agent: Arc<dyn Agent>) -> Self {
        let mut state = Self::locked(config, bus);
        state.session = Some(Session::new(agent, state.event_sender.clone()));
        state
    }

    fn locked(config: AssistantConfig, bus: EventBus) -> Self {
        let (event_sender, event_receiver) = bus.split();
        Self {
            config,
            event_sender,
            event_receiver,
            session: None,
            credential_input: String::new(),
            notice: None,
            input: String::new(),
            input_cursor: 0,
            should_quit: false,
            chat_scroll: 0,
            reasoning_scroll: 0,
            input_scroll: 0,
            focused_panel: 0,
            auto_scroll_chat: true,
            auto_scroll_reasoning: true,
            cursor_visible: true,
            last_cursor_blink: Instant::now(),
            reasoning: Vec::new(),
        }
    }

    /// Run the credential gate and build the session if it opens.
    ///
    /// Returns whether a session is available afterwards.
    pub fn unlock(&mut self, api_key: Option<&str>) -> bool {
        if self.session.is_some() {
            return true;
        }

        match CredentialGate::evaluate(api_key) {
            Gate::Open(key) => match AgentFactory::create_groq(key, &self.config) {
                Ok(agent) => {
                    info!("Credential accepted, starting session");
                    self.session = Some(Session::new(agent, self.event_sender.clone()));
                    self.credential_input.clear();
                    self.notice = None;
                    true
                }
                Err(e) => {
                    warn!("Could not build agent: {}", e);
                    self.notice = Some(Notice::warning(e.to_string()));
                    false
                }
            },
            Gate::Halted { notice } => {
                self.notice = Some(Notice::info(notice));
                false
            }
        }
    }

    pub fn is_processing(&self) -> bool {
        self.session.as_ref().map_or(false, |s| s.is_processing())
    }

    /// Update cursor blinking state
    pub fn update_cursor_blink(&mut self) {
        let now = Instant::now();
        if now.duration_since(self.last_cursor_blink).as_millis() >= 500 {
            self.cursor_visible = !self.cursor_visible;
            self.last_cursor_blink = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mathsolver_core::MISSING_KEY_NOTICE;

    #[test]
    fn test_missing_key_keeps_session_locked() {
        let state = AppState::new(AssistantConfig::default(), EventBus::new(), None);
        assert!(state.session.is_none());
        assert_eq!(state.notice, Some(Notice::info(MISSING_KEY_NOTICE)));
    }

    #[test]
    fn test_blank_key_keeps_session_locked() {
        let mut state = AppState::new(AssistantConfig::default(), EventBus::new(), Some("  "));
        assert!(!state.unlock(Some("")));
        assert!(state.session.is_none());
    }

    #[test]
    fn test_key_opens_session_with_greeting() {
        let state = AppState::new(AssistantConfig::default(), EventBus::new(), Some("gsk_test"));
        let session = state.session.as_ref().unwrap();
        assert_eq!(session.messages().len(), 1);
        assert!(state.notice.is_none());
        assert!(!state.is_processing());
    }

    #[test]
    fn test_bad_config_is_reported() {
        let config = AssistantConfig::default().with_max_iterations(0);
        let state = AppState::new(config, EventBus::new(), Some("gsk_test"));
        assert!(state.session.is_none());
        assert_eq!(state.notice.as_ref().map(|n| n.level), Some(NoticeLevel::Warning));
    }
}
