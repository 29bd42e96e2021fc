use anyhow::Result;
use crossterm::event;
use mathsolver_core::{Agent, AssistantConfig, EventBus};
use ratatui::{backend::Backend, Frame, Terminal};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::{
    components::{
        ChatComponent, CredentialComponent, InputComponent, ReasoningComponent, StatusComponent,
    },
    handlers::{EventHandler, InputHandler},
    state::AppState,
    utils::{layout, terminal},
};

/// Main application
pub struct App {
    state: AppState,
}

impl App {
    /// Create the application, opening the credential gate with `api_key` if given
    pub fn new(config: AssistantConfig, bus: EventBus, api_key: Option<&str>) -> Self {
        Self {
            state: AppState::new(config, bus, api_key),
        }
    }

    /// Create the application around an existing agent
    pub fn with_agent(config: AssistantConfig, bus: EventBus, agent: Arc<dyn Agent>) -> Self {
        Self {
            state: AppState::with_agent(config, bus, agent),
        }
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        let mut terminal = terminal::setup()?;

        info!("TUI initialized, starting main loop");

        // Main application loop
        let result = self.run_app(&mut terminal).await;

        // Restore terminal
        terminal::restore(&mut terminal)?;

        result
    }

    /// Main application loop
    async fn run_app<B: Backend + std::io::Write>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            // Update cursor blinking
            self.state.update_cursor_blink();

            // Draw UI
            terminal.draw(|f| self.ui(f))?;

            // Handle events with timeout to ensure UI responsiveness
            tokio::select! {
                // Handle terminal events (keyboard input)
                terminal_event = async {
                    if event::poll(Duration::from_millis(0)).unwrap_or(false) {
                        event::read().ok()
                    } else {
                        None
                    }
                } => {
                    if let Some(event) = terminal_event {
                        InputHandler::handle_event(&mut self.state, event);
                    }
                },

                // Handle application events (agent answers, progress)
                app_event = self.state.event_receiver.recv() => {
                    if let Some(event) = app_event {
                        EventHandler::handle_event(&mut self.state, event);
                    }
                },

                // Timeout to ensure regular UI updates
                _ = tokio::time::sleep(Duration::from_millis(50)) => {},
            }

            if self.state.should_quit {
                break;
            }
        }

        info!("Leaving main loop");
        Ok(())
    }

    /// Draw the user interface
    fn ui(&mut self, f: &mut Frame) {
        let area = f.size();
        if self.state.session.is_none() {
            CredentialComponent::render(&self.state, f, area);
            return;
        }

        let main_chunks = layout::create_main_layout(area);

        // Top panel: Chat + Reasoning side by side
        let top_chunks = layout::create_top_panel_layout(main_chunks[0]);

        ChatComponent::render(&mut self.state, f, top_chunks[0]);
        ReasoningComponent::render(&mut self.state, f, top_chunks[1]);
        InputComponent::render(&mut self.state, f, main_chunks[1]);
        StatusComponent::render(&self.state, f, main_chunks[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mathsolver_core::agent::MockAgent;
    use ratatui::backend::TestBackend;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content.iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_locked_app_draws_credential_screen() {
        let mut app = App::new(AssistantConfig::default(), EventBus::new(), None);
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| app.ui(f)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Enter your Groq API Key:"));
        assert!(text.contains("Please provide your Groq API Key to continue."));
    }

    #[test]
    fn test_unlocked_app_draws_greeting() {
        let agent = Arc::new(MockAgent::new());
        let mut app = App::with_agent(AssistantConfig::default(), EventBus::new(), agent);
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| app.ui(f)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Ask me anything."));
        assert!(text.contains("Reasoning"));
    }

    #[test]
    fn test_multi_line_question_is_drawn_row_by_row() {
        let agent = Arc::new(MockAgent::new());
        let mut app = App::with_agent(AssistantConfig::default(), EventBus::new(), agent);
        app.state.input = "A train covers 60 km in 1.5 hours.\nWhat is its speed?".to_string();
        app.state.input_cursor = app.state.input.len();
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| app.ui(f)).unwrap();

        let rows: Vec<String> = terminal
            .backend()
            .buffer()
            .content
            .chunks(120)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect();
        let first = rows.iter().position(|r| r.contains("A train covers 60 km")).unwrap();
        assert!(rows[first + 1].contains("What is its speed?"));
    }
}
