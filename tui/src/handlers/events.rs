use mathsolver_core::AppEvent;
use tracing::{debug, error};
use crate::state::AppState;

/// Handles application events from the session
pub struct EventHandler;

impl EventHandler {
    /// Handle application events
    pub fn handle_event(state: &mut AppState, event: AppEvent) {
        debug!("Handling app event: {:?}", event);
        match event {
            AppEvent::AgentResponse(response) => {
                if let Some(session) = state.session.as_mut() {
                    session.finish(Ok(response));
                }
                // Re-enable auto-scroll for new content
                state.auto_scroll_chat = true;
            }
            AppEvent::AgentError(e) => {
                error!("Agent error: {}", e);
                if let Some(session) = state.session.as_mut() {
                    session.finish(Err(e));
                }
                state.auto_scroll_chat = true;
            }
            AppEvent::Progress(step) => {
                state.reasoning.push(step);
                state.auto_scroll_reasoning = true;
            }
            AppEvent::Quit => {
                state.should_quit = true;
            }
        }
    }
}
