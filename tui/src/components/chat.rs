use mathsolver_core::{ChatMessage, MessageRole, ERROR_PREFIX};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};
use super::{panel_block, render_scrollable};
use crate::markdown::{render_markdown, wrap_lines, wrap_plain};
use crate::state::AppState;

/// Component for rendering the chat panel
pub struct ChatComponent;

impl ChatComponent {
    /// Render the chat messages
    pub fn render(state: &mut AppState, f: &mut Frame, area: Rect) {
        let available_width = area.width.saturating_sub(4) as usize; // Account for borders and padding
        let lines = state
            .session
            .as_ref()
            .map(|s| Self::message_lines(s.messages(), available_width))
            .unwrap_or_default();

        let block = panel_block("Chat", state.focused_panel == 1);
        let auto_scroll = state.auto_scroll_chat;
        render_scrollable(f, area, lines, block, &mut state.chat_scroll, auto_scroll);
    }

    /// Full transcript as wrapped, styled lines
    pub fn message_lines(messages: &[ChatMessage], width: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for msg in messages {
            match msg.role {
                MessageRole::User => {
                    let style = Style::default().fg(Color::Cyan);
                    lines.extend(wrap_plain(&format!("You: {}", msg.content), style, width));
                }
                MessageRole::Assistant if msg.content.starts_with(ERROR_PREFIX) => {
                    lines.extend(wrap_plain(&msg.content, Style::default().fg(Color::Red), width));
                }
                MessageRole::Assistant => {
                    lines.push(Line::from(Span::styled(
                        "Assistant:",
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    )));
                    lines.extend(wrap_lines(render_markdown(&msg.content), width));
                }
            }

            // Add spacing between messages
            lines.push(Line::from(""));
        }
        lines
    }
}
