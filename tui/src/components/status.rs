use mathsolver_core::InteractionState;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};
use crate::state::{AppState, NoticeLevel};

/// Component for rendering the status line
pub struct StatusComponent;

impl StatusComponent {
    /// Render the status line
    pub fn render(state: &AppState, f: &mut Frame, area: Rect) {
        let (text, color) = Self::status(state);
        f.render_widget(Paragraph::new(text).style(Style::default().fg(color)), area);
    }

    /// Text and color of the status line. A pending notice wins over the
    /// session state.
    pub fn status(state: &AppState) -> (String, Color) {
        if let Some(notice) = &state.notice {
            let color = match notice.level {
                NoticeLevel::Info => Color::Cyan,
                NoticeLevel::Warning => Color::Yellow,
            };
            return (format!("⚠ {}", notice.text), color);
        }

        let focus_indicator = match state.focused_panel {
            0 => "Input focused".to_string(),
            1 => format!("Chat focused{}", if state.auto_scroll_chat { " [Auto-scroll]" } else { "" }),
            2 => format!("Reasoning focused{}", if state.auto_scroll_reasoning { " [Auto-scroll]" } else { "" }),
            _ => "Unknown".to_string(),
        };

        match state.session.as_ref().map(|s| s.state()) {
            Some(InteractionState::Processing) => (
                format!("● Thinking... | {} | Tab to switch, ↑↓/scroll wheel to scroll, End to jump to bottom", focus_indicator),
                Color::Yellow,
            ),
            Some(InteractionState::Idle) => (
                format!("Ready | {} | Enter to ask, Alt+Enter for a new line, Tab to switch, Ctrl+C to quit", focus_indicator),
                Color::Green,
            ),
            None => ("Waiting for API key | Ctrl+C to quit".to_string(), Color::DarkGray),
        }
    }
}
