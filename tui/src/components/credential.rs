use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use crate::state::{AppState, NoticeLevel};
use crate::utils::layout::centered_rect;

/// Credential screen shown until a usable API key is entered
pub struct CredentialComponent;

impl CredentialComponent {
    pub fn render(state: &AppState, f: &mut Frame, area: Rect) {
        let dialog = centered_rect(64, 9, area);
        f.render_widget(Clear, dialog);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .title(" Math & Knowledge Assistant ");
        let inner = block.inner(dialog);
        f.render_widget(block, dialog);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Prompt
                Constraint::Length(3), // Key field
                Constraint::Min(1),    // Notice
            ])
            .split(inner);

        f.render_widget(Paragraph::new("Enter your Groq API Key:"), rows[0]);

        let masked = Self::masked(&state.credential_input);
        let field = Paragraph::new(masked.clone())
            .block(Block::default().borders(Borders::ALL).title(" GROQ_API_KEY "));
        f.render_widget(field, rows[1]);

        if state.cursor_visible {
            let cursor_x = rows[1].x + 1 + masked.chars().count() as u16;
            if cursor_x < rows[1].x + rows[1].width.saturating_sub(1) {
                f.set_cursor(cursor_x, rows[1].y + 1);
            }
        }

        if let Some(notice) = &state.notice {
            let color = match notice.level {
                NoticeLevel::Info => Color::Cyan,
                NoticeLevel::Warning => Color::Red,
            };
            let line = Line::from(Span::styled(notice.text.clone(), Style::default().fg(color)));
            f.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), rows[2]);
        }
    }

    /// One bullet per typed character; the key itself is never drawn
    pub fn masked(input: &str) -> String {
        "•".repeat(input.chars().count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_hides_key() {
        let masked = CredentialComponent::masked("gsk_secret");
        assert_eq!(masked.chars().count(), 10);
        assert!(!masked.contains("gsk"));
    }
}
