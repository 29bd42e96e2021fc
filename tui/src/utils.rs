//! Terminal setup and layout helpers

/// Terminal management utilities
pub mod terminal {
    use anyhow::Result;
    use crossterm::{
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    };
    use ratatui::{backend::CrosstermBackend, Terminal};
    use std::io;

    /// Setup terminal for TUI mode
    pub fn setup() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        // Bracketed paste keeps pasted newlines from submitting the question
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore terminal to normal mode
    pub fn restore<B: ratatui::backend::Backend + std::io::Write>(terminal: &mut Terminal<B>) -> Result<()> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        )?;
        terminal.show_cursor()?;
        Ok(())
    }
}

/// Layout calculation utilities
pub mod layout {
    use ratatui::layout::{Constraint, Direction, Layout, Rect};

    /// Create the main application layout
    pub fn create_main_layout(area: Rect) -> Vec<Rect> {
        Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Min(1),     // Chat area
                Constraint::Length(5),  // Input area (increased for multi-line)
                Constraint::Length(1),  // Status line
            ].as_ref())
            .split(area)
            .to_vec()
    }

    /// Create the top panel layout (chat + reasoning)
    pub fn create_top_panel_layout(area: Rect) -> Vec<Rect> {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(60), // Chat area
                Constraint::Percentage(40), // Reasoning area
            ].as_ref())
            .split(area)
            .to_vec()
    }

    /// Rectangle of the given size centered in `area`, clamped to fit
    pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
        let width = width.min(area.width);
        let height = height.min(area.height);
        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_centered_rect_is_clamped() {
            let area = Rect::new(0, 0, 40, 10);
            assert_eq!(centered_rect(20, 4, area), Rect::new(10, 3, 20, 4));
            assert_eq!(centered_rect(80, 20, area), area);
        }
    }
}
