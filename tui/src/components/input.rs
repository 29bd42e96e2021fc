use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    Frame,
};
use super::{panel_block, render_scrollable};
use crate::state::AppState;

/// Question text broken into display rows, with the cursor's row and column
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct InputLayout {
    pub rows: Vec<String>,
    pub cursor_row: usize,
    pub cursor_col: usize,
}

impl InputLayout {
    /// Breaks `text` at every newline and hard-wraps at `width` columns.
    ///
    /// `cursor` is a byte index into `text`. The cursor never lands past the
    /// last column: a cursor after a full row moves to the start of the next.
    pub(crate) fn new(text: &str, cursor: usize, width: usize) -> Self {
        let width = width.max(1);
        let mut rows = vec![String::new()];
        let mut row_len = 0;
        let mut cursor_at = None;

        for (i, ch) in text.char_indices() {
            if ch == '\n' {
                if i == cursor {
                    cursor_at = Some((rows.len() - 1, row_len));
                }
                rows.push(String::new());
                row_len = 0;
                continue;
            }
            if row_len >= width {
                rows.push(String::new());
                row_len = 0;
            }
            if i == cursor {
                cursor_at = Some((rows.len() - 1, row_len));
            }
            if let Some(row) = rows.last_mut() {
                row.push(ch);
            }
            row_len += 1;
        }

        let (mut cursor_row, mut cursor_col) = cursor_at.unwrap_or((rows.len() - 1, row_len));
        if cursor_col >= width {
            cursor_row += 1;
            cursor_col = 0;
            if cursor_row == rows.len() {
                rows.push(String::new());
            }
        }

        Self {
            rows,
            cursor_row,
            cursor_col,
        }
    }
}

/// Component for rendering the question input
pub struct InputComponent;

impl InputComponent {
    /// Render the input area
    pub fn render(state: &mut AppState, f: &mut Frame, area: Rect) {
        let focused = state.focused_panel == 0;

        if state.is_processing() {
            let thinking = vec![Line::from(Span::styled(
                "Thinking...",
                Style::default().fg(Color::DarkGray),
            ))];
            render_scrollable(f, area, thinking, panel_block("Question", focused), &mut 0, false);
            return;
        }

        // Borders take one cell on each side
        let text_width = area.width.saturating_sub(2) as usize;
        let text_height = area.height.saturating_sub(2) as usize;
        let layout = InputLayout::new(&state.input, state.input_cursor, text_width);

        // Follow the cursor
        if layout.cursor_row < state.input_scroll {
            state.input_scroll = layout.cursor_row;
        } else if text_height > 0 && layout.cursor_row >= state.input_scroll + text_height {
            state.input_scroll = layout.cursor_row + 1 - text_height;
        }

        let title = if state.input.is_empty() {
            "Ask a math or knowledge question"
        } else {
            "Question (Enter to send, Alt+Enter for a new line)"
        };
        let lines = layout.rows.into_iter().map(Line::from).collect();
        render_scrollable(f, area, lines, panel_block(title, focused), &mut state.input_scroll, false);

        if focused && state.cursor_visible && text_width > 0 {
            let visible_row = layout
                .cursor_row
                .checked_sub(state.input_scroll)
                .filter(|row| *row < text_height);
            if let Some(row) = visible_row {
                f.set_cursor(area.x + 1 + layout.cursor_col as u16, area.y + 1 + row as u16);
            }
        }
    }
}
