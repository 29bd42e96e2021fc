use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};
use mathsolver_core::SubmitError;
use tracing::debug;
use crate::state::{AppState, Notice};

/// Handles input events for the application
pub struct InputHandler;

impl InputHandler {
    /// Handle input events (keyboard and mouse)
    pub fn handle_event(state: &mut AppState, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                Self::handle_key_event(state, key.code, key.modifiers);
            }
            Event::Mouse(mouse_event) => {
                Self::handle_mouse_event(state, mouse_event);
            }
            Event::Paste(text) => {
                Self::handle_paste(state, &text);
            }
            _ => {}
        }
    }

    fn handle_key_event(state: &mut AppState, key_code: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key_code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            state.should_quit = true;
            return;
        }

        if state.session.is_none() {
            Self::handle_credential_key(state, key_code);
            return;
        }

        match key_code {
            KeyCode::Tab => {
                // Switch between panels (input, chat history, reasoning)
                state.focused_panel = (state.focused_panel + 1) % 3;
            }
            KeyCode::Up => {
                Self::scroll_focused_up(state, 1);
            }
            KeyCode::Down => {
                Self::scroll_focused_down(state, 1);
            }
            KeyCode::PageUp => {
                Self::scroll_focused_up(state, 10);
            }
            KeyCode::PageDown => {
                Self::scroll_focused_down(state, 10);
            }
            // Shift+Enter only arrives on terminals that report modifiers for Enter
            KeyCode::Enter
                if state.focused_panel == 0
                    && modifiers.intersects(KeyModifiers::ALT | KeyModifiers::SHIFT) =>
            {
                Self::insert_char(state, '\n');
            }
            KeyCode::Enter if state.focused_panel == 0 => {
                Self::submit_input(state);
            }
            KeyCode::Char(c) if state.focused_panel == 0 => {
                Self::insert_char(state, c);
            }
            KeyCode::Backspace if state.focused_panel == 0 => {
                Self::delete_char(state);
            }
            KeyCode::Left if state.focused_panel == 0 => {
                Self::move_cursor_left(state);
            }
            KeyCode::Right if state.focused_panel == 0 => {
                Self::move_cursor_right(state);
            }
            KeyCode::Home if state.focused_panel == 0 => {
                state.input_cursor = 0;
            }
            KeyCode::Esc => {
                state.input.clear();
                state.input_cursor = 0;
                state.input_scroll = 0;
                state.focused_panel = 0;
            }
            KeyCode::End => {
                // Jump to bottom and re-enable auto-scroll for focused panel
                match state.focused_panel {
                    0 => state.input_cursor = state.input.len(),
                    1 => state.auto_scroll_chat = true,
                    2 => state.auto_scroll_reasoning = true,
                    _ => {}
                }
            }
            _ => {}
        }
    }

    /// Keys on the credential screen edit the masked key field
    fn handle_credential_key(state: &mut AppState, key_code: KeyCode) {
        match key_code {
            KeyCode::Char(c) => state.credential_input.push(c),
            KeyCode::Backspace => {
                state.credential_input.pop();
            }
            KeyCode::Esc => state.credential_input.clear(),
            KeyCode::Enter => {
                let key = std::mem::take(&mut state.credential_input);
                state.unlock(Some(&key));
            }
            _ => {}
        }
    }

    /// Bracketed paste: the whole clipboard arrives as one event
    fn handle_paste(state: &mut AppState, text: &str) {
        if state.session.is_none() {
            // API keys are a single line
            state
                .credential_input
                .extend(text.chars().filter(|c| !c.is_control()));
            return;
        }

        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        state.focused_panel = 0;
        state.input.insert_str(state.input_cursor, &text);
        state.input_cursor += text.len();
    }

    fn handle_mouse_event(state: &mut AppState, mouse_event: MouseEvent) {
        match mouse_event.kind {
            MouseEventKind::ScrollUp => Self::scroll_focused_up(state, 3),
            MouseEventKind::ScrollDown => Self::scroll_focused_down(state, 3),
            _ => {}
        }
    }

    fn scroll_focused_up(state: &mut AppState, lines: usize) {
        match state.focused_panel {
            // The input view follows its cursor
            0 => (0..lines).for_each(|_| Self::move_cursor_up(state)),
            1 => {
                state.chat_scroll = state.chat_scroll.saturating_sub(lines);
                // Disable auto-scroll when user manually scrolls
                state.auto_scroll_chat = false;
            }
            2 => {
                state.reasoning_scroll = state.reasoning_scroll.saturating_sub(lines);
                state.auto_scroll_reasoning = false;
            }
            _ => {}
        }
    }

    fn scroll_focused_down(state: &mut AppState, lines: usize) {
        match state.focused_panel {
            0 => (0..lines).for_each(|_| Self::move_cursor_down(state)),
            1 => {
                state.chat_scroll = state.chat_scroll.saturating_add(lines);
                state.auto_scroll_chat = false;
            }
            2 => {
                state.reasoning_scroll = state.reasoning_scroll.saturating_add(lines);
                state.auto_scroll_reasoning = false;
            }
            _ => {}
        }
    }

    /// Submit the current input as a question
    fn submit_input(state: &mut AppState) {
        let Some(session) = state.session.as_mut() else {
            return;
        };

        match session.submit(&state.input) {
            Ok(()) => {
                debug!("Question submitted");
                state.input.clear();
                state.input_cursor = 0;
                state.input_scroll = 0;
                state.notice = None;
                state.reasoning.clear();
                state.auto_scroll_chat = true;
                state.auto_scroll_reasoning = true;
            }
            Err(SubmitError::EmptyQuestion) => {
                state.notice = Some(Notice::warning(SubmitError::EmptyQuestion.to_string()));
            }
            // Input stays put until the running question finishes
            Err(SubmitError::Busy) => {}
        }
    }

    /// Insert a character at the cursor position
    fn insert_char(state: &mut AppState, ch: char) {
        if state.input_cursor <= state.input.len() {
            state.input.insert(state.input_cursor, ch);
            state.input_cursor += ch.len_utf8();
        }
    }

    /// Delete character before cursor
    fn delete_char(state: &mut AppState) {
        if state.input_cursor > 0 {
            Self::move_cursor_left(state);
            state.input.remove(state.input_cursor);
        }
    }

    /// Move cursor left
    fn move_cursor_left(state: &mut AppState) {
        if state.input_cursor > 0 {
            // Move to previous character boundary
            let mut new_cursor = state.input_cursor - 1;
            while new_cursor > 0 && !state.input.is_char_boundary(new_cursor) {
                new_cursor -= 1;
            }
            state.input_cursor = new_cursor;
        }
    }

    /// Move cursor right
    fn move_cursor_right(state: &mut AppState) {
        if state.input_cursor < state.input.len() {
            let mut new_cursor = state.input_cursor + 1;
            while new_cursor < state.input.len() && !state.input.is_char_boundary(new_cursor) {
                new_cursor += 1;
            }
            state.input_cursor = new_cursor;
        }
    }

    /// Move cursor to the same column of the previous line
    fn move_cursor_up(state: &mut AppState) {
        let line_start = state.input[..state.input_cursor]
            .rfind('\n')
            .map_or(0, |pos| pos + 1);
        if line_start == 0 {
            state.input_cursor = 0;
            return;
        }
        let col = state.input_cursor - line_start;
        let prev_end = line_start - 1;
        let prev_start = state.input[..prev_end].rfind('\n').map_or(0, |pos| pos + 1);
        state.input_cursor = Self::clamp_to_boundary(&state.input, prev_start + col.min(prev_end - prev_start));
    }

    /// Move cursor to the same column of the next line
    fn move_cursor_down(state: &mut AppState) {
        let Some(offset) = state.input[state.input_cursor..].find('\n') else {
            state.input_cursor = state.input.len();
            return;
        };
        let line_start = state.input[..state.input_cursor]
            .rfind('\n')
            .map_or(0, |pos| pos + 1);
        let col = state.input_cursor - line_start;
        let next_start = state.input_cursor + offset + 1;
        let next_end = state.input[next_start..]
            .find('\n')
            .map_or(state.input.len(), |pos| next_start + pos);
        state.input_cursor = Self::clamp_to_boundary(&state.input, next_start + col.min(next_end - next_start));
    }

    fn clamp_to_boundary(text: &str, mut index: usize) -> usize {
        while index > 0 && !text.is_char_boundary(index) {
            index -= 1;
        }
        index
    }
}
