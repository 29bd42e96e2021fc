// UI components for the TUI

pub mod chat;
pub mod credential;
pub mod input;
pub mod reasoning;
pub mod status;

pub use chat::ChatComponent;
pub use credential::CredentialComponent;
pub use input::InputComponent;
pub use reasoning::ReasoningComponent;
pub use status::StatusComponent;

use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

pub(crate) fn panel_block(title: &str, focused: bool) -> Block<'static> {
    let (border_style, title) = if focused {
        (
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            format!(" {} [FOCUSED] ", title),
        )
    } else {
        (Style::default(), format!(" {} ", title))
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title)
}

/// Render pre-wrapped lines in a bordered panel with a vertical scrollbar.
///
/// `scroll` is clamped to the content and written back so the next
/// manual scroll starts from what is actually on screen.
pub(crate) fn render_scrollable(
    f: &mut Frame,
    area: Rect,
    lines: Vec<Line<'static>>,
    block: Block<'static>,
    scroll: &mut usize,
    auto_scroll: bool,
) {
    let content_height = lines.len();
    let visible_height = area.height.saturating_sub(2) as usize; // Account for borders
    let max_scroll = content_height.saturating_sub(visible_height);

    let scroll_pos = if auto_scroll {
        max_scroll
    } else {
        (*scroll).min(max_scroll)
    };
    *scroll = scroll_pos;

    let visible: Vec<Line> = lines.into_iter().skip(scroll_pos).take(visible_height).collect();
    f.render_widget(Paragraph::new(Text::from(visible)).block(block), area);

    if content_height > visible_height {
        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"));
        let mut scrollbar_state = ScrollbarState::new(max_scroll.max(1)).position(scroll_pos);
        f.render_stateful_widget(
            scrollbar,
            area.inner(&Margin { vertical: 1, horizontal: 0 }),
            &mut scrollbar_state,
        );
    }
}
