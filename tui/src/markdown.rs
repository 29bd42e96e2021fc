use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

fn code_style() -> Style {
    Style::default().fg(Color::Green).bg(Color::Black)
}

fn rule_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Accumulates styled lines while walking the markdown event stream
#[derive(Default)]
struct Renderer {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    styles: Vec<Style>,
    /// Next number for each open list; `None` for bullet lists
    lists: Vec<Option<u64>>,
    code_block: Option<Vec<String>>,
}

impl Renderer {
    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or_default()
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.lines.push(Line::from(std::mem::take(&mut self.current)));
        }
    }

    fn blank(&mut self) {
        self.flush();
        if self.lines.last().map_or(false, |l| !l.spans.is_empty()) {
            self.lines.push(Line::default());
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(block) = self.code_block.as_mut() {
            block.extend(text.lines().map(str::to_string));
            return;
        }
        let style = self.style();
        for (i, part) in text.split('\n').enumerate() {
            if i > 0 {
                self.flush();
            }
            if !part.is_empty() {
                self.current.push(Span::styled(part.to_string(), style));
            }
        }
    }

    fn start(&mut self, tag: Tag) {
        match tag {
            Tag::Heading { .. } => {
                self.blank();
                self.styles
                    .push(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
            }
            Tag::Emphasis => {
                let style = self.style().add_modifier(Modifier::ITALIC);
                self.styles.push(style);
            }
            Tag::Strong => {
                let style = self.style().add_modifier(Modifier::BOLD);
                self.styles.push(style);
            }
            Tag::BlockQuote(_) => {
                self.flush();
                self.styles.push(rule_style());
                self.current.push(Span::styled("│ ", rule_style()));
            }
            Tag::CodeBlock(_) => {
                self.flush();
                self.code_block = Some(Vec::new());
            }
            Tag::List(first) => {
                self.flush();
                self.lists.push(first);
            }
            Tag::Item => {
                self.flush();
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{}{}. ", indent, n);
                        *n += 1;
                        marker
                    }
                    _ => format!("{}• ", indent),
                };
                self.current
                    .push(Span::styled(marker, Style::default().fg(Color::Cyan)));
            }
            Tag::Paragraph => self.flush(),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                self.styles.pop();
                self.flush();
            }
            TagEnd::Emphasis | TagEnd::Strong => {
                self.styles.pop();
            }
            TagEnd::BlockQuote => {
                self.styles.pop();
                self.flush();
            }
            TagEnd::CodeBlock => {
                let block = self.code_block.take().unwrap_or_default();
                self.lines
                    .push(Line::from(Span::styled("┌────", rule_style())));
                for code_line in block {
                    self.lines
                        .push(Line::from(Span::styled(format!("│ {}", code_line), code_style())));
                }
                self.lines
                    .push(Line::from(Span::styled("└────", rule_style())));
                self.lines.push(Line::default());
            }
            TagEnd::List(_) => {
                self.lists.pop();
                self.flush();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            TagEnd::Item => self.flush(),
            TagEnd::Paragraph => {
                // Tight list items end their paragraph inside the item
                if self.lists.is_empty() {
                    self.blank();
                } else {
                    self.flush();
                }
            }
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        while self.lines.len() > 1
            && self.lines.last().map_or(false, |line| {
                line.spans.iter().all(|span| span.content.trim().is_empty())
            })
        {
            self.lines.pop();
        }
        self.lines
    }
}

/// Converts markdown text to styled ratatui lines
pub fn render_markdown(text: &str) -> Vec<Line<'static>> {
    let mut renderer = Renderer::default();

    for event in Parser::new(text) {
        match event {
            Event::Start(tag) => renderer.start(tag),
            Event::End(tag) => renderer.end(tag),
            Event::Text(text) => renderer.push_text(&text),
            Event::Code(code) => renderer.current.push(Span::styled(code.to_string(), code_style())),
            Event::SoftBreak => renderer.current.push(Span::raw(" ")),
            Event::HardBreak => renderer.flush(),
            Event::Rule => {
                renderer.flush();
                renderer
                    .lines
                    .push(Line::from(Span::styled("─".repeat(40), rule_style())));
            }
            _ => {}
        }
    }

    renderer.finish()
}

/// Word-wraps styled lines to `width` columns, keeping each word's style
pub fn wrap_lines(lines: Vec<Line<'static>>, width: usize) -> Vec<Line<'static>> {
    // If width is 0, don't wrap to avoid infinite loops
    if width == 0 {
        return lines;
    }

    let mut wrapped = Vec::new();
    for line in lines {
        let line_width: usize = line.spans.iter().map(|s| s.content.chars().count()).sum();
        if line_width <= width {
            wrapped.push(line);
            continue;
        }

        let mut current: Vec<Span<'static>> = Vec::new();
        let mut current_width = 0;
        for span in line.spans {
            for word in span.content.split_whitespace() {
                let word_width = word.chars().count();
                let gap = usize::from(current_width > 0);
                if current_width > 0 && current_width + gap + word_width > width {
                    wrapped.push(Line::from(std::mem::take(&mut current)));
                    current_width = 0;
                }

                let text = if current_width > 0 {
                    format!(" {}", word)
                } else {
                    word.to_string()
                };
                current_width += text.chars().count();
                match current.last_mut() {
                    Some(last) if last.style == span.style => {
                        last.content = format!("{}{}", last.content, text).into();
                    }
                    _ => current.push(Span::styled(text, span.style)),
                }
            }
        }
        if !current.is_empty() {
            wrapped.push(Line::from(current));
        }
    }
    wrapped
}

/// Plain text wrapped to `width` columns in a single style
pub fn wrap_plain(content: &str, style: Style, width: usize) -> Vec<Line<'static>> {
    let lines = content
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), style)))
        .collect();
    wrap_lines(lines, width)
}
