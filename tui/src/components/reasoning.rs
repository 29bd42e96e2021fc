use mathsolver_core::ProgressEvent;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};
use super::{panel_block, render_scrollable};
use crate::markdown::wrap_plain;
use crate::state::AppState;

/// Longest tool output shown before eliding the rest
const OUTPUT_PREVIEW_CHARS: usize = 400;

/// Side panel listing the steps of the current agent run
pub struct ReasoningComponent;

impl ReasoningComponent {
    pub fn render(state: &mut AppState, f: &mut Frame, area: Rect) {
        let block = panel_block("Reasoning", state.focused_panel == 2);
        let available_width = area.width.saturating_sub(4) as usize;

        let lines = if state.reasoning.is_empty() {
            vec![Line::from(Span::styled(
                "No steps yet. Tool calls and thoughts appear here while a question is being answered.",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            Self::step_lines(&state.reasoning, available_width)
        };

        let auto_scroll = state.auto_scroll_reasoning;
        render_scrollable(f, area, lines, block, &mut state.reasoning_scroll, auto_scroll);
    }

    pub fn step_lines(steps: &[ProgressEvent], width: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let header = |text: String, color: Color| {
            Line::from(Span::styled(text, Style::default().fg(color).add_modifier(Modifier::BOLD)))
        };

        for step in steps {
            match step {
                ProgressEvent::RunStarted { question } => {
                    lines.push(header("❓ Question".to_string(), Color::Cyan));
                    lines.extend(wrap_plain(question, Style::default(), width));
                }
                ProgressEvent::Thought(text) => {
                    lines.push(header("💭 Thought".to_string(), Color::Magenta));
                    let style = Style::default().fg(Color::Magenta).add_modifier(Modifier::ITALIC);
                    lines.extend(wrap_plain(text, style, width));
                }
                ProgressEvent::ToolStarted { tool, input, .. } => {
                    lines.push(header(format!("🔄 {}", tool), Color::Yellow));
                    lines.extend(wrap_plain(&format!("Input: {}", input), Style::default(), width));
                }
                ProgressEvent::ToolFinished { tool, output, duration_ms, .. } => {
                    lines.push(header(format!("✅ {} ({}ms)", tool, duration_ms), Color::Green));
                    lines.extend(wrap_plain(&Self::preview(output), Style::default().fg(Color::Gray), width));
                }
                ProgressEvent::InvalidAction { message } => {
                    lines.push(header("⚠️ Invalid action".to_string(), Color::Red));
                    lines.extend(wrap_plain(message, Style::default().fg(Color::Red), width));
                }
                ProgressEvent::RunFinished { iterations } => {
                    lines.push(header(
                        format!("🏁 Finished after {} step{}", iterations, if *iterations == 1 { "" } else { "s" }),
                        Color::Green,
                    ));
                }
            }
            lines.push(Line::from(""));
        }
        lines
    }

    fn preview(output: &str) -> String {
        if output.chars().count() <= OUTPUT_PREVIEW_CHARS {
            return output.to_string();
        }
        let head: String = output.chars().take(OUTPUT_PREVIEW_CHARS).collect();
        format!("{}…", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_steps_render_in_order() {
        let steps = vec![
            ProgressEvent::RunStarted { question: "What is 12 * 7?".into() },
            ProgressEvent::ToolStarted { id: "call_1".into(), tool: "calculator".into(), input: "12 * 7".into() },
            ProgressEvent::ToolFinished {
                id: "call_1".into(),
                tool: "calculator".into(),
                output: "Answer: 84".into(),
                duration_ms: 12,
            },
            ProgressEvent::RunFinished { iterations: 2 },
        ];
        let text = plain(&ReasoningComponent::step_lines(&steps, 60));
        assert_eq!(text[0], "❓ Question");
        assert!(text.contains(&"🔄 calculator".to_string()));
        assert!(text.contains(&"Input: 12 * 7".to_string()));
        assert!(text.contains(&"✅ calculator (12ms)".to_string()));
        assert!(text.contains(&"Answer: 84".to_string()));
        assert!(text.contains(&"🏁 Finished after 2 steps".to_string()));
    }

    #[test]
    fn test_long_output_is_elided() {
        let preview = ReasoningComponent::preview(&"x".repeat(1000));
        assert_eq!(preview.chars().count(), OUTPUT_PREVIEW_CHARS + 1);
        assert!(preview.ends_with('…'));
    }
}
