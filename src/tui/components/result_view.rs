//! # ResultView Component
//!
//! Bordered, scrollable view of the last result (pretty-printed envelope,
//! error message, or validation message).
//!
//! The text is wrapped up front with `textwrap` so the canvas height handed
//! to the `ScrollView` matches what is drawn. Wrapping is cached per text and
//! width, and stops after `MAX_RESULT_LINES` rows.

use std::borrow::Cow;

use ratatui::Frame;
use ratatui::layout::{Rect, Size};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Rows kept for display. Anything past this is replaced by a notice line.
pub const MAX_RESULT_LINES: usize = 2_000;

fn truncation_notice() -> String {
    format!("[truncated after {MAX_RESULT_LINES} lines]")
}

struct WrapCache {
    text: String,
    width: u16,
    lines: Vec<String>,
}

/// Scroll position and wrapped lines, kept across frames.
#[derive(Default)]
pub struct ResultViewState {
    pub scroll_state: ScrollViewState,
    cache: Option<WrapCache>,
}

impl ResultViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump back to the top (used when a new result replaces the old one).
    pub fn reset(&mut self) {
        self.scroll_state.scroll_to_top();
    }

    /// Wrapped lines for `text`, recomputed only when the text or width changes.
    fn wrapped_lines(&mut self, text: &str, width: u16) -> &[String] {
        let stale = self
            .cache
            .as_ref()
            .is_none_or(|cache| cache.width != width || cache.text != text);
        if stale {
            self.cache = Some(WrapCache {
                text: text.to_string(),
                width,
                lines: wrap_result(text, width),
            });
        }
        match &self.cache {
            Some(cache) => &cache.lines,
            None => &[],
        }
    }
}

impl EventHandler for ResultViewState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            _ => return None,
        }
        Some(())
    }
}

/// Wrap `text` into display lines of at most `width` columns, keeping
/// indentation of pretty-printed JSON.
///
/// At most `MAX_RESULT_LINES` rows are produced; when more text remains a
/// notice row is appended.
pub fn wrap_result(text: &str, width: u16) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let options = textwrap::Options::new(width as usize).break_words(true);
    let mut lines = Vec::new();
    for line in text.lines() {
        let remaining = MAX_RESULT_LINES - lines.len();
        if remaining == 0 {
            lines.push(truncation_notice());
            return lines;
        }
        if line.width() <= width as usize {
            lines.push(line.to_string());
            continue;
        }

        // Only the prefix that can fill the remaining rows is wrapped
        let limit = line
            .char_indices()
            .nth(width as usize * remaining)
            .map_or(line.len(), |(i, _)| i);
        let wrapped = textwrap::wrap(&line[..limit], &options);
        let overflow = limit < line.len() || wrapped.len() > remaining;
        lines.extend(wrapped.into_iter().take(remaining).map(Cow::into_owned));
        if overflow {
            lines.push(truncation_notice());
            return lines;
        }
    }
    lines
}

pub struct ResultView<'a> {
    pub text: &'a str,
    pub state: &'a mut ResultViewState,
}

impl Component for ResultView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Response");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // One column is reserved for the vertical scrollbar
        let content_width = inner.width.saturating_sub(1);
        let lines = self.state.wrapped_lines(self.text, content_width);
        let content_height = u16::try_from(lines.len()).unwrap_or(u16::MAX);

        let mut scroll_view = ScrollView::new(Size::new(content_width, content_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let style = if self.text.starts_with("Error") {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };
        let paragraph =
            Paragraph::new(lines.iter().map(|l| Line::from(l.as_str())).collect::<Vec<_>>())
                .style(style);
        scroll_view.render_widget(paragraph, Rect::new(0, 0, content_width, content_height));

        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_wrap_result_keeps_blank_lines_and_indent() {
        let lines = wrap_result("{\n  \"a\": 1\n\n}", 40);
        assert_eq!(lines, vec!["{", "  \"a\": 1", "", "}"]);
    }

    #[test]
    fn test_wrap_result_breaks_long_lines() {
        let lines = wrap_result(&"x".repeat(25), 10);
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_wrap_result_zero_width() {
        assert!(wrap_result("abc", 0).is_empty());
    }

    #[test]
    fn test_wrap_result_caps_line_count() {
        let text = (0..MAX_RESULT_LINES + 10)
            .map(|i| format!("L{i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let lines = wrap_result(&text, 40);
        assert_eq!(lines.len(), MAX_RESULT_LINES + 1);
        assert_eq!(lines[MAX_RESULT_LINES - 1], format!("L{}", MAX_RESULT_LINES - 1));
        assert_eq!(lines[MAX_RESULT_LINES], truncation_notice());
    }

    #[test]
    fn test_wrap_result_exact_limit_has_no_notice() {
        let text = vec!["x"; MAX_RESULT_LINES].join("\n");
        assert_eq!(wrap_result(&text, 40).len(), MAX_RESULT_LINES);
    }

    #[test]
    fn test_wrap_result_caps_one_huge_line() {
        let text = "y".repeat(5_000_000);
        let lines = wrap_result(&text, 80);
        assert_eq!(lines.len(), MAX_RESULT_LINES + 1);
        assert_eq!(lines[0].len(), 80);
        assert_eq!(lines[MAX_RESULT_LINES], truncation_notice());
    }

    #[test]
    fn test_wrapped_lines_are_cached_per_text_and_width() {
        let mut state = ResultViewState::new();
        assert_eq!(state.wrapped_lines("abc def", 40), ["abc def"]);
        assert_eq!(state.wrapped_lines("abc def", 4), ["abc", "def"]);
        assert_eq!(state.wrapped_lines("xyz", 4), ["xyz"]);
    }

    #[test]
    fn test_large_result_bottom_is_reachable() {
        let backend = TestBackend::new(60, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = ResultViewState::new();
        let text = (0..65_540)
            .map(|i| format!("L{i}"))
            .collect::<Vec<_>>()
            .join("\n");

        state.scroll_state.scroll_to_bottom();
        terminal
            .draw(|f| {
                ResultView {
                    text: &text,
                    state: &mut state,
                }
                .render(f, f.area());
            })
            .unwrap();

        let shown = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(shown.contains(&format!("L{}", MAX_RESULT_LINES - 1)));
        assert!(shown.contains(&truncation_notice()));
        assert!(!shown.contains("L0 "));
    }

    #[test]
    fn test_scroll_events_are_consumed() {
        let mut state = ResultViewState::new();
        assert_eq!(state.handle_event(&TuiEvent::ScrollDown), Some(()));
        assert_eq!(state.handle_event(&TuiEvent::InputChar('a')), None);
    }

    #[test]
    fn test_render_shows_result() {
        let backend = TestBackend::new(60, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = ResultViewState::new();

        terminal
            .draw(|f| {
                ResultView {
                    text: "{\n  \"statusCode\": 200\n}",
                    state: &mut state,
                }
                .render(f, f.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Response"));
        assert!(text.contains("\"statusCode\": 200"));
    }
}
