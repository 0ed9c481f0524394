//! # ActionBar Component
//!
//! One line of key hints for the four request operations. Hints are dimmed
//! while a request is in flight; the keys still work, since overlapping
//! requests are allowed and stale answers are discarded by the reducer.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::network::RequestKind;
use crate::tui::component::Component;

pub struct ActionBar {
    pub in_flight: bool,
}

/// Function key bound to each operation.
pub fn key_for(kind: RequestKind) -> &'static str {
    match kind {
        RequestKind::Get => "F1",
        RequestKind::GetWithParams => "F2",
        RequestKind::Post => "F3",
        RequestKind::PostWithParams => "F4",
    }
}

impl Component for ActionBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let key_style = if self.in_flight {
            Style::default().add_modifier(Modifier::DIM)
        } else {
            Style::default().fg(Color::Black).bg(Color::Blue)
        };

        let mut spans = Vec::new();
        for kind in RequestKind::ALL {
            spans.push(Span::styled(format!(" {} ", key_for(kind)), key_style));
            spans.push(Span::raw(format!(" {}  ", kind.label())));
        }
        spans.push(Span::styled(
            "Tab focus  Ctrl+L clear  Esc quit",
            Style::default().fg(Color::DarkGray),
        ));

        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_render_lists_all_operations() {
        let backend = TestBackend::new(120, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut bar = ActionBar { in_flight: false };

        terminal
            .draw(|f| {
                bar.render(f, f.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("F1  GET"));
        assert!(text.contains("F2  GET+params"));
        assert!(text.contains("F3  POST"));
        assert!(text.contains("F4  POST+params"));
    }
}
