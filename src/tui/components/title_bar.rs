//! # TitleBar Component
//!
//! Top status bar: application name, adapter name, status text, and a
//! spinner while a request is in flight.
//!
//! Stateless: all data arrives as props.
//!
//! ## Conditional Formatting
//!
//! 1. **In flight**: `"netbridge (NetworkModule) | ⠹ GET http://... ..."`
//! 2. **Completed**: `"netbridge (NetworkModule) | GET done (200) | 12:30:05"`
//! 3. **Status only**: `"netbridge (NetworkModule) | Ready"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;

const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub struct TitleBar {
    pub client_name: String,
    pub status_message: String,
    pub in_flight: bool,
    /// Wall-clock time of the displayed outcome, preformatted
    pub completed_at: Option<String>,
    pub spinner_frame: usize,
}

impl TitleBar {
    pub fn text(&self) -> String {
        let mut text = format!("netbridge ({})", self.client_name);
        if self.in_flight {
            let spinner = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
            text.push_str(&format!(" | {} {}", spinner, self.status_message));
        } else if !self.status_message.is_empty() {
            text.push_str(&format!(" | {}", self.status_message));
        }
        if !self.in_flight
            && let Some(ref at) = self.completed_at
        {
            text.push_str(&format!(" | {}", at));
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = if self.in_flight {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        frame.render_widget(Span::styled(self.text(), style), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn title_bar() -> TitleBar {
        TitleBar {
            client_name: "NetworkModule".to_string(),
            status_message: "Ready".to_string(),
            in_flight: false,
            completed_at: None,
            spinner_frame: 0,
        }
    }

    #[test]
    fn test_idle_text() {
        assert_eq!(title_bar().text(), "netbridge (NetworkModule) | Ready");
    }

    #[test]
    fn test_in_flight_shows_spinner_and_hides_timestamp() {
        let bar = TitleBar {
            in_flight: true,
            status_message: "GET http://x ...".to_string(),
            completed_at: Some("12:00:00".to_string()),
            spinner_frame: 12,
            ..title_bar()
        };
        let text = bar.text();
        assert!(text.contains("⠹ GET http://x ..."));
        assert!(!text.contains("12:00:00"));
    }

    #[test]
    fn test_completed_shows_timestamp() {
        let bar = TitleBar {
            status_message: "GET done (200)".to_string(),
            completed_at: Some("12:00:00".to_string()),
            ..title_bar()
        };
        assert_eq!(
            bar.text(),
            "netbridge (NetworkModule) | GET done (200) | 12:00:00"
        );
    }

    #[test]
    fn test_render() {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut bar = title_bar();

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
        assert!(text.contains("netbridge (NetworkModule)"));
    }
}
