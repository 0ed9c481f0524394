//! # TextField Component
//!
//! Editable, bordered text field used for both the URL and the parameter
//! inputs.
//!
//! ## Responsibilities
//!
//! - Capture text input and paste
//! - Handle editing (backspace, delete, cursor movement)
//! - Emit `Submit` on Enter for single-line fields; multi-line fields insert
//!   a newline instead
//! - Show a highlighted border and the terminal cursor while focused
//!
//! ## State Management
//!
//! The buffer is internal state. `focused` is a prop set by the parent each
//! frame. Cursor position and scroll state are encapsulated in `CursorState`.

mod cursor;
mod text_wrap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::CursorState;
use text_wrap::{
    VERTICAL_OVERHEAD, inner_width, next_char_boundary, prev_char_boundary, wrap_line_count,
    wrap_options,
};

/// High-level events emitted by the TextField
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEvent {
    /// Enter pressed in a single-line field
    Submit,
    /// Text content or cursor changed
    ContentChanged,
}

/// Bordered text input.
///
/// # Props
///
/// - `focused`: whether keyboard input currently goes to this field
///
/// # State
///
/// - `buffer`: Current text
/// - `cursor`: Cursor position, scroll offset, and cached width (see `CursorState`)
pub struct TextField {
    title: String,
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Whether the field has keyboard focus (Prop)
    pub focused: bool,
    multiline: bool,
    max_visible_lines: u16,
    cursor: CursorState,
}

impl TextField {
    /// Single-line field. Newlines are never inserted; Enter submits.
    pub fn single_line(title: &str, text: &str) -> Self {
        Self::build(title, text, false, 1)
    }

    /// Multi-line field showing at most `max_visible_lines` rows before scrolling.
    pub fn multi_line(title: &str, text: &str, max_visible_lines: u16) -> Self {
        Self::build(title, text, true, max_visible_lines.max(1))
    }

    fn build(title: &str, text: &str, multiline: bool, max_visible_lines: u16) -> Self {
        let mut field = Self {
            title: title.to_string(),
            buffer: String::new(),
            focused: false,
            multiline,
            max_visible_lines,
            cursor: CursorState::new(),
        };
        field.set_text(text);
        field
    }

    /// Replace the content and move the cursor to the end.
    pub fn set_text(&mut self, text: &str) {
        self.buffer = if self.multiline {
            text.to_string()
        } else {
            text.replace(['\n', '\r'], " ")
        };
        self.cursor.pos = self.buffer.len();
        self.cursor.scroll_offset = 0;
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Required height for the current content, clamped to the visible limit.
    pub fn calculate_height(&self, content_width: u16) -> u16 {
        let width = inner_width(content_width);
        let content_lines = wrap_line_count(&self.buffer, width);
        content_lines.min(self.max_visible_lines) + VERTICAL_OVERHEAD
    }

    fn insert_str(&mut self, text: &str) {
        let text = if self.multiline {
            text.to_string()
        } else {
            text.replace(['\n', '\r'], " ")
        };
        self.buffer.insert_str(self.cursor.pos, &text);
        self.cursor.pos += text.len();
    }

    /// Visible text based on the current scroll offset.
    fn get_visible_text(&self, content_width: u16) -> String {
        if self.cursor.scroll_offset == 0 {
            return self.buffer.clone();
        }

        let width = inner_width(content_width);
        if width == 0 {
            return String::new();
        }

        let lines = textwrap::wrap(&self.buffer, wrap_options(width));

        let start = (self.cursor.scroll_offset as usize).min(lines.len());
        let end = (start + self.max_visible_lines as usize).min(lines.len());

        lines[start..end].join("\n")
    }
}

impl Component for TextField {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.cursor.last_content_width = area.width;
        self.cursor
            .update_scroll_offset(&self.buffer, area.width, self.max_visible_lines);

        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.title.as_str());

        let paragraph = Paragraph::new(self.get_visible_text(area.width))
            .block(block)
            .style(Style::default().fg(Color::Green));

        frame.render_widget(paragraph, area);

        if self.focused {
            let (cursor_x, cursor_y) = self.cursor.screen_pos(&self.buffer, area);
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }
}

impl EventHandler for TextField {
    type Event = FieldEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar('\n') if !self.multiline => None,
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor.pos, *c);
                self.cursor.pos += c.len_utf8();
                Some(FieldEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                self.insert_str(text);
                Some(FieldEvent::ContentChanged)
            }
            TuiEvent::Submit if self.multiline => {
                self.insert_str("\n");
                Some(FieldEvent::ContentChanged)
            }
            TuiEvent::Submit => Some(FieldEvent::Submit),
            TuiEvent::Backspace => (self.cursor.pos > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                FieldEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor.pos < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                FieldEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor.pos > 0).then(|| {
                self.cursor.pos = prev_char_boundary(&self.buffer, self.cursor.pos);
                FieldEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor.pos < self.buffer.len()).then(|| {
                self.cursor.pos = next_char_boundary(&self.buffer, self.cursor.pos);
                FieldEvent::ContentChanged
            }),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor.pos]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor.pos != line_start).then(|| {
                    self.cursor.pos = line_start;
                    FieldEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor.pos..]
                    .find('\n')
                    .map(|i| self.cursor.pos + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor.pos != line_end).then(|| {
                    self.cursor.pos = line_end;
                    FieldEvent::ContentChanged
                })
            }
            TuiEvent::CursorUp if self.multiline => self
                .cursor
                .move_vertically(&self.buffer, -1, self.cursor.last_content_width)
                .then_some(FieldEvent::ContentChanged),
            TuiEvent::CursorDown if self.multiline => self
                .cursor
                .move_vertically(&self.buffer, 1, self.cursor.last_content_width)
                .then_some(FieldEvent::ContentChanged),
            _ => None,
        }
    }
}
