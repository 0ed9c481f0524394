//! Cursor position tracking and navigation for the TextField.
//!
//! `CursorState` owns the cursor byte offset, scroll offset, and cached width.
//! All navigation methods accept `buffer: &str` explicitly; the text itself is
//! owned by `TextField`.

use super::text_wrap::{BORDER_OFFSET, inner_width, wrap_line_count, wrap_options, wrapped_rows};
use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

/// Cursor and scroll state, separated from the text buffer.
pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// Line offset for internal scrolling (0 when content fits in viewport)
    pub scroll_offset: u16,
    /// Cached content width from last render (used for cursor movement)
    pub last_content_width: u16,
}

impl CursorState {
    const DEFAULT_WIDTH: u16 = 80;

    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
            last_content_width: Self::DEFAULT_WIDTH,
        }
    }

    /// Move cursor vertically (up or down) while trying to maintain column position.
    ///
    /// Returns `true` if cursor moved, `false` if already at boundary.
    pub fn move_vertically(&mut self, buffer: &str, direction: i16, content_width: u16) -> bool {
        let width = inner_width(content_width);
        if width == 0 || buffer.is_empty() {
            return false;
        }

        let rows = wrapped_rows(buffer, width);
        let Some(current) = rows
            .iter()
            .position(|(start, row)| start + row.len() >= self.pos)
        else {
            return false;
        };

        let target = if direction < 0 {
            current.checked_sub(1)
        } else {
            Some(current + 1).filter(|&t| t < rows.len())
        };
        let Some(target) = target else {
            return false;
        };

        // Same column, clamped to the target row and snapped to a char boundary
        let column = self.pos - rows[current].0;
        let (target_start, target_row) = &rows[target];
        let mut target_column = column.min(target_row.len());
        while !target_row.is_char_boundary(target_column) {
            target_column -= 1;
        }
        self.pos = target_start + target_column;

        true
    }

    /// Calculate which wrapped line (0-based) the cursor is on.
    pub fn calculate_line(&self, buffer: &str, content_width: u16) -> u16 {
        let width = inner_width(content_width);
        if width == 0 {
            return 0;
        }

        let text_before_cursor = &buffer[..self.pos];
        let lines = textwrap::wrap(text_before_cursor, wrap_options(width));
        let mut cursor_line = lines.len().saturating_sub(1) as u16;

        // If cursor is right after a newline that textwrap didn't represent, add one
        if self.pos > 0
            && buffer.as_bytes()[self.pos - 1] == b'\n'
            && !lines.last().is_some_and(|l| l.is_empty())
        {
            cursor_line += 1;
        }

        cursor_line
    }

    /// Update scroll offset to keep cursor visible within `max_lines` rows.
    pub fn update_scroll_offset(&mut self, buffer: &str, content_width: u16, max_lines: u16) {
        let width = inner_width(content_width);
        let total_lines = wrap_line_count(buffer, width);

        if total_lines <= max_lines {
            self.scroll_offset = 0;
            return;
        }

        let cursor_line = self.calculate_line(buffer, content_width);

        if cursor_line < self.scroll_offset {
            self.scroll_offset = cursor_line;
        } else if cursor_line >= self.scroll_offset + max_lines {
            self.scroll_offset = cursor_line.saturating_sub(max_lines - 1);
        }
    }

    /// Calculate screen position for cursor based on wrapped text layout.
    /// Returns (column, row) in screen coordinates.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let width = inner_width(area.width);
        if width == 0 {
            return (area.x + BORDER_OFFSET, area.y + BORDER_OFFSET);
        }

        let options = wrap_options(width);
        let text_before_cursor = &buffer[..self.pos];
        let cursor_line = self.calculate_line(buffer, area.width);

        // Column is measured from the last newline: textwrap trims trailing
        // whitespace, so wrapped line lengths would lose typed spaces.
        let last_newline = text_before_cursor
            .rfind('\n')
            .map(|pos| pos + 1)
            .unwrap_or(0);
        let logical_line_to_cursor = &text_before_cursor[last_newline..];

        let logical_line_wrapped = textwrap::wrap(logical_line_to_cursor, options);

        let cursor_col = if logical_line_wrapped.is_empty() {
            0
        } else {
            let width_in_prev_segments: usize = logical_line_wrapped
                .iter()
                .take(logical_line_wrapped.len() - 1)
                .map(|seg| seg.width())
                .sum();

            let total_width = logical_line_to_cursor.width();
            total_width.saturating_sub(width_in_prev_segments) as u16
        };

        let visible_line = cursor_line.saturating_sub(self.scroll_offset);

        let screen_col = area.x + BORDER_OFFSET + cursor_col;
        let screen_row = area.y + BORDER_OFFSET + visible_line;

        (screen_col, screen_row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_vertically_between_lines() {
        let buffer = "abc\ndef";
        let mut cursor = CursorState::new();
        cursor.pos = 5; // after 'd'

        assert!(cursor.move_vertically(buffer, -1, 40));
        assert_eq!(cursor.pos, 1);
        assert!(!cursor.move_vertically(buffer, -1, 40));
        assert!(cursor.move_vertically(buffer, 1, 40));
        assert_eq!(cursor.pos, 5);
    }

    #[test]
    fn move_vertically_snaps_to_char_boundary() {
        let buffer = "abc\né";
        let mut cursor = CursorState::new();
        cursor.pos = 1; // after 'a'

        assert!(cursor.move_vertically(buffer, 1, 40));
        assert_eq!(cursor.pos, 4); // start of 'é', not inside it
        assert!(!cursor.move_vertically(buffer, 1, 40));
    }

    #[test]
    fn calculate_line_after_newline() {
        let mut cursor = CursorState::new();
        cursor.pos = 3;
        assert_eq!(cursor.calculate_line("ab\n", 40), 1);
    }

    #[test]
    fn screen_pos_starts_inside_border() {
        let cursor = CursorState::new();
        let area = Rect::new(0, 0, 40, 3);
        assert_eq!(cursor.screen_pos("", area), (1, 1));
    }

    #[test]
    fn screen_pos_counts_typed_spaces() {
        let mut cursor = CursorState::new();
        cursor.pos = 3;
        let area = Rect::new(0, 0, 40, 3);
        assert_eq!(cursor.screen_pos("ab ", area), (4, 1));
    }

    #[test]
    fn scroll_offset_follows_cursor() {
        let buffer = "1\n2\n3\n4\n5\n6\n7";
        let mut cursor = CursorState::new();
        cursor.pos = buffer.len();
        cursor.update_scroll_offset(buffer, 40, 5);
        assert_eq!(cursor.scroll_offset, 2);

        cursor.pos = 0;
        cursor.update_scroll_offset(buffer, 40, 5);
        assert_eq!(cursor.scroll_offset, 0);
    }
}
