//! Pure text wrapping utilities and dimensional constants for the TextField.
//!
//! These are stateless helpers with no dependency on TextField or CursorState.

use std::borrow::Cow;

/// Border (2) + padding (2) consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Offset from area edge to content (border width)
pub(super) const BORDER_OFFSET: u16 = 1;

/// Build textwrap options configured for the field's inner width.
pub(super) fn wrap_options(inner_width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(inner_width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Calculate the inner content width after subtracting border/padding overhead.
/// Returns 0 if the area is too narrow.
pub(super) fn inner_width(content_width: u16) -> u16 {
    content_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Count wrapped lines for the given text, accounting for trailing newlines
/// that textwrap may not represent as empty lines.
pub(super) fn wrap_line_count(text: &str, width: u16) -> u16 {
    if width == 0 || text.is_empty() {
        return 1;
    }

    let lines = textwrap::wrap(text, wrap_options(width));
    let mut count = (lines.len() as u16).max(1);

    // textwrap doesn't always produce an empty trailing line for a trailing newline
    if text.ends_with('\n') && !lines.last().is_some_and(|l| l.is_empty()) {
        count += 1;
    }

    count
}

/// Wrapped rows of `text` paired with the byte offset each row starts at.
///
/// A newline that ends a row is skipped when computing the next offset.
pub(super) fn wrapped_rows(text: &str, width: u16) -> Vec<(usize, Cow<'_, str>)> {
    let mut offset = 0;
    textwrap::wrap(text, wrap_options(width))
        .into_iter()
        .map(|row| {
            let start = offset;
            let ends_at_newline = text.as_bytes().get(start + row.len()) == Some(&b'\n');
            offset += row.len() + usize::from(ends_at_newline);
            (start, row)
        })
        .collect()
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_line_count_empty_string() {
        assert_eq!(wrap_line_count("", 80), 1);
    }

    #[test]
    fn wrap_line_count_zero_width() {
        assert_eq!(wrap_line_count("hello", 0), 1);
    }

    #[test]
    fn wrap_line_count_counts_explicit_newlines() {
        assert_eq!(wrap_line_count("{\n  \"a\": 1\n}", 80), 3);
    }

    #[test]
    fn wrap_line_count_trailing_newline_adds_line() {
        assert_eq!(wrap_line_count("{}\n", 80), 2);
    }

    #[test]
    fn wrap_line_count_long_url_breaks() {
        let url = "https://example.com/".to_string() + &"a".repeat(30);
        assert_eq!(wrap_line_count(&url, 20), 3);
    }

    #[test]
    fn wrapped_rows_track_start_offsets() {
        let rows = wrapped_rows("{\n\"a\": 1\n}", 40);
        let starts: Vec<_> = rows.iter().map(|(start, row)| (*start, row.as_ref())).collect();
        assert_eq!(starts, vec![(0, "{"), (2, "\"a\": 1"), (9, "}")]);
    }

    #[test]
    fn wrapped_rows_split_long_words() {
        let rows = wrapped_rows("abcdefgh", 3);
        let starts: Vec<_> = rows.iter().map(|(start, _)| *start).collect();
        assert_eq!(starts, vec![0, 3, 6]);
    }

    #[test]
    fn char_boundaries_handle_multibyte() {
        let text = "aé日";
        assert_eq!(next_char_boundary(text, 0), 1);
        assert_eq!(next_char_boundary(text, 1), 3);
        assert_eq!(next_char_boundary(text, 3), 6);
        assert_eq!(prev_char_boundary(text, 6), 3);
        assert_eq!(prev_char_boundary(text, 3), 1);
        assert_eq!(prev_char_boundary(text, 0), 0);
    }

    #[test]
    fn inner_width_saturates() {
        assert_eq!(inner_width(3), 0);
        assert_eq!(inner_width(24), 20);
    }
}
