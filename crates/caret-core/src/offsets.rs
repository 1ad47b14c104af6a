//! Offset translation within a single line.
//!
//! A line is addressed in three coordinate spaces:
//!
//! - **byte offset**: index into the UTF-8 content, always on a `char` boundary
//! - **char offset**: number of Unicode scalar values before a position
//! - **visual offset**: number of terminal cells before a position
//!
//! These functions are the only place that knows about encoding and display width. Everything
//! else (cursor, selection, rendering) calls into them.

use unicode_width::UnicodeWidthChar;

/// Default tab width (in cells) used when a caller does not specify a tab width.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Display width of a single codepoint (based on UAX #11).
///
/// - `'\t'` is a fixed `tab_width` cells (no elastic tab stops).
/// - Wide and fullwidth codepoints take 2 cells.
/// - Everything else, including control and combining codepoints, takes 1 cell.
pub fn char_width(ch: char, tab_width: usize) -> usize {
    if ch == '\t' {
        return tab_width.max(1);
    }
    match UnicodeWidthChar::width(ch) {
        Some(2) => 2,
        _ => 1,
    }
}

/// Total display width of a line.
pub fn line_visual_len(line: &str, tab_width: usize) -> usize {
    line.chars().map(|ch| char_width(ch, tab_width)).sum()
}

/// Largest char boundary `<= byte`, clamped to the line length.
pub fn floor_char_boundary(line: &str, byte: usize) -> usize {
    if byte >= line.len() {
        return line.len();
    }
    let mut b = byte;
    while !line.is_char_boundary(b) {
        b -= 1;
    }
    b
}

/// Sum of display widths of every codepoint strictly before `byte`.
///
/// `byte` is clamped to the line and floored to a char boundary.
pub fn visual_from_byte(line: &str, byte: usize, tab_width: usize) -> usize {
    let byte = floor_char_boundary(line, byte);
    line_visual_len(&line[..byte], tab_width)
}

/// Byte offset of the codepoint boundary at display column `target`.
///
/// - A target past the end of the line clamps to the line end.
/// - A target strictly inside a multi-cell glyph (tab or wide char) resolves to the start of that
///   glyph; the cursor never lands in the middle of a glyph.
pub fn byte_from_visual(line: &str, target: usize, tab_width: usize) -> usize {
    let mut visual = 0usize;
    for (byte, ch) in line.char_indices() {
        if visual >= target {
            return byte;
        }
        let next = visual + char_width(ch, tab_width);
        if next > target {
            return byte;
        }
        visual = next;
    }
    line.len()
}

/// Byte offset after walking `char_count` codepoints (clamped to the line end).
pub fn byte_from_char(line: &str, char_count: usize) -> usize {
    line.char_indices()
        .nth(char_count)
        .map(|(byte, _)| byte)
        .unwrap_or(line.len())
}

/// Number of codepoints before `byte`.
pub fn char_from_byte(line: &str, byte: usize) -> usize {
    let byte = floor_char_boundary(line, byte);
    line[..byte].chars().count()
}

/// Byte length of the leading run of spaces and tabs.
pub fn leading_whitespace_len(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_is_a_fixed_stop() {
        let line = "\tab";
        assert_eq!(visual_from_byte(line, 1, 4), 4);
        assert_eq!(visual_from_byte(line, 2, 4), 5);
        assert_eq!(visual_from_byte(line, 3, 4), 6);
        // A tab later in the line is still exactly one stop wide.
        assert_eq!(line_visual_len("ab\tc", 4), 7);
    }

    #[test]
    fn test_wide_glyph_never_split() {
        // "a", "你" (2 cells), "b"
        let line = "a你b";
        assert_eq!(visual_from_byte(line, 1, 4), 1);
        assert_eq!(visual_from_byte(line, 4, 4), 3);
        assert_eq!(byte_from_visual(line, 1, 4), 1);
        // Column 2 is the right half of "你": snap to its start.
        assert_eq!(byte_from_visual(line, 2, 4), 1);
        assert_eq!(byte_from_visual(line, 3, 4), 4);
        assert_eq!(byte_from_visual(line, 99, 4), line.len());
    }

    #[test]
    fn test_inside_tab_snaps_to_tab_start() {
        let line = "x\ty";
        for target in 2..5 {
            assert_eq!(byte_from_visual(line, target, 4), 1);
        }
        assert_eq!(byte_from_visual(line, 5, 4), 2);
    }

    #[test]
    fn test_round_trip_on_every_boundary() {
        let line = "\tfn 名前(x: &str) -> é\u{301} // ok";
        for (byte, _) in line.char_indices().chain(std::iter::once((line.len(), ' '))) {
            let visual = visual_from_byte(line, byte, 4);
            assert_eq!(byte_from_visual(line, visual, 4), byte, "byte {byte}");
        }
    }

    #[test]
    fn test_control_and_combining_fall_back_to_one_cell() {
        assert_eq!(char_width('\u{1}', 4), 1);
        assert_eq!(char_width('\u{301}', 4), 1);
        assert_eq!(char_width('中', 4), 2);
    }

    #[test]
    fn test_byte_from_char() {
        let line = "héllo";
        assert_eq!(byte_from_char(line, 0), 0);
        assert_eq!(byte_from_char(line, 2), 3);
        assert_eq!(byte_from_char(line, 50), line.len());
        assert_eq!(char_from_byte(line, 3), 2);
    }

    #[test]
    fn test_leading_whitespace_len() {
        assert_eq!(leading_whitespace_len("\t  x"), 3);
        assert_eq!(leading_whitespace_len("   "), 3);
        assert_eq!(leading_whitespace_len("x"), 0);
    }
}
