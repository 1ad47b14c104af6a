//! Line-based text buffer.
//!
//! The buffer is an ordered list of lines, each holding its raw UTF-8 content without a
//! terminator. A buffer always has at least one line.

use crate::error::EditorError;
use crate::line_ending::{LineEnding, split_lines};
use crate::offsets::floor_char_boundary;

/// A buffer position: line index plus byte offset within that line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TextPos {
    /// Zero-based line index.
    pub line: usize,
    /// Byte offset within the line (on a char boundary).
    pub byte: usize,
}

impl TextPos {
    /// Create a new buffer position.
    pub fn new(line: usize, byte: usize) -> Self {
        Self { line, byte }
    }

    /// The position reached after `text` is inserted at `self`.
    pub fn advanced_by(self, text: &str) -> Self {
        match text.rfind('\n') {
            None => Self::new(self.line, self.byte + text.len()),
            Some(last) => {
                let newlines = text.bytes().filter(|&b| b == b'\n').count();
                Self::new(self.line + newlines, text.len() - last - 1)
            }
        }
    }
}

/// Ordered collection of lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    lines: Vec<String>,
    line_ending: LineEnding,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buffer {
    /// An empty buffer (one empty line).
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            line_ending: LineEnding::Lf,
        }
    }

    /// Build a buffer from newline-joined text. CRLF terminators are normalized away and
    /// remembered as the buffer's [`LineEnding`].
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: split_lines(text),
            line_ending: LineEnding::detect(text),
        }
    }

    /// Join all lines with the buffer's line ending.
    pub fn to_text(&self) -> String {
        self.line_ending.join(&self.lines)
    }

    /// Line ending used by [`Buffer::to_text`].
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Change the line ending used by [`Buffer::to_text`].
    pub fn set_line_ending(&mut self, line_ending: LineEnding) {
        self.line_ending = line_ending;
    }

    /// Number of lines (always at least 1).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Content of `line`, or `""` when the line does not exist.
    pub fn line(&self, line: usize) -> &str {
        self.lines.get(line).map(String::as_str).unwrap_or("")
    }

    /// Content of `line`, if it exists.
    pub fn get_line(&self, line: usize) -> Option<&str> {
        self.lines.get(line).map(String::as_str)
    }

    /// Iterate over line contents.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Position at the very end of the buffer.
    pub fn end(&self) -> TextPos {
        let last = self.lines.len() - 1;
        TextPos::new(last, self.lines[last].len())
    }

    /// Clamp an arbitrary position to the nearest valid one.
    pub fn clamp(&self, pos: TextPos) -> TextPos {
        let line = pos.line.min(self.lines.len() - 1);
        TextPos::new(line, floor_char_boundary(&self.lines[line], pos.byte))
    }

    /// Check that `pos` addresses an existing char boundary.
    pub fn check(&self, pos: TextPos) -> Result<(), EditorError> {
        let Some(line) = self.lines.get(pos.line) else {
            return Err(EditorError::LineOutOfBounds {
                line: pos.line,
                line_count: self.lines.len(),
            });
        };
        if pos.byte > line.len() {
            return Err(EditorError::ByteOutOfBounds {
                line: pos.line,
                byte: pos.byte,
                len: line.len(),
            });
        }
        if !line.is_char_boundary(pos.byte) {
            return Err(EditorError::NotCharBoundary {
                line: pos.line,
                byte: pos.byte,
            });
        }
        Ok(())
    }

    /// Insert `text` at `pos`. Each `'\n'` in `text` splits the line.
    ///
    /// Returns the position right after the inserted text.
    pub fn insert(&mut self, pos: TextPos, text: &str) -> Result<TextPos, EditorError> {
        self.check(pos)?;
        let end = pos.advanced_by(text);
        let mut segments = text.split('\n');
        let first = segments.next().unwrap_or("");
        let rest: Vec<&str> = segments.collect();

        let line = &mut self.lines[pos.line];
        if rest.is_empty() {
            line.insert_str(pos.byte, first);
            return Ok(end);
        }

        let tail = line.split_off(pos.byte);
        line.push_str(first);
        let count = rest.len();
        let new_lines = rest.into_iter().enumerate().map(|(i, segment)| {
            let mut s = segment.to_string();
            if i + 1 == count {
                s.push_str(&tail);
            }
            s
        });
        let at = pos.line + 1;
        self.lines.splice(at..at, new_lines);
        Ok(end)
    }

    /// Copy the text between `start` and `end` (lines joined with `'\n'`).
    pub fn slice(&self, start: TextPos, end: TextPos) -> Result<String, EditorError> {
        self.check(start)?;
        self.check(end)?;
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        if start.line == end.line {
            return Ok(self.lines[start.line][start.byte..end.byte].to_string());
        }
        let mut out = String::from(&self.lines[start.line][start.byte..]);
        for line in &self.lines[start.line + 1..end.line] {
            out.push('\n');
            out.push_str(line);
        }
        out.push('\n');
        out.push_str(&self.lines[end.line][..end.byte]);
        Ok(out)
    }

    /// Remove the text between `start` and `end`, joining lines as needed.
    ///
    /// Returns the removed text.
    pub fn remove(&mut self, start: TextPos, end: TextPos) -> Result<String, EditorError> {
        let removed = self.slice(start, end)?;
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        if start.line == end.line {
            self.lines[start.line].replace_range(start.byte..end.byte, "");
            return Ok(removed);
        }
        let tail = self.lines[end.line][end.byte..].to_string();
        let first = &mut self.lines[start.line];
        first.truncate(start.byte);
        first.push_str(&tail);
        self.lines.drain(start.line + 1..=end.line);
        Ok(removed)
    }

    /// Remove `expected` starting at `pos`, failing without mutating if the buffer holds
    /// different text there.
    pub fn remove_exact(&mut self, pos: TextPos, expected: &str) -> Result<(), EditorError> {
        let end = pos.advanced_by(expected);
        let found = match self.check(end) {
            Ok(()) => self.slice(pos, end)?,
            Err(_) => self.slice(pos, self.end().max(pos))?,
        };
        if found != expected {
            return Err(EditorError::HistoryMismatch {
                line: pos.line,
                byte: pos.byte,
                expected: expected.to_string(),
                found,
            });
        }
        self.remove(pos, end)?;
        Ok(())
    }

    /// Split `pos.line` at `pos.byte`; the tail becomes a new line below.
    pub fn split_line(&mut self, pos: TextPos) -> Result<(), EditorError> {
        self.insert(pos, "\n").map(|_| ())
    }

    /// Append the line below `line` to `line`. No-op on the last line.
    pub fn join_next_line(&mut self, line: usize) -> Result<(), EditorError> {
        if line + 1 >= self.lines.len() {
            self.check(TextPos::new(line, 0))?;
            return Ok(());
        }
        let next = self.lines.remove(line + 1);
        self.lines[line].push_str(&next);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_insert_with_newlines_splits_line() {
        let mut buffer = Buffer::from_text("hello world");
        let end = buffer.insert(TextPos::new(0, 5), ",\nbig\nwide").unwrap();
        assert_eq!(buffer.to_text(), "hello,\nbig\nwide world");
        assert_eq!(end, TextPos::new(2, 4));
    }

    #[test]
    fn test_remove_across_lines() {
        let mut buffer = Buffer::from_text("ab\ncd\nef");
        let removed = buffer.remove(TextPos::new(0, 1), TextPos::new(2, 1)).unwrap();
        assert_eq!(removed, "b\ncd\ne");
        assert_eq!(buffer.to_text(), "af");
        assert_eq!(buffer.line_count(), 1);
    }

    #[test]
    fn test_remove_exact_mismatch_leaves_buffer_untouched() {
        let mut buffer = Buffer::from_text("abc");
        let err = buffer.remove_exact(TextPos::new(0, 1), "x").unwrap_err();
        assert!(matches!(err, EditorError::HistoryMismatch { .. }));
        assert_eq!(buffer.to_text(), "abc");

        let err = buffer.remove_exact(TextPos::new(0, 2), "cdef").unwrap_err();
        assert!(matches!(err, EditorError::HistoryMismatch { .. }));

        buffer.remove_exact(TextPos::new(0, 1), "bc").unwrap();
        assert_eq!(buffer.to_text(), "a");
    }

    #[test]
    fn test_check_rejects_mid_codepoint() {
        let buffer = Buffer::from_text("é");
        assert_eq!(
            buffer.check(TextPos::new(0, 1)),
            Err(EditorError::NotCharBoundary { line: 0, byte: 1 })
        );
        assert!(buffer.check(TextPos::new(1, 0)).is_err());
    }

    #[test]
    fn test_crlf_round_trip_and_clamp() {
        let buffer = Buffer::from_text("a\r\nbé\r\n");
        assert_eq!(buffer.line_count(), 3);
        assert_eq!(buffer.line(1), "bé");
        assert_eq!(buffer.to_text(), "a\r\nbé\r\n");
        assert_eq!(buffer.clamp(TextPos::new(9, 9)), TextPos::new(2, 0));
        assert_eq!(buffer.clamp(TextPos::new(1, 2)), TextPos::new(1, 1));
    }

    #[test]
    fn test_split_and_join() {
        let mut buffer = Buffer::from_text("abcd");
        buffer.split_line(TextPos::new(0, 2)).unwrap();
        assert_eq!(buffer.to_text(), "ab\ncd");
        buffer.join_next_line(0).unwrap();
        assert_eq!(buffer.to_text(), "abcd");
        buffer.join_next_line(0).unwrap();
        assert_eq!(buffer.to_text(), "abcd");
    }
}
