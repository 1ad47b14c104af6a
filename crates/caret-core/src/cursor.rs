//! Cursor state machine.
//!
//! A [`Cursor`] tracks one position in a [`Buffer`] in three coordinate spaces at once: the line
//! index, the byte offset within the line, and the display column (visual offset). It also keeps
//! a *sticky column*, the display column remembered across vertical motion so that moving
//! through shorter lines and back restores the original column.
//!
//! Invariants (hold after every public call):
//!
//! - `line < buffer.line_count()`
//! - `byte <= line.len()` and `byte` is a char boundary
//! - `visual == visual_from_byte(line, byte)`
//!
//! History records use [`CursorSnapshot`], an immutable copy that is distinct from the live cursor.

use std::cmp::Ordering;

use crate::buffer::{Buffer, TextPos};
use crate::error::EditorError;
use crate::offsets::{
    byte_from_visual, char_width, floor_char_boundary, leading_whitespace_len, visual_from_byte,
};

/// A display-space position (line and display column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based display column.
    pub column: usize,
}

impl Point {
    /// Create a new display-space position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Immutable copy of a cursor's coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CursorSnapshot {
    /// Line index.
    pub line: usize,
    /// Byte offset within the line.
    pub byte: usize,
    /// Display column of `byte`.
    pub visual: usize,
    /// Column remembered for vertical motion.
    pub sticky_column: usize,
}

impl CursorSnapshot {
    /// Buffer position of this snapshot.
    pub fn pos(&self) -> TextPos {
        TextPos::new(self.line, self.byte)
    }

    /// Display position of this snapshot.
    pub fn point(&self) -> Point {
        Point::new(self.line, self.visual)
    }
}

/// Search target for line-anchored search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Needle<'a> {
    /// A literal substring. An empty literal never matches.
    Literal(&'a str),
    /// Any single codepoint from the set.
    AnyOf(&'a str),
}

impl Needle<'_> {
    fn find_in(&self, hay: &str) -> Option<usize> {
        match *self {
            Needle::Literal("") => None,
            Needle::Literal(s) => hay.find(s),
            Needle::AnyOf(set) => hay.find(|ch: char| set.contains(ch)),
        }
    }

    fn rfind_in(&self, hay: &str) -> Option<usize> {
        match *self {
            Needle::Literal("") => None,
            Needle::Literal(s) => hay.rfind(s),
            Needle::AnyOf(set) => hay.rfind(|ch: char| set.contains(ch)),
        }
    }
}

/// Word codepoints are letters and digits.
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphabetic() || ch.is_numeric()
}

fn bracket_pair(ch: char) -> Option<(char, char)> {
    match ch {
        '(' | ')' => Some(('(', ')')),
        '[' | ']' => Some(('[', ']')),
        '{' | '}' => Some(('{', '}')),
        _ => None,
    }
}

fn is_open_bracket(ch: char) -> bool {
    matches!(ch, '(' | '[' | '{')
}

fn is_close_bracket(ch: char) -> bool {
    matches!(ch, ')' | ']' | '}')
}

/// The live cursor.
#[derive(Debug)]
pub struct Cursor {
    line: usize,
    byte: usize,
    visual: usize,
    sticky_column: usize,
    tab_width: usize,
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new(crate::offsets::DEFAULT_TAB_WIDTH)
    }
}

impl Cursor {
    /// A cursor at the start of the buffer.
    pub fn new(tab_width: usize) -> Self {
        Self {
            line: 0,
            byte: 0,
            visual: 0,
            sticky_column: 0,
            tab_width: tab_width.max(1),
        }
    }

    /// A cursor at `pos`, clamped to the nearest valid position in `buffer`.
    pub fn at(buffer: &Buffer, pos: TextPos, tab_width: usize) -> Self {
        let mut cursor = Self::new(tab_width);
        cursor.set_position(buffer, pos);
        cursor
    }

    /// Line index.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Byte offset within the current line.
    pub fn byte(&self) -> usize {
        self.byte
    }

    /// Display column within the current line.
    pub fn visual(&self) -> usize {
        self.visual
    }

    /// Column remembered for vertical motion.
    pub fn sticky_column(&self) -> usize {
        self.sticky_column
    }

    /// Width of `'\t'` used for display-column math.
    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Buffer position.
    pub fn pos(&self) -> TextPos {
        TextPos::new(self.line, self.byte)
    }

    /// Display position.
    pub fn point(&self) -> Point {
        Point::new(self.line, self.visual)
    }

    /// Copy the current coordinates.
    pub fn snapshot(&self) -> CursorSnapshot {
        CursorSnapshot {
            line: self.line,
            byte: self.byte,
            visual: self.visual,
            sticky_column: self.sticky_column,
        }
    }

    /// Overwrite the coordinates with a snapshot taken against the same buffer state.
    pub fn restore(&mut self, snapshot: &CursorSnapshot) {
        self.line = snapshot.line;
        self.byte = snapshot.byte;
        self.visual = snapshot.visual;
        self.sticky_column = snapshot.sticky_column;
    }

    /// Move to `pos`, clamping the line and snapping the byte down to a char boundary.
    pub fn set_position(&mut self, buffer: &Buffer, pos: TextPos) {
        let pos = buffer.clamp(pos);
        self.line = pos.line;
        self.set_byte(buffer, pos.byte);
    }

    /// Move to `byte` on the current line and resynchronize visual and sticky columns.
    pub fn set_byte(&mut self, buffer: &Buffer, byte: usize) {
        let line = buffer.line(self.line);
        self.byte = floor_char_boundary(line, byte);
        self.visual = visual_from_byte(line, self.byte, self.tab_width);
        self.sticky_column = self.visual;
    }

    /// Move to the display column closest to `column` on the current line.
    pub fn set_visual(&mut self, buffer: &Buffer, column: usize) {
        let line = buffer.line(self.line);
        self.set_byte(buffer, byte_from_visual(line, column, self.tab_width));
    }

    fn shift_forward(&mut self, len: usize, width: usize) {
        self.byte += len;
        self.visual += width;
        self.sticky_column = self.visual;
    }

    fn shift_backward(&mut self, len: usize, width: usize) {
        self.byte -= len;
        self.visual -= width;
        self.sticky_column = self.visual;
    }

    /// After a line change, land as close to the sticky column as the new line allows.
    fn settle_on_sticky(&mut self, buffer: &Buffer) {
        let line = buffer.line(self.line);
        self.byte = byte_from_visual(line, self.sticky_column, self.tab_width);
        self.visual = visual_from_byte(line, self.byte, self.tab_width);
    }

    // ------------------------------------------------------------------
    // Boundary predicates
    // ------------------------------------------------------------------

    /// Codepoint right after the cursor on the current line.
    pub fn char_after(&self, buffer: &Buffer) -> Option<char> {
        buffer.line(self.line).get(self.byte..)?.chars().next()
    }

    /// Codepoint right before the cursor on the current line.
    pub fn char_before(&self, buffer: &Buffer) -> Option<char> {
        buffer.line(self.line).get(..self.byte)?.chars().next_back()
    }

    /// Line content before the cursor.
    pub fn line_before<'a>(&self, buffer: &'a Buffer) -> &'a str {
        let line = buffer.line(self.line);
        &line[..self.byte.min(line.len())]
    }

    pub fn at_line_start(&self) -> bool {
        self.byte == 0
    }

    pub fn at_line_end(&self, buffer: &Buffer) -> bool {
        self.byte >= buffer.line(self.line).len()
    }

    pub fn on_first_line(&self) -> bool {
        self.line == 0
    }

    pub fn on_last_line(&self, buffer: &Buffer) -> bool {
        self.line + 1 >= buffer.line_count()
    }

    pub fn at_buffer_start(&self) -> bool {
        self.on_first_line() && self.at_line_start()
    }

    pub fn at_buffer_end(&self, buffer: &Buffer) -> bool {
        self.on_last_line(buffer) && self.at_line_end(buffer)
    }

    /// Word codepoint after the cursor and a non-word (or nothing) before it.
    pub fn at_word_start(&self, buffer: &Buffer) -> bool {
        self.char_after(buffer).is_some_and(is_word_char)
            && !self.char_before(buffer).is_some_and(is_word_char)
    }

    /// Word codepoint before the cursor and a non-word (or nothing) after it.
    pub fn at_word_end(&self, buffer: &Buffer) -> bool {
        !self.char_after(buffer).is_some_and(is_word_char)
            && self.char_before(buffer).is_some_and(is_word_char)
    }

    /// Whether the cursor sits inside a `"..."` or `'...'` literal on its line.
    ///
    /// Scans from the line start; a quote preceded by an odd-length backslash run is escaped and
    /// does not toggle.
    pub fn in_string_literal(&self, buffer: &Buffer) -> bool {
        let mut quote: Option<char> = None;
        let mut backslashes = 0usize;
        for ch in self.line_before(buffer).chars() {
            if ch == '\\' {
                backslashes += 1;
                continue;
            }
            let escaped = backslashes % 2 == 1;
            backslashes = 0;
            match quote {
                None if (ch == '"' || ch == '\'') && !escaped => quote = Some(ch),
                Some(open) if ch == open && !escaped => quote = None,
                _ => {}
            }
        }
        quote.is_some()
    }

    // ------------------------------------------------------------------
    // Movement
    // ------------------------------------------------------------------

    /// One codepoint left; from a line start, to the end of the previous line.
    pub fn move_left(&mut self, buffer: &Buffer) {
        if self.at_buffer_start() {
            return;
        }
        if self.at_line_start() {
            self.line -= 1;
            self.set_byte(buffer, buffer.line(self.line).len());
            return;
        }
        if let Some(ch) = self.char_before(buffer) {
            self.shift_backward(ch.len_utf8(), char_width(ch, self.tab_width));
        }
    }

    /// One codepoint right; from a line end, to the start of the next line.
    pub fn move_right(&mut self, buffer: &Buffer) {
        if self.at_buffer_end(buffer) {
            return;
        }
        if self.at_line_end(buffer) {
            self.line += 1;
            self.set_byte(buffer, 0);
            return;
        }
        if let Some(ch) = self.char_after(buffer) {
            self.shift_forward(ch.len_utf8(), char_width(ch, self.tab_width));
        }
    }

    /// One line up, keeping the sticky column.
    pub fn move_up(&mut self, buffer: &Buffer) {
        if self.on_first_line() {
            return;
        }
        self.line -= 1;
        self.settle_on_sticky(buffer);
    }

    /// One line down, keeping the sticky column.
    pub fn move_down(&mut self, buffer: &Buffer) {
        if self.on_last_line(buffer) {
            return;
        }
        self.line += 1;
        self.settle_on_sticky(buffer);
    }

    fn step_left_until(&mut self, buffer: &Buffer, stop: impl Fn(&Self, &Buffer) -> bool) {
        loop {
            self.move_left(buffer);
            if stop(self, buffer) || self.at_buffer_start() {
                return;
            }
        }
    }

    fn step_right_until(&mut self, buffer: &Buffer, stop: impl Fn(&Self, &Buffer) -> bool) {
        loop {
            self.move_right(buffer);
            if stop(self, buffer) || self.at_buffer_end(buffer) {
                return;
            }
        }
    }

    /// Move back to the previous word edge (start or end of a letter/digit run).
    ///
    /// Built from single steps so that the display column is re-derived at every position.
    pub fn word_backward(&mut self, buffer: &Buffer) {
        if self.at_buffer_start() {
            return;
        }
        if self.at_word_start(buffer) {
            self.step_left_until(buffer, |c, b| c.at_word_end(b));
        } else if self.at_word_end(buffer) {
            self.step_left_until(buffer, |c, b| c.at_word_start(b));
        } else if self.char_after(buffer).is_some_and(is_word_char) {
            self.step_left_until(buffer, |c, b| c.at_word_start(b));
        } else {
            self.step_left_until(buffer, |c, b| c.at_word_end(b));
        }
    }

    /// Move forward to the next word edge (start or end of a letter/digit run).
    pub fn word_forward(&mut self, buffer: &Buffer) {
        if self.at_buffer_end(buffer) {
            return;
        }
        if self.at_word_start(buffer) {
            self.step_right_until(buffer, |c, b| c.at_word_end(b));
        } else if self.at_word_end(buffer) {
            self.step_right_until(buffer, |c, b| c.at_word_start(b));
        } else if self.char_after(buffer).is_some_and(is_word_char) {
            self.step_right_until(buffer, |c, b| c.at_word_end(b));
        } else {
            self.step_right_until(buffer, |c, b| c.at_word_start(b));
        }
    }

    pub fn line_start(&mut self, buffer: &Buffer) {
        self.set_byte(buffer, 0);
    }

    /// Smart home.
    ///
    /// At column 0 (and not on the first line) moves to the previous line. Otherwise jumps to the
    /// first non-whitespace byte when the cursor is right of it, else to column 0.
    pub fn line_start_skipping_indent(&mut self, buffer: &Buffer) {
        if self.at_line_start() && !self.on_first_line() {
            self.move_up(buffer);
            return;
        }
        let indent = leading_whitespace_len(buffer.line(self.line));
        if self.byte > indent {
            self.set_byte(buffer, indent);
        } else {
            self.set_byte(buffer, 0);
        }
    }

    pub fn line_end(&mut self, buffer: &Buffer) {
        self.set_byte(buffer, buffer.line(self.line).len());
    }

    /// End of line; when already there (and not on the last line), end of the next line.
    pub fn line_end_advance(&mut self, buffer: &Buffer) {
        if self.at_line_end(buffer) && !self.on_last_line(buffer) {
            self.move_down(buffer);
        }
        self.line_end(buffer);
    }

    /// Up to `page_size` lines up, stopping at the first line.
    pub fn page_up(&mut self, buffer: &Buffer, page_size: usize) {
        for _ in 0..page_size {
            if self.on_first_line() {
                break;
            }
            self.move_up(buffer);
        }
    }

    /// Up to `page_size` lines down, stopping at the last line.
    pub fn page_down(&mut self, buffer: &Buffer, page_size: usize) {
        for _ in 0..page_size {
            if self.on_last_line(buffer) {
                break;
            }
            self.move_down(buffer);
        }
    }

    pub fn document_start(&mut self, buffer: &Buffer) {
        while !self.on_first_line() {
            self.move_up(buffer);
        }
        self.line_start(buffer);
    }

    pub fn document_end(&mut self, buffer: &Buffer) {
        while !self.on_last_line(buffer) {
            self.move_down(buffer);
        }
        self.line_end(buffer);
    }

    /// Start of `line` (clamped to the last line).
    pub fn goto_line(&mut self, buffer: &Buffer, line: usize) {
        self.set_position(buffer, TextPos::new(line, 0));
    }

    /// Jump to the bracket matching the one next to the cursor.
    ///
    /// Triggers on an opener right before the cursor (scans forward, lands right before the
    /// closer) or a closer right after it (scans backward, lands right after the opener). A closer
    /// right before the cursor is treated like the closer-after case from one step to the left.
    /// Brackets inside string literals are ignored. When no match exists the cursor is left
    /// where it was. Returns whether a match was found.
    pub fn goto_matching_bracket(&mut self, buffer: &Buffer) -> bool {
        let before = self.char_before(buffer);
        let after = self.char_after(buffer);
        let origin = self.snapshot();

        let found = match (before, after) {
            (_, Some(close)) if is_close_bracket(close) => {
                if before.and_then(bracket_pair) == bracket_pair(close)
                    && before.is_some_and(is_open_bracket)
                {
                    // Empty pair: already at the match.
                    return true;
                }
                self.scan_backward_for_opener(buffer, close)
            }
            (Some(open), _) if is_open_bracket(open) => self.scan_forward_for_closer(buffer, open),
            (Some(close), _) if is_close_bracket(close) => {
                self.move_left(buffer);
                self.scan_backward_for_opener(buffer, close)
            }
            _ => return false,
        };

        if !found {
            self.restore(&origin);
        }
        found
    }

    fn scan_forward_for_closer(&mut self, buffer: &Buffer, open: char) -> bool {
        let Some((_, close)) = bracket_pair(open) else {
            return false;
        };
        let mut depth = 0usize;
        while !self.at_buffer_end(buffer) {
            if let Some(ch) = self.char_after(buffer)
                && (ch == open || ch == close)
                && !self.in_string_literal(buffer)
            {
                if ch == open {
                    depth += 1;
                } else if depth == 0 {
                    return true;
                } else {
                    depth -= 1;
                }
            }
            self.move_right(buffer);
        }
        false
    }

    fn scan_backward_for_opener(&mut self, buffer: &Buffer, close: char) -> bool {
        let Some((open, _)) = bracket_pair(close) else {
            return false;
        };
        let mut depth = 0usize;
        while !self.at_buffer_start() {
            self.move_left(buffer);
            let Some(ch) = self.char_after(buffer) else {
                continue;
            };
            if (ch != open && ch != close) || self.in_string_literal(buffer) {
                continue;
            }
            if ch == close {
                depth += 1;
            } else if depth == 0 {
                self.move_right(buffer);
                return true;
            } else {
                depth -= 1;
            }
        }
        false
    }

    // ------------------------------------------------------------------
    // Line-anchored search
    // ------------------------------------------------------------------

    fn jump_to(&mut self, buffer: &Buffer, pos: TextPos) {
        self.line = pos.line;
        self.set_byte(buffer, pos.byte);
    }

    /// Next occurrence strictly after the cursor, scanning the rest of the current line and then
    /// the following lines. Does not wrap. Returns whether the cursor moved.
    pub fn find_next(&mut self, buffer: &Buffer, needle: Needle<'_>) -> bool {
        for l in self.line..buffer.line_count() {
            let text = buffer.line(l);
            let from = if l == self.line {
                match self.char_after(buffer) {
                    Some(ch) => self.byte + ch.len_utf8(),
                    None => continue,
                }
            } else {
                0
            };
            if let Some(b) = needle.find_in(&text[from..]) {
                self.jump_to(buffer, TextPos::new(l, from + b));
                return true;
            }
        }
        false
    }

    /// Previous occurrence strictly before the cursor, scanning the head of the current line and
    /// then the preceding lines. Does not wrap.
    pub fn find_prev(&mut self, buffer: &Buffer, needle: Needle<'_>) -> bool {
        for l in (0..=self.line).rev() {
            let text = buffer.line(l);
            let hay = if l == self.line {
                &text[..self.byte.min(text.len())]
            } else {
                text
            };
            if let Some(b) = needle.rfind_in(hay) {
                self.jump_to(buffer, TextPos::new(l, b));
                return true;
            }
        }
        false
    }

    /// First occurrence in the buffer (wraparound fallback for [`Cursor::find_next`]).
    pub fn find_first(&mut self, buffer: &Buffer, needle: Needle<'_>) -> bool {
        for (l, text) in buffer.lines().enumerate() {
            if let Some(b) = needle.find_in(text) {
                self.jump_to(buffer, TextPos::new(l, b));
                return true;
            }
        }
        false
    }

    /// Last occurrence in the buffer (wraparound fallback for [`Cursor::find_prev`]).
    pub fn find_last(&mut self, buffer: &Buffer, needle: Needle<'_>) -> bool {
        for l in (0..buffer.line_count()).rev() {
            if let Some(b) = needle.rfind_in(buffer.line(l)) {
                self.jump_to(buffer, TextPos::new(l, b));
                return true;
            }
        }
        false
    }

    /// Next non-empty line that does not start with any codepoint in `excluded`.
    pub fn next_unindented_line(&mut self, buffer: &Buffer, excluded: &str) -> bool {
        let found = (self.line + 1..buffer.line_count())
            .find(|&l| starts_outside(buffer.line(l), excluded));
        self.land_on_line(buffer, found)
    }

    /// Previous non-empty line that does not start with any codepoint in `excluded`. The current
    /// line counts when the cursor is not at its start.
    pub fn prev_unindented_line(&mut self, buffer: &Buffer, excluded: &str) -> bool {
        let found = self
            .backward_line_range()
            .rev()
            .find(|&l| starts_outside(buffer.line(l), excluded));
        self.land_on_line(buffer, found)
    }

    /// Next line starting with one of `prefixes`.
    pub fn next_definition(&mut self, buffer: &Buffer, prefixes: &[&str]) -> bool {
        let found = (self.line + 1..buffer.line_count())
            .find(|&l| prefixes.iter().any(|p| buffer.line(l).starts_with(p)));
        self.land_on_line(buffer, found)
    }

    /// Previous line starting with one of `prefixes`. The current line counts when the cursor is
    /// not at its start.
    pub fn prev_definition(&mut self, buffer: &Buffer, prefixes: &[&str]) -> bool {
        let found = self
            .backward_line_range()
            .rev()
            .find(|&l| prefixes.iter().any(|p| buffer.line(l).starts_with(p)));
        self.land_on_line(buffer, found)
    }

    fn backward_line_range(&self) -> std::ops::Range<usize> {
        if self.at_line_start() {
            0..self.line
        } else {
            0..self.line + 1
        }
    }

    fn land_on_line(&mut self, buffer: &Buffer, line: Option<usize>) -> bool {
        match line {
            Some(l) => {
                self.jump_to(buffer, TextPos::new(l, 0));
                true
            }
            None => false,
        }
    }

    /// Next argument separator (`{ ( , ) }`), stepping inside an opening bracket.
    pub fn next_argument(&mut self, buffer: &Buffer) -> bool {
        let found = self.find_next(buffer, Needle::AnyOf(ARGUMENT_SEPARATORS));
        if matches!(self.char_after(buffer), Some('(' | '{')) {
            self.move_right(buffer);
        }
        found
    }

    /// Previous argument separator (`{ ( , ) }`), stepping inside an opening bracket.
    pub fn prev_argument(&mut self, buffer: &Buffer) -> bool {
        if matches!(self.char_before(buffer), Some('(' | '{')) {
            self.move_left(buffer);
        }
        let found = self.find_prev(buffer, Needle::AnyOf(ARGUMENT_SEPARATORS));
        if matches!(self.char_after(buffer), Some('(' | '{')) {
            self.move_right(buffer);
        }
        found
    }

    /// The letter/digit run the cursor is on (the codepoint after the cursor must be part of it).
    pub fn word_under_cursor<'a>(&self, buffer: &'a Buffer) -> Option<&'a str> {
        if !self.char_after(buffer).is_some_and(is_word_char) {
            return None;
        }
        let line = buffer.line(self.line);
        let start = line[..self.byte]
            .char_indices()
            .rev()
            .take_while(|(_, ch)| is_word_char(*ch))
            .last()
            .map(|(b, _)| b)
            .unwrap_or(self.byte);
        let end = line[self.byte..]
            .char_indices()
            .find(|(_, ch)| !is_word_char(*ch))
            .map(|(b, _)| self.byte + b)
            .unwrap_or(line.len());
        Some(&line[start..end])
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Insert `text` at the cursor and move past it. `'\n'` splits the line.
    pub fn insert(&mut self, buffer: &mut Buffer, text: &str) -> Result<(), EditorError> {
        let end = buffer.insert(self.pos(), text)?;
        self.jump_to(buffer, end);
        Ok(())
    }

    /// Delete the codepoint after the cursor (joining the next line at a line end).
    ///
    /// Returns the removed text; empty at the buffer end.
    pub fn delete(&mut self, buffer: &mut Buffer) -> Result<String, EditorError> {
        if self.at_buffer_end(buffer) {
            return Ok(String::new());
        }
        if self.at_line_end(buffer) {
            buffer.join_next_line(self.line)?;
            return Ok("\n".to_string());
        }
        let Some(ch) = self.char_after(buffer) else {
            return Ok(String::new());
        };
        let end = TextPos::new(self.line, self.byte + ch.len_utf8());
        buffer.remove(self.pos(), end)
    }

    /// Delete the codepoint before the cursor. Returns the removed text; empty at the buffer
    /// start.
    pub fn backspace(&mut self, buffer: &mut Buffer) -> Result<String, EditorError> {
        if self.at_buffer_start() {
            return Ok(String::new());
        }
        self.move_left(buffer);
        self.delete(buffer)
    }

    /// Remove the text between two positions (in either order) and move to the earlier one.
    pub fn delete_range(
        &mut self,
        buffer: &mut Buffer,
        a: TextPos,
        b: TextPos,
    ) -> Result<String, EditorError> {
        let start = a.min(b);
        let removed = buffer.remove(a, b)?;
        self.jump_to(buffer, start);
        Ok(removed)
    }
}

const ARGUMENT_SEPARATORS: &str = "{(,)}";

fn starts_outside(line: &str, excluded: &str) -> bool {
    line.chars().next().is_some_and(|ch| !excluded.contains(ch))
}
