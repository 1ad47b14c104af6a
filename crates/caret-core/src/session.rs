//! Editor session: one open document and everything that edits it.
//!
//! [`EditorSession`] owns the [`Buffer`], the live [`Cursor`], the [`Selection`], the
//! [`History`], a clipboard register and an optional [`SyntaxMatcher`]. Input handling is reduced
//! to a sequence of abstract [`Request`]s; [`EditorSession::execute`] runs one of them and
//! returns an [`Outcome`] for the caller to re-render.
//!
//! Requests are primitives. Composite key bindings ("delete the selection, then insert") are
//! expressed as a batch:
//!
//! ```
//! use caret_core::{EditorSession, Request};
//!
//! let mut session = EditorSession::open("hello world", None);
//! session.execute_batch([
//!     Request::SelectionOn,
//!     Request::Move(caret_core::Motion::WordForward),
//!     Request::DeleteSelection,
//!     Request::Insert("goodbye".into()),
//! ])?;
//! assert_eq!(session.text(), "goodbye world");
//! # Ok::<(), caret_core::EditorError>(())
//! ```

use std::ops::Range;

use crate::action::{Action, Edit, IndentChange};
use crate::buffer::{Buffer, TextPos};
use crate::config::{EditorConfig, LastPosition};
use crate::cursor::{Cursor, CursorSnapshot, Needle};
use crate::error::EditorError;
use crate::history::History;
use crate::offsets::leading_whitespace_len;
use crate::selection::Selection;
use crate::syntax::{Match, RuleTable, SyntaxMatcher};

/// Codepoints that disqualify a line as a "global" (unindented) line.
pub const GLOBAL_LINE_EXCLUDED: &str = " \t#/{}()";

/// A cursor motion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    WordBackward,
    WordForward,
    LineStart,
    LineStartSkippingIndent,
    LineEnd,
    LineEndAdvance,
    PageUp,
    PageDown,
    DocumentStart,
    DocumentEnd,
    MatchingBracket,
    /// Next non-empty line not starting with any of [`GLOBAL_LINE_EXCLUDED`].
    NextUnindentedLine,
    PrevUnindentedLine,
    /// Next line starting with one of the given prefixes.
    NextDefinition(Vec<String>),
    PrevDefinition(Vec<String>),
    NextArgument,
    PrevArgument,
}

/// One abstract edit or movement request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Move(Motion),
    /// Anchor a selection at the cursor (no-op when one is already active).
    SelectionOn,
    SelectionOff,
    /// Select the current line, or extend the selection by one line.
    SelectLine,
    /// Select the word around the cursor, or extend the selection to the next word edge.
    SelectWord,
    Insert(String),
    /// Line break followed by the current line's leading whitespace.
    NewlineAutoIndent,
    Delete,
    Backspace,
    DeleteSelection,
    Indent,
    Outdent,
    /// Copy the selection (or the codepoint after the cursor) into the register.
    Copy,
    /// Copy, then delete the selection (or the codepoint after the cursor).
    Cut,
    Paste,
    Replace(String),
    Undo,
    Redo,
    FindNext(String),
    FindPrev(String),
    /// Find the next occurrence and select it.
    FindNextSelect(String),
    FindPrevSelect(String),
    GotoLine(usize),
}

/// Result of a find request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchHit {
    /// Found in the searched direction.
    Found,
    /// Found only after falling back to the first/last occurrence in the buffer.
    Wrapped,
    NotFound,
}

/// What a request did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Actions recorded by the request (or replayed, for undo/redo).
    pub actions: Vec<Action>,
    pub search: Option<SearchHit>,
    pub cursor: CursorSnapshot,
    pub selection: Selection,
}

/// One open document.
#[derive(Debug)]
pub struct EditorSession {
    config: EditorConfig,
    buffer: Buffer,
    cursor: Cursor,
    selection: Selection,
    history: History,
    register: String,
    syntax: Option<SyntaxMatcher>,
}

impl EditorSession {
    /// Open `text` with the default configuration.
    pub fn open(text: &str, last_position: Option<LastPosition>) -> Self {
        Self::with_config(EditorConfig::default(), text, last_position)
    }

    /// Open `text`, seeding the cursor from a persisted position.
    ///
    /// A position outside the document is clamped to the nearest valid one.
    pub fn with_config(
        config: EditorConfig,
        text: &str,
        last_position: Option<LastPosition>,
    ) -> Self {
        let buffer = Buffer::from_text(text);
        let requested = last_position
            .map(|p| TextPos::new(p.line, p.byte))
            .unwrap_or_default();
        let seeded = buffer.clamp(requested);
        if seeded != requested {
            tracing::warn!(
                requested_line = requested.line,
                requested_byte = requested.byte,
                line = seeded.line,
                byte = seeded.byte,
                "last position out of range, clamped"
            );
        }
        let cursor = Cursor::at(&buffer, seeded, config.tab_width);
        Self {
            config,
            buffer,
            cursor,
            selection: Selection::new(),
            history: History::new(),
            register: String::new(),
            syntax: None,
        }
    }

    /// Attach a syntax rule table.
    pub fn with_syntax(mut self, rules: RuleTable) -> Self {
        self.syntax = Some(SyntaxMatcher::new(rules));
        self
    }

    pub fn set_syntax(&mut self, rules: Option<RuleTable>) {
        self.syntax = rules.map(SyntaxMatcher::new);
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn register(&self) -> &str {
        &self.register
    }

    pub fn set_register(&mut self, text: impl Into<String>) {
        self.register = text.into();
    }

    pub fn syntax(&self) -> Option<&SyntaxMatcher> {
        self.syntax.as_ref()
    }

    /// Document text with the buffer's line ending.
    pub fn text(&self) -> String {
        self.buffer.to_text()
    }

    /// Cursor position for the persistence layer.
    pub fn last_position(&self) -> LastPosition {
        LastPosition {
            line: self.cursor.line(),
            byte: self.cursor.byte(),
        }
    }

    /// Whether the document differs from the last saved state.
    pub fn is_modified(&self) -> bool {
        !self.history.is_clean()
    }

    /// Record that the document has been saved.
    pub fn mark_saved(&mut self) {
        self.history.mark_clean();
    }

    /// Currently selected text, if a selection is active.
    pub fn selected_text(&self) -> Option<String> {
        if !self.selection.is_active() {
            return None;
        }
        let (start, end) = self.selection.byte_range();
        self.buffer.slice(start, end).ok()
    }

    /// Syntax matches for `lines`, scanning on demand within the configured budget.
    ///
    /// Lines the budget did not reach have no matches yet; calling again continues the scan.
    pub fn matches_for_lines(&mut self, lines: Range<usize>) -> &[Match] {
        let Some(syntax) = self.syntax.as_mut() else {
            return &[];
        };
        let through = lines.end.saturating_sub(1);
        syntax.ensure_scanned(&self.buffer, through, self.config.scan_budget_bytes);
        syntax.matches_in(lines)
    }

    /// Run a sequence of requests, stopping at the first error.
    pub fn execute_batch(
        &mut self,
        requests: impl IntoIterator<Item = Request>,
    ) -> Result<Outcome, EditorError> {
        let mut actions = Vec::new();
        let mut search = None;
        for request in requests {
            let outcome = self.execute(request)?;
            actions.extend(outcome.actions);
            search = outcome.search.or(search);
        }
        Ok(self.outcome(actions, search))
    }

    /// Run one request.
    pub fn execute(&mut self, request: Request) -> Result<Outcome, EditorError> {
        let mut actions = Vec::new();
        let mut search = None;
        match request {
            Request::Move(motion) => self.apply_motion(&motion),
            Request::SelectionOn => self.selection.start(&self.cursor),
            Request::SelectionOff => self.selection.clear(),
            Request::SelectLine => self.select_line(),
            Request::SelectWord => self.select_word(),
            Request::Insert(text) => self.insert_text(&text, EditKind::Insert, &mut actions)?,
            Request::NewlineAutoIndent => {
                let line = self.buffer.line(self.cursor.line());
                let indent = &line[..leading_whitespace_len(line).min(self.cursor.byte())];
                let text = format!("\n{indent}");
                self.insert_text(&text, EditKind::Insert, &mut actions)?;
            }
            Request::Delete => {
                let before = self.cursor.snapshot();
                let text = self.cursor.delete(&mut self.buffer)?;
                self.record(Edit::Delete { text }, before, &mut actions);
            }
            Request::Backspace => {
                let before = self.cursor.snapshot();
                let text = self.cursor.backspace(&mut self.buffer)?;
                self.record(Edit::Backspace { text }, before, &mut actions);
            }
            Request::DeleteSelection => self.delete_selection(&mut actions)?,
            Request::Indent => self.indent(&mut actions)?,
            Request::Outdent => self.outdent(&mut actions)?,
            Request::Copy => self.copy(),
            Request::Cut => {
                self.copy();
                if self.selection.is_active() {
                    self.delete_selection(&mut actions)?;
                } else {
                    let before = self.cursor.snapshot();
                    let text = self.cursor.delete(&mut self.buffer)?;
                    self.record(Edit::Delete { text }, before, &mut actions);
                }
            }
            Request::Paste => {
                let text = self.register.clone();
                self.insert_text(&text, EditKind::Paste, &mut actions)?;
            }
            Request::Replace(text) => self.insert_text(&text, EditKind::Replace, &mut actions)?,
            Request::Undo => {
                self.selection.clear();
                if let Some(action) = self.history.undo(&mut self.buffer, &mut self.cursor)? {
                    let action = action.clone();
                    self.invalidate_syntax(action.first_line());
                    actions.push(action);
                }
            }
            Request::Redo => {
                self.selection.clear();
                if let Some(action) = self.history.redo(&mut self.buffer, &mut self.cursor)? {
                    let action = action.clone();
                    self.invalidate_syntax(action.first_line());
                    actions.push(action);
                }
            }
            Request::FindNext(needle) => search = Some(self.find(&needle, true)),
            Request::FindPrev(needle) => search = Some(self.find(&needle, false)),
            Request::FindNextSelect(needle) => search = Some(self.find_select(&needle, true)),
            Request::FindPrevSelect(needle) => search = Some(self.find_select(&needle, false)),
            Request::GotoLine(line) => self.cursor.goto_line(&self.buffer, line),
        }
        if self.selection.is_active() {
            self.selection.clamp_to(&self.buffer, self.config.tab_width);
            self.selection.set_focus(&self.cursor);
        }
        Ok(self.outcome(actions, search))
    }

    fn outcome(&self, actions: Vec<Action>, search: Option<SearchHit>) -> Outcome {
        Outcome {
            actions,
            search,
            cursor: self.cursor.snapshot(),
            selection: self.selection,
        }
    }

    fn apply_motion(&mut self, motion: &Motion) {
        let buffer = &self.buffer;
        let cursor = &mut self.cursor;
        match motion {
            Motion::Left => cursor.move_left(buffer),
            Motion::Right => cursor.move_right(buffer),
            Motion::Up => cursor.move_up(buffer),
            Motion::Down => cursor.move_down(buffer),
            Motion::WordBackward => cursor.word_backward(buffer),
            Motion::WordForward => cursor.word_forward(buffer),
            Motion::LineStart => cursor.line_start(buffer),
            Motion::LineStartSkippingIndent => cursor.line_start_skipping_indent(buffer),
            Motion::LineEnd => cursor.line_end(buffer),
            Motion::LineEndAdvance => cursor.line_end_advance(buffer),
            Motion::PageUp => cursor.page_up(buffer, self.config.page_size),
            Motion::PageDown => cursor.page_down(buffer, self.config.page_size),
            Motion::DocumentStart => cursor.document_start(buffer),
            Motion::DocumentEnd => cursor.document_end(buffer),
            Motion::MatchingBracket => {
                cursor.goto_matching_bracket(buffer);
            }
            Motion::NextUnindentedLine => {
                cursor.next_unindented_line(buffer, GLOBAL_LINE_EXCLUDED);
            }
            Motion::PrevUnindentedLine => {
                cursor.prev_unindented_line(buffer, GLOBAL_LINE_EXCLUDED);
            }
            Motion::NextDefinition(prefixes) => {
                let prefixes: Vec<&str> = prefixes.iter().map(String::as_str).collect();
                cursor.next_definition(buffer, &prefixes);
            }
            Motion::PrevDefinition(prefixes) => {
                let prefixes: Vec<&str> = prefixes.iter().map(String::as_str).collect();
                cursor.prev_definition(buffer, &prefixes);
            }
            Motion::NextArgument => {
                cursor.next_argument(buffer);
            }
            Motion::PrevArgument => {
                cursor.prev_argument(buffer);
            }
        }
    }

    fn select_line(&mut self) {
        self.cursor.line_start(&self.buffer);
        self.selection.start(&self.cursor);
        if self.cursor.on_last_line(&self.buffer) {
            self.cursor.line_end(&self.buffer);
        } else {
            self.cursor.move_down(&self.buffer);
        }
    }

    fn select_word(&mut self) {
        if !self.cursor.at_word_start(&self.buffer) {
            self.cursor.word_backward(&self.buffer);
        }
        self.selection.start(&self.cursor);
        self.cursor.word_forward(&self.buffer);
    }

    fn insert_text(
        &mut self,
        text: &str,
        kind: EditKind,
        actions: &mut Vec<Action>,
    ) -> Result<(), EditorError> {
        if text.is_empty() {
            return Ok(());
        }
        let before = self.cursor.snapshot();
        self.cursor.insert(&mut self.buffer, text)?;
        let text = text.to_string();
        let edit = match kind {
            EditKind::Insert => Edit::Insert { text },
            EditKind::Paste => Edit::Paste { text },
            EditKind::Replace => Edit::Replace { text },
        };
        self.record(edit, before, actions);
        Ok(())
    }

    fn delete_selection(&mut self, actions: &mut Vec<Action>) -> Result<(), EditorError> {
        if !self.selection.is_active() {
            return Ok(());
        }
        let (start, end) = self.selection.byte_range();
        let (start, end) = (self.buffer.clamp(start), self.buffer.clamp(end));
        self.selection.clear();
        if start == end {
            return Ok(());
        }
        let before = self.cursor.snapshot();
        let text = self.cursor.delete_range(&mut self.buffer, start, end)?;
        self.record(Edit::DeleteSelection { text }, before, actions);
        Ok(())
    }

    fn copy(&mut self) {
        let copied = match self.selected_text() {
            Some(text) => Some(text),
            None if self.cursor.at_buffer_end(&self.buffer) => None,
            None if self.cursor.at_line_end(&self.buffer) => Some("\n".to_string()),
            None => self.cursor.char_after(&self.buffer).map(String::from),
        };
        if let Some(text) = copied {
            self.register = text;
        }
    }

    /// Lines affected by indent/outdent.
    ///
    /// A multi-line selection that starts at the end of its first line does not cover that line.
    fn affected_lines(&self) -> Range<usize> {
        if !self.selection.is_active() {
            let line = self.cursor.line();
            return line..line + 1;
        }
        let Range { mut start, end } = self.selection.line_range();
        let (min, _) = self.selection.min_max();
        if end - start > 1 && min.byte == self.buffer.line(min.line).len() {
            start += 1;
        }
        start..end.min(self.buffer.line_count())
    }

    fn indent(&mut self, actions: &mut Vec<Action>) -> Result<(), EditorError> {
        let before = self.cursor.snapshot();
        let unit = self.config.indent_unit();
        let mut changes = Vec::new();
        for line in self.affected_lines() {
            self.buffer.insert(TextPos::new(line, 0), &unit)?;
            self.shift_line(line, unit.len() as isize);
            changes.push(IndentChange {
                line,
                text: unit.clone(),
            });
        }
        self.record(Edit::Indent { changes }, before, actions);
        Ok(())
    }

    /// Remove one leading tab, or else up to `tab_width` leading spaces, from each line.
    fn outdent(&mut self, actions: &mut Vec<Action>) -> Result<(), EditorError> {
        let before = self.cursor.snapshot();
        let mut changes = Vec::new();
        for line in self.affected_lines() {
            let text = self.buffer.line(line);
            let removed = if text.starts_with('\t') {
                "\t".to_string()
            } else {
                let spaces = text
                    .bytes()
                    .take(self.config.tab_width)
                    .take_while(|&b| b == b' ')
                    .count();
                " ".repeat(spaces)
            };
            if removed.is_empty() {
                continue;
            }
            self.buffer.remove_exact(TextPos::new(line, 0), &removed)?;
            self.shift_line(line, -(removed.len() as isize));
            changes.push(IndentChange {
                line,
                text: removed,
            });
        }
        self.record(Edit::Outdent { changes }, before, actions);
        Ok(())
    }

    /// Keep the cursor and selection on the same text after `line` gained or lost leading bytes.
    fn shift_line(&mut self, line: usize, delta: isize) {
        if self.cursor.line() == line && !(delta < 0 && self.cursor.at_line_start()) {
            let byte = self.cursor.byte().saturating_add_signed(delta);
            self.cursor.set_byte(&self.buffer, byte);
        }
        self.selection
            .rebase_line(&self.buffer, line, delta, self.config.tab_width);
    }

    /// Two-step search: in the given direction first, then from the far end of the buffer.
    fn find(&mut self, needle: &str, forward: bool) -> SearchHit {
        let needle = Needle::Literal(needle);
        let (buffer, cursor) = (&self.buffer, &mut self.cursor);
        let found = if forward {
            cursor.find_next(buffer, needle)
        } else {
            cursor.find_prev(buffer, needle)
        };
        if found {
            return SearchHit::Found;
        }
        let wrapped = if forward {
            cursor.find_first(buffer, needle)
        } else {
            cursor.find_last(buffer, needle)
        };
        if wrapped {
            SearchHit::Wrapped
        } else {
            SearchHit::NotFound
        }
    }

    /// Find and select the occurrence: anchor after it, cursor (focus) at its start.
    fn find_select(&mut self, needle: &str, forward: bool) -> SearchHit {
        let hit = self.find(needle, forward);
        if hit != SearchHit::NotFound {
            let end = TextPos::new(self.cursor.line(), self.cursor.byte() + needle.len());
            let anchor = Cursor::at(&self.buffer, end, self.config.tab_width).snapshot();
            self.selection = Selection::between(anchor, self.cursor.snapshot());
        }
        hit
    }

    fn record(&mut self, edit: Edit, before: CursorSnapshot, actions: &mut Vec<Action>) {
        if edit.is_noop() {
            return;
        }
        let action = Action::new(edit, before, self.cursor.snapshot());
        self.invalidate_syntax(action.first_line());
        self.history.record(action.clone());
        actions.push(action);
    }

    fn invalidate_syntax(&mut self, line: usize) {
        if let Some(syntax) = self.syntax.as_mut() {
            syntax.invalidate_from(line);
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum EditKind {
    Insert,
    Paste,
    Replace,
}
