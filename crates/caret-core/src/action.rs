//! Reversible edit records.
//!
//! An [`Action`] stores one edit together with the cursor before and after it. The [`Edit`]
//! payload holds exactly what is needed to replay or invert the edit:
//!
//! - insertions (`Insert`, `Paste`, `Replace`) start at the *before* cursor
//! - removals (`Delete`, `Backspace`, `DeleteSelection`) start at the *after* cursor
//! - indentation changes carry the exact whitespace added or removed per line

use std::fmt;

use crate::buffer::{Buffer, TextPos};
use crate::cursor::CursorSnapshot;
use crate::error::EditorError;

/// Whitespace added to (or removed from) the start of one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentChange {
    /// Line index.
    pub line: usize,
    /// Exact leading text inserted or removed.
    pub text: String,
}

/// Payload of a recorded edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Typed text (may contain line breaks).
    Insert {
        /// Inserted text.
        text: String,
    },
    /// Text pasted from the register.
    Paste {
        /// Inserted text.
        text: String,
    },
    /// Replacement text inserted in place of a selection.
    Replace {
        /// Inserted text.
        text: String,
    },
    /// Forward delete.
    Delete {
        /// Removed text.
        text: String,
    },
    /// Backward delete.
    Backspace {
        /// Removed text.
        text: String,
    },
    /// Removal of a selected span.
    DeleteSelection {
        /// Removed text.
        text: String,
    },
    /// Leading whitespace inserted on each listed line.
    Indent {
        /// Per-line insertions.
        changes: Vec<IndentChange>,
    },
    /// Leading whitespace removed from each listed line.
    Outdent {
        /// Per-line removals.
        changes: Vec<IndentChange>,
    },
}

/// Stable tag naming the kind of an [`Edit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Insert,
    Paste,
    Replace,
    Delete,
    Backspace,
    DeleteSelection,
    Indent,
    Outdent,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Insert => "insert",
            ActionKind::Paste => "paste",
            ActionKind::Replace => "replace",
            ActionKind::Delete => "delete",
            ActionKind::Backspace => "backspace",
            ActionKind::DeleteSelection => "deleteSelection",
            ActionKind::Indent => "indent",
            ActionKind::Outdent => "outdent",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Edit {
    pub fn kind(&self) -> ActionKind {
        match self {
            Edit::Insert { .. } => ActionKind::Insert,
            Edit::Paste { .. } => ActionKind::Paste,
            Edit::Replace { .. } => ActionKind::Replace,
            Edit::Delete { .. } => ActionKind::Delete,
            Edit::Backspace { .. } => ActionKind::Backspace,
            Edit::DeleteSelection { .. } => ActionKind::DeleteSelection,
            Edit::Indent { .. } => ActionKind::Indent,
            Edit::Outdent { .. } => ActionKind::Outdent,
        }
    }

    /// Whether applying this edit would change nothing.
    pub fn is_noop(&self) -> bool {
        match self {
            Edit::Insert { text }
            | Edit::Paste { text }
            | Edit::Replace { text }
            | Edit::Delete { text }
            | Edit::Backspace { text }
            | Edit::DeleteSelection { text } => text.is_empty(),
            Edit::Indent { changes } | Edit::Outdent { changes } => {
                changes.iter().all(|c| c.text.is_empty())
            }
        }
    }
}

/// One recorded, invertible edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    edit: Edit,
    before: CursorSnapshot,
    after: CursorSnapshot,
}

impl Action {
    pub fn new(edit: Edit, before: CursorSnapshot, after: CursorSnapshot) -> Self {
        Self {
            edit,
            before,
            after,
        }
    }

    pub fn edit(&self) -> &Edit {
        &self.edit
    }

    pub fn kind(&self) -> ActionKind {
        self.edit.kind()
    }

    /// Cursor right before the edit.
    pub fn before(&self) -> CursorSnapshot {
        self.before
    }

    /// Cursor right after the edit.
    pub fn after(&self) -> CursorSnapshot {
        self.after
    }

    /// First buffer line touched by the edit, in either direction.
    pub fn first_line(&self) -> usize {
        let cursor_line = self.before.line.min(self.after.line);
        match &self.edit {
            Edit::Indent { changes } | Edit::Outdent { changes } => changes
                .iter()
                .map(|c| c.line)
                .min()
                .map_or(cursor_line, |l| l.min(cursor_line)),
            _ => cursor_line,
        }
    }

    /// Re-apply the edit to a buffer in the *before* state.
    pub(crate) fn apply_forward(&self, buffer: &mut Buffer) -> Result<(), EditorError> {
        match &self.edit {
            Edit::Insert { text } | Edit::Paste { text } | Edit::Replace { text } => {
                buffer.insert(self.before.pos(), text).map(|_| ())
            }
            Edit::Delete { text } | Edit::Backspace { text } | Edit::DeleteSelection { text } => {
                buffer.remove_exact(self.after.pos(), text)
            }
            Edit::Indent { changes } => insert_indents(buffer, changes),
            Edit::Outdent { changes } => remove_indents(buffer, changes),
        }
    }

    /// Revert the edit on a buffer in the *after* state.
    pub(crate) fn apply_inverse(&self, buffer: &mut Buffer) -> Result<(), EditorError> {
        match &self.edit {
            Edit::Insert { text } | Edit::Paste { text } | Edit::Replace { text } => {
                buffer.remove_exact(self.before.pos(), text)
            }
            Edit::Delete { text } | Edit::Backspace { text } | Edit::DeleteSelection { text } => {
                buffer.insert(self.after.pos(), text).map(|_| ())
            }
            Edit::Indent { changes } => remove_indents(buffer, changes),
            Edit::Outdent { changes } => insert_indents(buffer, changes),
        }
    }
}

fn insert_indents(buffer: &mut Buffer, changes: &[IndentChange]) -> Result<(), EditorError> {
    for change in changes {
        buffer.check(TextPos::new(change.line, 0))?;
    }
    for change in changes {
        buffer.insert(TextPos::new(change.line, 0), &change.text)?;
    }
    Ok(())
}

/// Verify every line before touching any, so a mismatch leaves the buffer unchanged.
fn remove_indents(buffer: &mut Buffer, changes: &[IndentChange]) -> Result<(), EditorError> {
    for change in changes {
        let line = buffer
            .get_line(change.line)
            .ok_or(EditorError::LineOutOfBounds {
                line: change.line,
                line_count: buffer.line_count(),
            })?;
        if !line.starts_with(change.text.as_str()) {
            let found: String = line.chars().take(change.text.chars().count()).collect();
            return Err(EditorError::HistoryMismatch {
                line: change.line,
                byte: 0,
                expected: change.text.clone(),
                found,
            });
        }
    }
    for change in changes {
        buffer.remove_exact(TextPos::new(change.line, 0), &change.text)?;
    }
    Ok(())
}
