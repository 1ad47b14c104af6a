//! Linear undo/redo history.
//!
//! The history is a log of [`Action`]s plus a `head` index. Actions before `head` are applied,
//! actions at or after it have been undone. Recording a new action while `head` is behind the end
//! discards the undone tail (no redo tree).
//!
//! The log is unbounded.

use crate::action::Action;
use crate::buffer::Buffer;
use crate::cursor::Cursor;
use crate::error::EditorError;

/// Action log with a movable head.
#[derive(Debug)]
pub struct History {
    actions: Vec<Action>,
    head: usize,
    /// Head position that matches the saved document, if still reachable.
    clean_index: Option<usize>,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
            head: 0,
            clean_index: Some(0),
        }
    }

    /// Number of recorded actions (applied and undone).
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Boundary between applied and undone actions.
    pub fn head(&self) -> usize {
        self.head
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn can_undo(&self) -> bool {
        self.head > 0
    }

    pub fn can_redo(&self) -> bool {
        self.head < self.actions.len()
    }

    pub fn undo_depth(&self) -> usize {
        self.head
    }

    pub fn redo_depth(&self) -> usize {
        self.actions.len() - self.head
    }

    /// Whether the buffer matches the last [`History::mark_clean`] point.
    pub fn is_clean(&self) -> bool {
        self.clean_index == Some(self.head)
    }

    /// Mark the current head as the saved state.
    pub fn mark_clean(&mut self) {
        self.clean_index = Some(self.head);
    }

    /// Append an action, discarding everything that was undone.
    pub fn record(&mut self, action: Action) {
        if self.head < self.actions.len() {
            tracing::debug!(
                discarded = self.actions.len() - self.head,
                "dropping redo branch"
            );
            // A clean point inside the discarded branch can never be reached again.
            if let Some(clean_index) = self.clean_index
                && clean_index > self.head
            {
                self.clean_index = None;
            }
            self.actions.truncate(self.head);
        }
        tracing::trace!(kind = %action.kind(), head = self.head, "recording action");
        self.actions.push(action);
        self.head = self.actions.len();
    }

    /// Revert the action right before the head.
    ///
    /// Returns `Ok(None)` when there is nothing to undo. On a replay mismatch the buffer, cursor
    /// and head are left as they were.
    pub fn undo(
        &mut self,
        buffer: &mut Buffer,
        cursor: &mut Cursor,
    ) -> Result<Option<&Action>, EditorError> {
        if self.head == 0 {
            return Ok(None);
        }
        let index = self.head - 1;
        let action = &self.actions[index];
        let origin = cursor.snapshot();
        cursor.restore(&action.after());
        if let Err(err) = action.apply_inverse(buffer) {
            tracing::error!(kind = %action.kind(), index, %err, "undo replay failed");
            cursor.restore(&origin);
            return Err(err);
        }
        cursor.restore(&action.before());
        self.head = index;
        tracing::debug!(kind = %action.kind(), head = self.head, "undo");
        Ok(Some(action))
    }

    /// Re-apply the action at the head.
    ///
    /// Returns `Ok(None)` when there is nothing to redo.
    pub fn redo(
        &mut self,
        buffer: &mut Buffer,
        cursor: &mut Cursor,
    ) -> Result<Option<&Action>, EditorError> {
        let index = self.head;
        let Some(action) = self.actions.get(index) else {
            return Ok(None);
        };
        let origin = cursor.snapshot();
        cursor.restore(&action.before());
        if let Err(err) = action.apply_forward(buffer) {
            tracing::error!(kind = %action.kind(), index, %err, "redo replay failed");
            cursor.restore(&origin);
            return Err(err);
        }
        cursor.restore(&action.after());
        self.head = index + 1;
        tracing::debug!(kind = %action.kind(), head = self.head, "redo");
        Ok(Some(action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Edit;
    use crate::buffer::TextPos;

    fn type_text(buffer: &mut Buffer, cursor: &mut Cursor, history: &mut History, text: &str) {
        let before = cursor.snapshot();
        cursor.insert(buffer, text).unwrap();
        history.record(Action::new(
            Edit::Insert { text: text.into() },
            before,
            cursor.snapshot(),
        ));
    }

    #[test]
    fn test_undo_redo_at_boundaries_are_noops() {
        let mut buffer = Buffer::new();
        let mut cursor = Cursor::new(4);
        let mut history = History::new();
        assert!(history.undo(&mut buffer, &mut cursor).unwrap().is_none());
        assert!(history.redo(&mut buffer, &mut cursor).unwrap().is_none());
    }

    #[test]
    fn test_new_edit_truncates_redo_branch() {
        let mut buffer = Buffer::new();
        let mut cursor = Cursor::new(4);
        let mut history = History::new();
        type_text(&mut buffer, &mut cursor, &mut history, "a");
        type_text(&mut buffer, &mut cursor, &mut history, "b");
        history.undo(&mut buffer, &mut cursor).unwrap();
        assert_eq!(history.redo_depth(), 1);

        type_text(&mut buffer, &mut cursor, &mut history, "c");
        assert_eq!(buffer.to_text(), "ac");
        assert_eq!(history.len(), 2);
        assert!(!history.can_redo());
        assert!(history.redo(&mut buffer, &mut cursor).unwrap().is_none());
    }

    #[test]
    fn test_default_history_starts_clean() {
        let history = History::default();
        assert!(history.is_clean());
        assert_eq!(history.head(), 0);
    }

    #[test]
    fn test_clean_point_tracking() {
        let mut buffer = Buffer::new();
        let mut cursor = Cursor::new(4);
        let mut history = History::new();
        assert!(history.is_clean());
        type_text(&mut buffer, &mut cursor, &mut history, "a");
        assert!(!history.is_clean());
        history.mark_clean();
        type_text(&mut buffer, &mut cursor, &mut history, "b");
        history.undo(&mut buffer, &mut cursor).unwrap();
        assert!(history.is_clean());
        history.undo(&mut buffer, &mut cursor).unwrap();
        type_text(&mut buffer, &mut cursor, &mut history, "z");
        // The clean point was in the discarded branch.
        assert!(!history.is_clean());
    }

    #[test]
    fn test_replay_mismatch_is_reported_and_aborts() {
        let mut buffer = Buffer::new();
        let mut cursor = Cursor::new(4);
        let mut history = History::new();
        type_text(&mut buffer, &mut cursor, &mut history, "abc");

        // Corrupt the buffer behind the history's back.
        buffer.remove(TextPos::new(0, 1), TextPos::new(0, 2)).unwrap();
        let err = history.undo(&mut buffer, &mut cursor).unwrap_err();
        assert!(matches!(err, EditorError::HistoryMismatch { .. }));
        assert_eq!(buffer.to_text(), "ac");
        assert_eq!(history.head(), 1);
        assert_eq!(cursor.pos(), TextPos::new(0, 3));
    }
}
