//! Selection: an anchor/focus pair of cursor snapshots.
//!
//! Anchor and focus are not required to be in document order; every query works on the
//! ordered `(min, max)` pair, compared by `(line, visual)`.

use std::ops::Range;

use crate::buffer::{Buffer, TextPos};
use crate::cursor::{Cursor, CursorSnapshot, Point};
use crate::offsets::visual_from_byte;

/// Selection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    active: bool,
    anchor: CursorSnapshot,
    focus: CursorSnapshot,
}

fn snapshot_min_max(a: CursorSnapshot, b: CursorSnapshot) -> (CursorSnapshot, CursorSnapshot) {
    if a.point() <= b.point() { (a, b) } else { (b, a) }
}

impl Selection {
    /// An inactive selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// A selection between two snapshots.
    pub fn between(anchor: CursorSnapshot, focus: CursorSnapshot) -> Self {
        Self {
            active: true,
            anchor,
            focus,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Turn the selection on, anchoring it at `cursor`. No-op if already on.
    pub fn start(&mut self, cursor: &Cursor) {
        if self.active {
            return;
        }
        self.active = true;
        self.set_anchor(cursor);
        self.set_focus(cursor);
    }

    /// Turn the selection off.
    pub fn clear(&mut self) {
        self.active = false;
    }

    pub fn set_anchor(&mut self, cursor: &Cursor) {
        self.anchor = cursor.snapshot();
    }

    pub fn set_focus(&mut self, cursor: &Cursor) {
        self.focus = cursor.snapshot();
    }

    pub fn anchor(&self) -> CursorSnapshot {
        self.anchor
    }

    pub fn focus(&self) -> CursorSnapshot {
        self.focus
    }

    /// Anchor and focus in document order.
    pub fn min_max(&self) -> (CursorSnapshot, CursorSnapshot) {
        snapshot_min_max(self.anchor, self.focus)
    }

    /// Buffer range covered by the selection, in document order.
    pub fn byte_range(&self) -> (TextPos, TextPos) {
        let (min, max) = self.min_max();
        (min.pos(), max.pos())
    }

    /// Whether the selection is off or covers nothing.
    pub fn is_empty(&self) -> bool {
        !self.active || self.anchor.pos() == self.focus.pos()
    }

    /// Whether `point` lies inside the selection.
    ///
    /// Inclusive of the start column, exclusive of the end column. An inactive selection contains
    /// nothing.
    pub fn contains(&self, point: Point) -> bool {
        if !self.active {
            return false;
        }
        let (min, max) = self.min_max();
        let (min, max) = (min.point(), max.point());
        if point.line < min.line || point.line > max.line {
            return false;
        }
        if point.line == min.line && point.column < min.column {
            return false;
        }
        if point.line == max.line && point.column >= max.column {
            return false;
        }
        true
    }

    /// Lines covered by the selection.
    ///
    /// A multi-line selection ending at column 0 does not cover its last line. An inactive
    /// selection covers nothing.
    pub fn line_range(&self) -> Range<usize> {
        if !self.active {
            return 0..0;
        }
        let (min, max) = self.min_max();
        let end = if max.visual == 0 && max.line > min.line {
            max.line
        } else {
            max.line + 1
        };
        min.line..end
    }

    /// Re-derive both snapshots against `buffer` after an edit, clamping positions that no
    /// longer exist.
    pub(crate) fn clamp_to(&mut self, buffer: &Buffer, tab_width: usize) {
        for snapshot in [&mut self.anchor, &mut self.focus] {
            let fresh = Cursor::at(buffer, snapshot.pos(), tab_width).snapshot();
            if fresh.pos() != snapshot.pos() || fresh.visual != snapshot.visual {
                *snapshot = fresh;
            }
        }
    }

    /// Shift both snapshots that sit on `line` by `delta` bytes after its indentation changed.
    pub(crate) fn rebase_line(&mut self, buffer: &Buffer, line: usize, delta: isize, tab_width: usize) {
        for snapshot in [&mut self.anchor, &mut self.focus] {
            if snapshot.line != line {
                continue;
            }
            if delta < 0 && snapshot.byte == 0 {
                continue;
            }
            let text = buffer.line(line);
            let byte = snapshot.byte.saturating_add_signed(delta).min(text.len());
            snapshot.byte = byte;
            snapshot.visual = visual_from_byte(text, byte, tab_width);
            snapshot.sticky_column = snapshot.visual;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(line: usize, column: usize) -> CursorSnapshot {
        CursorSnapshot {
            line,
            byte: column,
            visual: column,
            sticky_column: column,
        }
    }

    #[test]
    fn test_empty_selection_contains_nothing() {
        let selection = Selection::between(snap(0, 0), snap(0, 0));
        assert!(!selection.contains(Point::new(0, 0)));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_contains_is_half_open() {
        let selection = Selection::between(snap(0, 0), snap(0, 3));
        for column in 0..3 {
            assert!(selection.contains(Point::new(0, column)));
        }
        assert!(!selection.contains(Point::new(0, 3)));
        assert!(!selection.contains(Point::new(1, 0)));
    }

    #[test]
    fn test_backward_selection_is_ordered() {
        let selection = Selection::between(snap(2, 1), snap(0, 4));
        assert!(!selection.contains(Point::new(0, 3)));
        assert!(selection.contains(Point::new(0, 4)));
        assert!(selection.contains(Point::new(1, 100)));
        assert!(selection.contains(Point::new(2, 0)));
        assert!(!selection.contains(Point::new(2, 1)));
        assert_eq!(selection.min_max().0, snap(0, 4));
    }

    #[test]
    fn test_line_range_drops_trailing_column_zero_line() {
        assert_eq!(Selection::between(snap(1, 2), snap(3, 0)).line_range(), 1..3);
        assert_eq!(Selection::between(snap(3, 0), snap(1, 2)).line_range(), 1..3);
        assert_eq!(Selection::between(snap(1, 2), snap(3, 1)).line_range(), 1..4);
        assert_eq!(Selection::between(snap(2, 0), snap(2, 0)).line_range(), 2..3);
        assert_eq!(Selection::new().line_range(), 0..0);
    }

    #[test]
    fn test_inactive_selection_contains_nothing() {
        let mut selection = Selection::between(snap(0, 0), snap(0, 3));
        selection.clear();
        assert!(!selection.contains(Point::new(0, 1)));
    }

    #[test]
    fn test_inactive_selection_is_empty() {
        let mut selection = Selection::between(snap(0, 0), snap(0, 3));
        assert!(!selection.is_empty());
        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_clamp_to_pulls_snapshots_into_shrunk_buffer() {
        let buffer = Buffer::from_text("\tab");
        let mut selection = Selection::between(snap(2, 1), snap(0, 1));
        selection.clamp_to(&buffer, 4);
        assert_eq!(selection.anchor().pos(), TextPos::new(0, 1));
        assert_eq!(selection.anchor().visual, 4);
        assert_eq!(selection.focus().pos(), TextPos::new(0, 1));
        assert_eq!(selection.focus().visual, 4);
        assert_eq!(selection.line_range(), 0..1);
    }
}
