//! Error types for buffer mutation and history replay.

use thiserror::Error;

/// Errors produced by buffer mutation and undo/redo replay.
///
/// Boundary no-ops (moving past the buffer edges, deleting at the end, undo with nothing to undo)
/// are not errors. Everything here signals a position that does not exist or a history record
/// that no longer matches the buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("line {line} is out of bounds (line count {line_count})")]
    /// A line index past the last line.
    LineOutOfBounds {
        /// Requested line.
        line: usize,
        /// Number of lines in the buffer.
        line_count: usize,
    },

    #[error("byte offset {byte} is out of bounds on line {line} (length {len})")]
    /// A byte offset past the end of its line.
    ByteOutOfBounds {
        /// Line index.
        line: usize,
        /// Requested byte offset.
        byte: usize,
        /// Byte length of the line.
        len: usize,
    },

    #[error("byte offset {byte} on line {line} is not a char boundary")]
    /// A byte offset inside a multi-byte codepoint.
    NotCharBoundary {
        /// Line index.
        line: usize,
        /// Requested byte offset.
        byte: usize,
    },

    #[error("history replay mismatch at {line}:{byte}: expected {expected:?}, found {found:?}")]
    /// A recorded removal does not match the text present in the buffer.
    ///
    /// This is an internal consistency failure; the replay is aborted before mutating.
    HistoryMismatch {
        /// Line where the removal starts.
        line: usize,
        /// Byte offset where the removal starts.
        byte: usize,
        /// Text the history record expects to remove.
        expected: String,
        /// Text actually present (possibly truncated at the buffer end).
        found: String,
    },
}
