//! Caret Core - Headless Terminal Editor Kernel
//!
//! # Overview
//!
//! `caret-core` is the editing kernel of a terminal text editor. It tracks a cursor in three
//! coordinate spaces at once (line, byte offset, display column), records every edit in an
//! action log that can be undone and redone exactly, and tags regions of text with highlight
//! classes using an ordered list of prefix rules.
//!
//! Rendering, key bindings, file I/O and configuration loading live outside this crate.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  EditorSession (Request -> Outcome)         │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  History (Action log, undo/redo)            │  ← Edit Replay
//! ├──────────────────────┬──────────────────────┤
//! │  Cursor + Selection  │  SyntaxMatcher       │  ← Position / Highlighting
//! ├──────────────────────┴──────────────────────┤
//! │  Offset Translator (byte/char/column)       │  ← Text Metrics
//! ├─────────────────────────────────────────────┤
//! │  Buffer (lines)                             │  ← Text Storage
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use caret_core::{EditorSession, Motion, Request};
//!
//! let mut session = EditorSession::open("fn main() {\n\tlet x;\n}", None);
//!
//! session.execute(Request::Move(Motion::Down)).unwrap();
//! session.execute(Request::Move(Motion::LineEnd)).unwrap();
//! // The tab counts as 4 display columns.
//! assert_eq!(session.cursor().visual(), 10);
//!
//! session.execute(Request::Backspace).unwrap();
//! session.execute(Request::Undo).unwrap();
//! assert_eq!(session.text(), "fn main() {\n\tlet x;\n}");
//! ```
//!
//! # Module Description
//!
//! - [`offsets`] - byte / char / display-column conversions within one line
//! - [`buffer`] - line storage and [`TextPos`]
//! - [`cursor`] - cursor state machine: motion, boundary predicates, search, edits
//! - [`selection`] - anchor/focus selection
//! - [`action`] / [`history`] - reversible edit records and the undo/redo log
//! - [`syntax`] - incremental prefix-rule matcher
//! - [`session`] - request dispatch over one document

pub mod action;
pub mod buffer;
pub mod config;
pub mod cursor;
pub mod error;
pub mod history;
pub mod line_ending;
pub mod offsets;
pub mod selection;
pub mod session;
pub mod syntax;

pub use action::{Action, ActionKind, Edit, IndentChange};
pub use buffer::{Buffer, TextPos};
pub use config::{EditorConfig, LastPosition};
pub use cursor::{Cursor, CursorSnapshot, Needle, Point};
pub use error::EditorError;
pub use history::History;
pub use line_ending::LineEnding;
pub use selection::Selection;
pub use session::{EditorSession, Motion, Outcome, Request, SearchHit};
pub use syntax::{FnPattern, Match, PrefixPattern, Rule, RuleTable, StyleId, SyntaxMatcher};
