//! Editor settings consumed by the core.
//!
//! Loading these from disk is the caller's job; the types derive serde traits so any format
//! works. Missing fields fall back to [`EditorConfig::default`].

use serde::{Deserialize, Serialize};

use crate::offsets::DEFAULT_TAB_WIDTH;

/// Default number of lines moved by page up/down.
pub const DEFAULT_PAGE_SIZE: usize = 16;

/// Default number of bytes the syntax matcher may scan per render pass.
pub const DEFAULT_SCAN_BUDGET_BYTES: usize = 64 * 1024;

/// Core editor settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Display width of `'\t'`, and the number of spaces used for indentation when
    /// `expand_tabs` is set (also the maximum number of spaces removed by one outdent).
    pub tab_width: usize,
    /// Indent with spaces instead of a literal tab.
    pub expand_tabs: bool,
    /// Lines moved by one page up/down.
    pub page_size: usize,
    /// Upper bound of bytes scanned by the syntax matcher in a single pass.
    pub scan_budget_bytes: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            expand_tabs: false,
            page_size: DEFAULT_PAGE_SIZE,
            scan_budget_bytes: DEFAULT_SCAN_BUDGET_BYTES,
        }
    }
}

impl EditorConfig {
    /// Text inserted by one indent step.
    pub fn indent_unit(&self) -> String {
        if self.expand_tabs {
            " ".repeat(self.tab_width.max(1))
        } else {
            "\t".to_string()
        }
    }
}

/// Last known cursor location of a file, stored by the persistence layer between sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LastPosition {
    /// Zero-based line index.
    pub line: usize,
    /// Byte offset within the line.
    pub byte: usize,
}
