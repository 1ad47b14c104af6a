//! Line terminators.
//!
//! A [`Buffer`](crate::Buffer) holds bare lines. The terminator style found on load is remembered
//! here and used again when the lines are joined for saving.

use serde::{Deserialize, Serialize};

/// Terminator placed between buffer lines when they are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
}

impl LineEnding {
    /// The style used by most line breaks in `text`. Ties and texts without breaks pick LF.
    pub fn detect(text: &str) -> Self {
        let breaks = text.matches('\n').count();
        let crlf = text.matches("\r\n").count();
        if crlf * 2 > breaks { Self::Crlf } else { Self::Lf }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
        }
    }

    /// Join bare lines with this terminator.
    pub fn join<S: AsRef<str>>(self, lines: &[S]) -> String {
        let mut out = String::new();
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                out.push_str(self.as_str());
            }
            out.push_str(line.as_ref());
        }
        out
    }
}

/// Split `text` on `'\n'`, dropping one `'\r'` before each break.
///
/// `N` breaks give `N + 1` lines; a trailing break leaves an empty last line.
pub(crate) fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_owned())
        .collect()
}
