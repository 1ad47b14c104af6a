//! `caret-highlight-simple` - Regex-based prefix rules for `caret-core`'s syntax matcher.
//!
//! [`RegexPattern`] plugs the `regex` crate into [`caret_core::PrefixPattern`]. Every pattern is
//! compiled anchored at the scan position (`\A(?:...)`), so a rule only ever matches a prefix of
//! the remaining text.
//!
//! Rule tables come from the built-in grammars ([`go_default`], [`json_default`]), from YAML
//! [`SyntaxDefinition`]s, or are assembled by hand; a [`SyntaxRegistry`] maps file extensions to
//! compiled tables.

mod definition;
mod error;
mod registry;

pub use definition::{RuleDefinition, StyleRef, SyntaxDefinition};
pub use error::RuleError;
pub use registry::SyntaxRegistry;

use caret_core::{PrefixPattern, Rule, RuleTable, StyleId};
use regex::Regex;

/// A regex compiled to match only at the start of the haystack.
#[derive(Debug, Clone)]
pub struct RegexPattern {
    source: String,
    regex: Regex,
}

impl RegexPattern {
    pub fn new(pattern: &str) -> Result<Self, RuleError> {
        let regex =
            Regex::new(&format!(r"\A(?:{pattern})")).map_err(|err| RuleError::RegexCompile {
                pattern: pattern.to_string(),
                message: err.to_string(),
            })?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as written, without the anchor.
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl PrefixPattern for RegexPattern {
    fn match_prefix(&self, haystack: &str) -> Option<usize> {
        self.regex.find(haystack).map(|m| m.end())
    }
}

/// Compile a named regex rule.
pub fn regex_rule(name: &str, pattern: &str, style_id: StyleId) -> Result<Rule, RuleError> {
    Ok(Rule::new(name, RegexPattern::new(pattern)?, style_id))
}

#[derive(Debug, Clone, Copy)]
pub struct SimpleGoStyles {
    pub string: StyleId,
    pub rune: StyleId,
    pub comment: StyleId,
    pub trailing_whitespace: StyleId,
}

impl Default for SimpleGoStyles {
    fn default() -> Self {
        Self {
            string: SIMPLE_STYLE_STRING,
            rune: SIMPLE_STYLE_RUNE,
            comment: SIMPLE_STYLE_COMMENT,
            trailing_whitespace: SIMPLE_STYLE_TRAILING_WHITESPACE,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SimpleJsonStyles {
    pub string: StyleId,
    pub number: StyleId,
    pub boolean: StyleId,
    pub null: StyleId,
}

impl Default for SimpleJsonStyles {
    fn default() -> Self {
        Self {
            string: SIMPLE_STYLE_STRING,
            number: SIMPLE_STYLE_NUMBER,
            boolean: SIMPLE_STYLE_BOOLEAN,
            null: SIMPLE_STYLE_NULL,
        }
    }
}

/// Go: strings, runes, line and block comments, trailing whitespace.
///
/// Comments come after strings so that `"//"` stays a string.
pub fn go_default(styles: SimpleGoStyles) -> Result<RuleTable, RuleError> {
    Ok(RuleTable::new(vec![
        regex_rule("string", r#""(?:\\.|[^"\\\n])*""#, styles.string)?,
        regex_rule("raw string", r"`[^`]*`", styles.string)?,
        regex_rule("rune", r"'(?:\\.|[^'\\\n])*'", styles.rune)?,
        regex_rule("comment", r"//[^\n]*", styles.comment)?,
        regex_rule("multi line comment", r"(?s)/\*.*?\*/", styles.comment)?,
        regex_rule("trailing spaces", r"(?m)[ \t]+$", styles.trailing_whitespace)?,
    ]))
}

/// A small JSON grammar (strings, numbers, booleans, null).
pub fn json_default(styles: SimpleJsonStyles) -> Result<RuleTable, RuleError> {
    Ok(RuleTable::new(vec![
        regex_rule("string", r#""(?:\\.|[^"\\])*""#, styles.string)?,
        regex_rule(
            "number",
            r"-?(?:0|[1-9]\d*)(?:\.\d+)?(?:[eE][+-]?\d+)?",
            styles.number,
        )?,
        regex_rule("boolean", r"(?:true|false)\b", styles.boolean)?,
        regex_rule("null", r"null\b", styles.null)?,
    ]))
}

/// Default `StyleId` constants for the built-in grammars.
///
/// These are only identifiers. UI/theme layer is expected to map them to actual colors.
pub const SIMPLE_STYLE_STRING: StyleId = 0x0200_0001;
pub const SIMPLE_STYLE_NUMBER: StyleId = 0x0200_0002;
pub const SIMPLE_STYLE_BOOLEAN: StyleId = 0x0200_0003;
pub const SIMPLE_STYLE_NULL: StyleId = 0x0200_0004;
pub const SIMPLE_STYLE_RUNE: StyleId = 0x0200_0005;
pub const SIMPLE_STYLE_KEYWORD: StyleId = 0x0200_0006;
pub const SIMPLE_STYLE_COMMENT: StyleId = 0x0200_0012;
pub const SIMPLE_STYLE_TRAILING_WHITESPACE: StyleId = 0x0200_0020;

/// Look up a built-in style id by the name used in YAML definitions.
pub fn style_id_by_name(name: &str) -> Option<StyleId> {
    Some(match name {
        "string" => SIMPLE_STYLE_STRING,
        "number" => SIMPLE_STYLE_NUMBER,
        "boolean" => SIMPLE_STYLE_BOOLEAN,
        "null" => SIMPLE_STYLE_NULL,
        "rune" | "char" => SIMPLE_STYLE_RUNE,
        "keyword" => SIMPLE_STYLE_KEYWORD,
        "comment" => SIMPLE_STYLE_COMMENT,
        "trailing_whitespace" => SIMPLE_STYLE_TRAILING_WHITESPACE,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_only_matches_at_start() {
        let pattern = RegexPattern::new("ab+").unwrap();
        assert_eq!(pattern.match_prefix("abbbc"), Some(4));
        assert_eq!(pattern.match_prefix("xabb"), None);
        assert_eq!(pattern.source(), "ab+");
    }

    #[test]
    fn test_alternation_is_anchored_as_a_whole() {
        let pattern = RegexPattern::new("x|y").unwrap();
        assert_eq!(pattern.match_prefix("ay"), None);
        assert_eq!(pattern.match_prefix("y"), Some(1));
    }

    #[test]
    fn test_invalid_pattern_is_rejected_at_compile_time() {
        let err = RegexPattern::new("(unclosed").unwrap_err();
        assert!(matches!(err, RuleError::RegexCompile { ref pattern, .. } if pattern == "(unclosed"));
    }

    #[test]
    fn test_style_names() {
        assert_eq!(style_id_by_name("comment"), Some(SIMPLE_STYLE_COMMENT));
        assert_eq!(style_id_by_name("sparkle"), None);
    }
}
