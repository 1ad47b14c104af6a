use caret_core::{RuleTable, StyleId};
use serde::Deserialize;

use crate::{RuleError, regex_rule, style_id_by_name};

#[derive(Debug, Clone, Deserialize)]
/// Raw YAML syntax definition.
///
/// ```yaml
/// name: Go
/// file_extensions: [go]
/// rules:
///   - name: comment
///     match: '//[^\n]*'
///     style: comment
/// ```
pub struct SyntaxDefinition {
    #[serde(default)]
    /// Optional human-readable name.
    pub name: Option<String>,

    #[serde(default)]
    /// File extensions associated with this syntax (without the leading dot).
    pub file_extensions: Vec<String>,

    /// Rules in priority order.
    pub rules: Vec<RuleDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
/// A single rule entry.
pub struct RuleDefinition {
    /// Rule name reported on matches.
    pub name: String,

    #[serde(rename = "match")]
    /// Regex, matched at the scan position only.
    pub pattern: String,

    /// Highlight class.
    pub style: StyleRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
/// A style given either as a raw id or as a built-in style name.
pub enum StyleRef {
    /// Raw style id.
    Id(StyleId),
    /// Built-in style name (see [`crate::style_id_by_name`]).
    Name(String),
}

impl StyleRef {
    fn resolve(&self) -> Result<StyleId, RuleError> {
        match self {
            StyleRef::Id(id) => Ok(*id),
            StyleRef::Name(name) => {
                style_id_by_name(name).ok_or_else(|| RuleError::UnknownStyle(name.clone()))
            }
        }
    }
}

impl SyntaxDefinition {
    /// Parse a definition from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, RuleError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Compile every rule. Fails on the first bad pattern or style.
    pub fn compile(&self) -> Result<RuleTable, RuleError> {
        let rules = self
            .rules
            .iter()
            .map(|rule| regex_rule(&rule.name, &rule.pattern, rule.style.resolve()?))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RuleTable::new(rules))
    }
}
