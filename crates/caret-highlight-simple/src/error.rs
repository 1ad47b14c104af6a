use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while compiling syntax rules.
///
/// All of these surface at registration time; a compiled rule table never fails while scanning.
pub enum RuleError {
    #[error("YAML parse error: {0}")]
    /// A syntax definition was not valid YAML.
    Yaml(#[from] serde_yaml::Error),

    #[error("regex compile error for pattern '{pattern}': {message}")]
    /// A regex pattern failed to compile.
    RegexCompile {
        /// The regex pattern string.
        pattern: String,
        /// The compiler error message.
        message: String,
    },

    #[error("unknown style '{0}'")]
    /// A rule referenced a style name with no built-in id.
    UnknownStyle(String),
}
