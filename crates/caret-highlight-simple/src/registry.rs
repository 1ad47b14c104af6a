use std::collections::HashMap;
use std::path::Path;

use caret_core::RuleTable;

use crate::{
    RuleError, SimpleGoStyles, SimpleJsonStyles, SyntaxDefinition, go_default, json_default,
};

/// Rule tables keyed by file extension.
#[derive(Debug, Clone, Default)]
pub struct SyntaxRegistry {
    tables: HashMap<String, RuleTable>,
}

fn normalize_extension(extension: &str) -> String {
    extension.trim_start_matches('.').to_ascii_lowercase()
}

impl SyntaxRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in grammars (`go`, `json`).
    pub fn with_builtin() -> Result<Self, RuleError> {
        let mut registry = Self::new();
        registry.register("go", go_default(SimpleGoStyles::default())?);
        registry.register("json", json_default(SimpleJsonStyles::default())?);
        Ok(registry)
    }

    /// Register (or replace) the table for `extension`.
    pub fn register(&mut self, extension: &str, table: RuleTable) {
        let extension = normalize_extension(extension);
        tracing::debug!(%extension, rules = table.len(), "registering syntax table");
        self.tables.insert(extension, table);
    }

    /// Compile a definition and register it for all of its extensions.
    ///
    /// Nothing is registered if any rule fails to compile.
    pub fn register_definition(&mut self, definition: &SyntaxDefinition) -> Result<(), RuleError> {
        let table = definition.compile()?;
        for extension in &definition.file_extensions {
            self.register(extension, table.clone());
        }
        Ok(())
    }

    /// Parse, compile and register a YAML definition.
    pub fn load_yaml(&mut self, text: &str) -> Result<(), RuleError> {
        let definition = SyntaxDefinition::from_yaml(text)?;
        self.register_definition(&definition)
    }

    pub fn for_extension(&self, extension: &str) -> Option<&RuleTable> {
        self.tables.get(&normalize_extension(extension))
    }

    pub fn for_path(&self, path: impl AsRef<Path>) -> Option<&RuleTable> {
        let extension = path.as_ref().extension()?.to_str()?;
        self.for_extension(extension)
    }

    /// Registered extensions, sorted.
    pub fn extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        extensions.sort_unstable();
        extensions
    }
}
