use caret_core::{Buffer, SyntaxMatcher};
use caret_highlight_simple::{
    RuleError, SIMPLE_STYLE_KEYWORD, StyleRef, SyntaxDefinition, SyntaxRegistry,
};
use pretty_assertions::assert_eq;

const SHELL: &str = r#"
name: Shell
file_extensions: [sh, .BASH]
rules:
  - name: comment
    match: '#[^\n]*'
    style: comment
  - name: keyword
    match: '(?:if|then|fi)\b'
    style: keyword
  - name: variable
    match: '\$[A-Za-z_]+'
    style: 42
"#;

#[test]
fn test_builtin_registry() {
    let registry = SyntaxRegistry::with_builtin().unwrap();
    assert_eq!(registry.extensions(), vec!["go", "json"]);
    assert!(registry.for_path("cmd/main.go").is_some());
    assert!(registry.for_extension(".JSON").is_some());
    assert!(registry.for_path("Makefile").is_none());
}

#[test]
fn test_yaml_definition_registers_all_extensions() {
    let mut registry = SyntaxRegistry::new();
    registry.load_yaml(SHELL).unwrap();
    assert_eq!(registry.extensions(), vec!["bash", "sh"]);

    let table = registry.for_path("build.sh").unwrap().clone();
    let names: Vec<&str> = table.rules().iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["comment", "keyword", "variable"]);

    let buffer = Buffer::from_text("if $HOME then # done\nfi");
    let mut matcher = SyntaxMatcher::new(table);
    matcher.ensure_scanned(&buffer, 1, usize::MAX);
    let styles: Vec<(&str, u32)> = matcher
        .matches()
        .iter()
        .map(|m| (&*m.rule, m.style_id))
        .collect();
    assert_eq!(
        styles,
        vec![
            ("keyword", SIMPLE_STYLE_KEYWORD),
            ("variable", 42),
            ("keyword", SIMPLE_STYLE_KEYWORD),
            ("comment", caret_highlight_simple::SIMPLE_STYLE_COMMENT),
            ("keyword", SIMPLE_STYLE_KEYWORD),
        ]
    );
}

#[test]
fn test_style_ref_forms() {
    let definition = SyntaxDefinition::from_yaml(SHELL).unwrap();
    assert_eq!(definition.rules[0].style, StyleRef::Name("comment".into()));
    assert_eq!(definition.rules[2].style, StyleRef::Id(42));
}

#[test]
fn test_bad_rules_fail_registration() {
    let mut registry = SyntaxRegistry::new();
    let bad_regex = "file_extensions: [x]\nrules:\n  - name: broken\n    match: '[a-'\n    style: string\n";
    assert!(matches!(
        registry.load_yaml(bad_regex),
        Err(RuleError::RegexCompile { .. })
    ));

    let bad_style = "file_extensions: [x]\nrules:\n  - name: odd\n    match: 'a'\n    style: sparkle\n";
    assert!(matches!(
        registry.load_yaml(bad_style),
        Err(RuleError::UnknownStyle(name)) if name == "sparkle"
    ));

    assert!(matches!(registry.load_yaml("rules: ["), Err(RuleError::Yaml(_))));
    assert!(registry.for_extension("x").is_none());
}
