//! Annotation declarations and typed annotation records.
//!
//! Raw directive argument bags are converted here, once, into
//! [`TableDirective`] and [`ColumnDirective`]. Everything downstream works on
//! those records and never sees untyped values.

use indexmap::IndexMap;
use serde::Serialize;

use super::definition::{Column, Table};
use super::error::BuildError;
use crate::sdl::Value;

/// Name of the extraction directive in the default registry.
pub const DEFAULT_DIRECTIVE: &str = "sql";

/// Name of the suppression directive in the default registry.
pub const DEFAULT_SUPPRESS_DIRECTIVE: &str = "sqlSkip";

/// Declarations for the default registry, ready to prepend to a schema.
pub const SQL_DIRECTIVE_DECLARATION: &str = "\
directive @sql(
  unicode: Boolean
  constraints: String
  auto: Boolean
  default: String
  index: Boolean
  nullable: Boolean
  primary: Boolean
  type: String
  unique: Boolean
  generated: String
) on OBJECT | FIELD_DEFINITION

directive @sqlSkip on FIELD_DEFINITION
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    Boolean,
    String,
}

impl ArgumentKind {
    pub fn graphql_type(&self) -> &'static str {
        match self {
            ArgumentKind::Boolean => "Boolean",
            ArgumentKind::String => "String",
        }
    }
}

/// Every argument of the extraction directive, in declaration order.
pub const DIRECTIVE_ARGUMENTS: &[(&str, ArgumentKind)] = &[
    ("unicode", ArgumentKind::Boolean),
    ("constraints", ArgumentKind::String),
    ("auto", ArgumentKind::Boolean),
    ("default", ArgumentKind::String),
    ("index", ArgumentKind::Boolean),
    ("nullable", ArgumentKind::Boolean),
    ("primary", ArgumentKind::Boolean),
    ("type", ArgumentKind::String),
    ("unique", ArgumentKind::Boolean),
    ("generated", ArgumentKind::String),
];

/// Arguments copied from an object type annotation.
pub const TABLE_ARGUMENTS: &[&str] = &["unicode", "constraints"];

/// Arguments copied from a field annotation.
pub const COLUMN_ARGUMENTS: &[&str] = &[
    "auto", "default", "index", "nullable", "primary", "type", "unicode", "unique", "generated",
];

/// Returns the `directive @<name>(...)` declaration for an extraction directive.
pub fn directive_declaration(name: &str) -> String {
    let arguments = DIRECTIVE_ARGUMENTS
        .iter()
        .map(|(arg, kind)| format!("  {}: {}", arg, kind.graphql_type()))
        .collect::<Vec<_>>()
        .join("\n");

    format!("directive @{}(\n{}\n) on OBJECT | FIELD_DEFINITION", name, arguments)
}

/// Returns the declaration for a suppression directive.
pub fn suppress_declaration(name: &str) -> String {
    format!("directive @{} on FIELD_DEFINITION", name)
}

/// What the extractor does with a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DirectiveBehavior {
    /// Copy the directive's arguments into the relational model
    Extract,
    /// Leave the annotated field out of the relational model entirely
    Suppress,
}

/// Mapping from directive name to extraction behavior.
///
/// Directives not in the registry are ignored by the extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveRegistry {
    entries: IndexMap<String, DirectiveBehavior>,
}

impl Default for DirectiveRegistry {
    fn default() -> Self {
        Self::empty()
            .with(DEFAULT_DIRECTIVE, DirectiveBehavior::Extract)
            .with(DEFAULT_SUPPRESS_DIRECTIVE, DirectiveBehavior::Suppress)
    }
}

impl DirectiveRegistry {
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Registry with custom names for the extraction and suppression directives.
    pub fn named(directive: &str, suppress_directive: &str) -> Self {
        Self::empty()
            .with(directive, DirectiveBehavior::Extract)
            .with(suppress_directive, DirectiveBehavior::Suppress)
    }

    pub fn with(mut self, name: &str, behavior: DirectiveBehavior) -> Self {
        self.entries.insert(name.to_string(), behavior);
        self
    }

    pub fn behavior(&self, name: &str) -> Option<DirectiveBehavior> {
        self.entries.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// SDL declarations for every registered directive.
    pub fn declarations(&self) -> String {
        self.entries
            .iter()
            .map(|(name, behavior)| match behavior {
                DirectiveBehavior::Extract => directive_declaration(name),
                DirectiveBehavior::Suppress => suppress_declaration(name),
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Typed arguments of a type-level annotation. Unset keys are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableDirective {
    /// Default `false`
    pub unicode: Option<bool>,
    /// Default none
    pub constraints: Option<String>,
}

impl TableDirective {
    pub fn from_arguments(type_name: &str, arguments: &[(String, Value)]) -> Result<Self, BuildError> {
        let mut directive = TableDirective::default();
        for (key, value) in arguments {
            match key.as_str() {
                "unicode" => directive.unicode = read_bool(type_name, "", key, value)?,
                "constraints" => directive.constraints = read_string(type_name, "", key, value)?,
                other if is_column_argument(other) => {
                    tracing::warn!(
                        table = type_name,
                        argument = other,
                        "field argument on a type annotation is ignored"
                    );
                }
                other => return Err(unknown_argument(type_name, "", other)),
            }
        }
        Ok(directive)
    }

    /// Copies the given keys onto `table`, leaving unset keys untouched.
    pub fn apply(self, table: &mut Table) {
        if let Some(unicode) = self.unicode {
            table.unicode = unicode;
        }
        if self.constraints.is_some() {
            table.constraints = self.constraints;
        }
    }
}

/// Typed arguments of a field-level annotation. Unset keys are `None`.
///
/// Boolean keys default to `false`; string keys default to none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnDirective {
    pub auto: Option<bool>,
    pub default: Option<String>,
    pub index: Option<bool>,
    pub nullable: Option<bool>,
    pub primary: Option<bool>,
    pub sql_type: Option<String>,
    pub unicode: Option<bool>,
    pub unique: Option<bool>,
    pub generated: Option<String>,
}

impl ColumnDirective {
    pub fn from_arguments(
        type_name: &str,
        field_name: &str,
        arguments: &[(String, Value)],
    ) -> Result<Self, BuildError> {
        let mut directive = ColumnDirective::default();
        for (key, value) in arguments {
            let (t, c) = (type_name, field_name);
            match key.as_str() {
                "auto" => directive.auto = read_bool(t, c, key, value)?,
                "default" => directive.default = read_string(t, c, key, value)?,
                "index" => directive.index = read_bool(t, c, key, value)?,
                "nullable" => directive.nullable = read_bool(t, c, key, value)?,
                "primary" => directive.primary = read_bool(t, c, key, value)?,
                "type" => directive.sql_type = read_string(t, c, key, value)?,
                "unicode" => directive.unicode = read_bool(t, c, key, value)?,
                "unique" => directive.unique = read_bool(t, c, key, value)?,
                "generated" => directive.generated = read_string(t, c, key, value)?,
                other if is_table_argument(other) => {
                    tracing::warn!(
                        table = type_name,
                        column = field_name,
                        argument = other,
                        "type argument on a field annotation is ignored"
                    );
                }
                other => return Err(unknown_argument(t, c, other)),
            }
        }
        Ok(directive)
    }

    /// Copies the given keys onto `column`, leaving unset keys untouched.
    pub fn apply(self, column: &mut Column) {
        if let Some(auto) = self.auto {
            column.auto = auto;
        }
        if self.default.is_some() {
            column.default = self.default;
        }
        if let Some(index) = self.index {
            column.index = index;
        }
        if let Some(nullable) = self.nullable {
            column.nullable = nullable;
        }
        if let Some(primary) = self.primary {
            column.primary = primary;
        }
        if self.sql_type.is_some() {
            column.sql_type = self.sql_type;
        }
        if let Some(unicode) = self.unicode {
            column.unicode = unicode;
        }
        if let Some(unique) = self.unique {
            column.unique = unique;
        }
        if self.generated.is_some() {
            column.generated = self.generated;
        }
    }
}

fn is_table_argument(key: &str) -> bool {
    TABLE_ARGUMENTS.contains(&key)
}

fn is_column_argument(key: &str) -> bool {
    COLUMN_ARGUMENTS.contains(&key)
}

fn unknown_argument(table: &str, column: &str, key: &str) -> BuildError {
    BuildError::invalid(table, column, format!("unknown argument \"{}\".", key))
}

fn wrong_kind(table: &str, column: &str, key: &str, kind: ArgumentKind, value: &Value) -> BuildError {
    BuildError::invalid(
        table,
        column,
        format!(
            "argument \"{}\" expects {}, found {}.",
            key,
            kind.graphql_type(),
            value.kind()
        ),
    )
}

fn read_bool(table: &str, column: &str, key: &str, value: &Value) -> Result<Option<bool>, BuildError> {
    match value {
        Value::Null => Ok(None),
        Value::Boolean(b) => Ok(Some(*b)),
        other => Err(wrong_kind(table, column, key, ArgumentKind::Boolean, other)),
    }
}

/// Empty strings count as absent.
fn read_string(table: &str, column: &str, key: &str, value: &Value) -> Result<Option<String>, BuildError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        other => Err(wrong_kind(table, column, key, ArgumentKind::String, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn args(pairs: &[(&str, Value)]) -> Vec<(String, Value)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn string(s: &str) -> Value {
        Value::String(s.to_string())
    }

    #[rstest]
    fn test_default_declaration_matches_builder() {
        let registry = DirectiveRegistry::default();
        assert_eq!(
            format!("{}\n", registry.declarations()),
            SQL_DIRECTIVE_DECLARATION
        );
    }

    #[rstest]
    fn test_custom_directive_declaration() {
        let decl = directive_declaration("db");
        assert!(decl.starts_with("directive @db(\n  unicode: Boolean\n"));
        assert!(decl.ends_with("  generated: String\n) on OBJECT | FIELD_DEFINITION"));
    }

    #[rstest]
    fn test_registry_lookup() {
        let registry = DirectiveRegistry::named("db", "dbSkip");
        assert_eq!(registry.behavior("db"), Some(DirectiveBehavior::Extract));
        assert_eq!(registry.behavior("dbSkip"), Some(DirectiveBehavior::Suppress));
        assert_eq!(registry.behavior("sql"), None);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["db", "dbSkip"]);
    }

    #[rstest]
    fn test_table_directive_from_arguments() {
        let directive = TableDirective::from_arguments(
            "UserPair",
            &args(&[
                ("unicode", Value::Boolean(true)),
                ("constraints", string("UNIQUE(a, b)")),
            ]),
        )
        .unwrap();
        assert_eq!(directive.unicode, Some(true));
        assert_eq!(directive.constraints.as_deref(), Some("UNIQUE(a, b)"));
    }

    #[rstest]
    fn test_table_directive_ignores_column_keys() {
        let directive =
            TableDirective::from_arguments("User", &args(&[("primary", Value::Boolean(true))]))
                .unwrap();
        assert_eq!(directive, TableDirective::default());
    }

    #[rstest]
    fn test_column_directive_ignores_table_keys() {
        let directive = ColumnDirective::from_arguments(
            "UserPair",
            "userPairId",
            &args(&[("constraints", string("UNIQUE(a)"))]),
        )
        .unwrap();
        assert_eq!(directive, ColumnDirective::default());
    }

    #[rstest]
    fn test_table_directive_rejects_unknown_key() {
        let err = TableDirective::from_arguments("User", &args(&[("engine", string("InnoDB"))]))
            .unwrap_err();
        assert_eq!(err.to_string(), "[User : ]: unknown argument \"engine\".");
    }

    #[rstest]
    fn test_column_directive_from_arguments() {
        let directive = ColumnDirective::from_arguments(
            "Post",
            "content",
            &args(&[
                ("type", string("VARCHAR(300)")),
                ("unicode", Value::Boolean(true)),
                ("nullable", Value::Boolean(true)),
                ("default", Value::Null),
            ]),
        )
        .unwrap();
        assert_eq!(directive.sql_type.as_deref(), Some("VARCHAR(300)"));
        assert_eq!(directive.nullable, Some(true));
        assert_eq!(directive.unicode, Some(true));
        assert_eq!(directive.default, None);
        assert_eq!(directive.auto, None);
    }

    #[rstest]
    #[case("auto", string("yes"), "argument \"auto\" expects Boolean, found String.")]
    #[case("type", Value::Int(16), "argument \"type\" expects String, found Int.")]
    #[case("default", Value::Enum("NOW".into()), "argument \"default\" expects String, found Enum.")]
    fn test_column_directive_rejects_wrong_kind(
        #[case] key: &str,
        #[case] value: Value,
        #[case] message: &str,
    ) {
        let err = ColumnDirective::from_arguments("Post", "likes", &args(&[(key, value)]))
            .unwrap_err();
        assert_eq!(err.to_string(), format!("[Post : likes]: {}", message));
    }

    #[rstest]
    fn test_empty_strings_are_absent() {
        let directive = ColumnDirective::from_arguments(
            "Post",
            "likes",
            &args(&[("default", string("")), ("generated", string(""))]),
        )
        .unwrap();
        assert_eq!(directive.default, None);
        assert_eq!(directive.generated, None);
    }

    #[rstest]
    fn test_column_apply_overwrites_only_given_keys() {
        let mut column = Column::new("likes", "Int");
        column.unique = true;
        column.default = Some("0".to_string());

        ColumnDirective {
            index: Some(true),
            unique: Some(false),
            ..Default::default()
        }
        .apply(&mut column);

        assert!(column.index);
        assert!(!column.unique);
        assert_eq!(column.default.as_deref(), Some("0"));
    }

    #[rstest]
    fn test_table_apply_keeps_unset_keys() {
        let mut table = Table::new("User");
        table.constraints = Some("UNIQUE(a)".to_string());
        TableDirective {
            unicode: Some(true),
            constraints: None,
        }
        .apply(&mut table);
        assert!(table.unicode);
        assert_eq!(table.constraints.as_deref(), Some("UNIQUE(a)"));
    }
}
