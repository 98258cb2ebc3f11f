//! Relational intermediate representation.
//!
//! A [`RelationalModel`] is built fresh for every compilation. Tables keep the
//! order in which their type was first seen, and columns keep field
//! declaration order; both orders carry through to the rendered DDL.

use indexmap::IndexMap;
use serde::Serialize;

/// A column derived from an annotated field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Column {
    /// Field name, used verbatim as the column name
    pub name: String,

    /// The field's named GraphQL type with list/non-null wrappers removed
    pub declared_type: String,

    /// SQL type, explicit or inferred. Always `Some` after normalization.
    pub sql_type: Option<String>,

    pub auto: bool,
    pub default: Option<String>,
    pub index: bool,
    pub nullable: bool,
    pub primary: bool,
    pub unicode: bool,
    pub unique: bool,

    /// Generated-column expression, passed through to the DDL
    pub generated: Option<String>,
}

impl Column {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            ..Default::default()
        }
    }

    /// The resolved SQL type, or an empty string before normalization.
    pub fn sql_type(&self) -> &str {
        self.sql_type.as_deref().unwrap_or_default()
    }
}

/// A table derived from an object type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    pub name: String,

    /// Columns keyed by field name, in declaration order
    pub columns: IndexMap<String, Column>,

    /// Emit the table-level character set clause
    pub unicode: bool,

    /// Free-form table constraints, appended verbatim
    pub constraints: Option<String>,

    /// Name of the primary key column, set by index classification
    pub primary_index: Option<String>,

    /// Names of secondary index columns, in declaration order
    pub secondary_indices: Vec<String>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Returns the column for `name`, creating it at the end if absent.
    ///
    /// An existing column keeps its position and its declared type.
    pub fn column_entry(&mut self, name: &str, declared_type: &str) -> &mut Column {
        self.columns
            .entry(name.to_string())
            .or_insert_with(|| Column::new(name, declared_type))
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn secondary_columns(&self) -> impl Iterator<Item = &Column> {
        self.secondary_indices
            .iter()
            .filter_map(|name| self.column(name))
    }
}

/// All tables of one compilation, in first-sighting order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RelationalModel {
    pub tables: IndexMap<String, Table>,
}

impl RelationalModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the table for `name`, creating it at the end if absent.
    pub fn table_entry(&mut self, name: &str) -> &mut Table {
        self.tables
            .entry(name.to_string())
            .or_insert_with(|| Table::new(name))
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Total number of columns across all tables.
    pub fn column_count(&self) -> usize {
        self.tables.values().map(|t| t.columns.len()).sum()
    }
}
