use std::error::Error;

use serde::Serialize;

use super::InspectCmd;
use crate::build::build_model;
use crate::commands::Execute;
use crate::schema::{Column, RelationalModel, Table};

/// A column of the validated model
#[derive(Debug, Clone, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub declared_type: String,
    pub sql_type: String,
    pub nullable: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated: Option<String>,
}

impl From<&Column> for ColumnSummary {
    fn from(column: &Column) -> Self {
        let flags = [
            ("auto", column.auto),
            ("unique", column.unique),
            ("unicode", column.unicode),
        ]
        .into_iter()
        .filter(|(_, set)| *set)
        .map(|(flag, _)| flag.to_string())
        .collect();

        Self {
            name: column.name.clone(),
            declared_type: column.declared_type.clone(),
            sql_type: column.sql_type().to_string(),
            nullable: column.nullable,
            flags,
            default: column.default.clone(),
            generated: column.generated.clone(),
        }
    }
}

/// A table of the validated model
#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    pub name: String,
    pub unicode: bool,
    pub primary_index: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub secondary_indices: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<String>,
    pub columns: Vec<ColumnSummary>,
}

impl From<&Table> for TableSummary {
    fn from(table: &Table) -> Self {
        Self {
            name: table.name.clone(),
            unicode: table.unicode,
            primary_index: table.primary_index.clone().unwrap_or_default(),
            secondary_indices: table.secondary_indices.clone(),
            constraints: table.constraints.clone(),
            columns: table.columns.values().map(ColumnSummary::from).collect(),
        }
    }
}

/// Result of the inspect command execution
#[derive(Debug, Default, Serialize)]
pub struct InspectResult {
    pub schema: String,
    pub total_columns: usize,
    pub tables: Vec<TableSummary>,
    /// Directive declarations to paste into a schema, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declarations: Option<String>,
}

impl InspectResult {
    pub fn from_model(schema: impl Into<String>, model: &RelationalModel) -> Self {
        Self {
            schema: schema.into(),
            total_columns: model.column_count(),
            tables: model.tables().map(TableSummary::from).collect(),
            declarations: None,
        }
    }
}

impl Execute for InspectCmd {
    type Output = InspectResult;

    fn execute(self) -> Result<Self::Output, Box<dyn Error>> {
        let config = self.common.load_config()?;
        let registry = self.common.registry(&config);
        let source = self.common.read_source()?;

        let model = build_model(&source, &registry)?;
        let mut result =
            InspectResult::from_model(self.common.schema.display().to_string(), &model);
        if self.declarations {
            result.declarations = Some(registry.declarations());
        }
        Ok(result)
    }
}
