//! Output formatting for inspect command results.

use super::execute::{ColumnSummary, InspectResult};
use crate::output::Outputable;

impl Outputable for InspectResult {
    fn to_table(&self) -> String {
        let mut lines = vec![format!("Relational model: {}", self.schema), String::new()];

        if self.tables.is_empty() {
            lines.push("No annotated types found.".to_string());
        } else {
            lines.extend(self.table_lines());
        }

        if let Some(declarations) = &self.declarations {
            lines.push(String::new());
            lines.push("Directive declarations:".to_string());
            lines.push(String::new());
            lines.push(declarations.clone());
        }

        lines.join("\n")
    }
}

impl InspectResult {
    fn table_lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "Found {} table(s), {} column(s):",
            self.tables.len(),
            self.total_columns
        )];

        for table in &self.tables {
            lines.push(String::new());
            if table.unicode {
                lines.push(format!("{} (unicode)", table.name));
            } else {
                lines.push(table.name.clone());
            }

            for column in &table.columns {
                lines.push(format!("  {}", format_column(column)));
            }

            lines.push(format!("  PRIMARY KEY {}", table.primary_index));
            if !table.secondary_indices.is_empty() {
                lines.push(format!("  INDEX {}", table.secondary_indices.join(", ")));
            }
            if let Some(constraints) = &table.constraints {
                lines.push("  CONSTRAINTS".to_string());
                for line in constraints.lines() {
                    lines.push(format!("    {}", line.trim()));
                }
            }
        }

        lines
    }
}

fn format_column(column: &ColumnSummary) -> String {
    let mut line = format!(
        "{}: {} {}",
        column.name,
        column.sql_type,
        if column.nullable { "NULL" } else { "NOT NULL" }
    );

    let mut details = column.flags.clone();
    if let Some(default) = &column.default {
        details.push(format!("default {}", default));
    }
    if let Some(generated) = &column.generated {
        details.push(format!("generated {}", generated));
    }
    if !details.is_empty() {
        line.push_str(&format!(" [{}]", details.join(", ")));
    }

    line
}
