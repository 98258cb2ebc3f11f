//! Output formatting for build command results.

use super::execute::BuildResult;
use crate::output::{Outputable, summary_line};

impl Outputable for BuildResult {
    /// The script itself when printing to stdout, a summary when it was written to a file.
    fn to_table(&self) -> String {
        let Some(path) = &self.output else {
            return self.script.clone();
        };

        let mut lines = vec![format!("Schema written to {}", path), String::new()];
        lines.push("Build Summary:".to_string());
        lines.push(summary_line("Database", &self.database, 12));
        if !self.table_prefix.is_empty() {
            lines.push(summary_line("Prefix", &self.table_prefix, 12));
        }
        lines.push(summary_line("Tables", self.tables.len(), 12));
        for table in &self.tables {
            lines.push(format!("    {}", table));
        }
        lines.join("\n")
    }
}
