use std::error::Error;

use serde::Serialize;

use super::BuildCmd;
use crate::build::{BuildOptions, OutputSink, build_to_sink};
use crate::commands::Execute;

/// Result of the build command execution
#[derive(Debug, Default, Serialize)]
pub struct BuildResult {
    pub database: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub table_prefix: String,
    pub tables: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    pub script: String,
}

impl Execute for BuildCmd {
    type Output = BuildResult;

    fn execute(self) -> Result<Self::Output, Box<dyn Error>> {
        let config = self.common.load_config()?;

        let database = self
            .database
            .or(config.database.clone())
            .ok_or("--database is required (or set \"database\" in .sql_schema.json)")?;
        let options = BuildOptions::new(database)
            .with_prefix(self.prefix.or(config.table_prefix.clone()).unwrap_or_default())
            .with_directives(self.common.registry(&config));
        let output = self.output.or(config.output);

        let source = self.common.read_source()?;
        let sink = OutputSink::from(output);
        let built = build_to_sink(&source, &options, &sink)?;

        Ok(BuildResult {
            tables: built
                .model
                .tables()
                .map(|t| format!("{}{}", options.table_prefix, t.name))
                .collect(),
            database: options.database_name,
            table_prefix: options.table_prefix,
            output: match sink {
                OutputSink::File(path) => Some(path.display().to_string()),
                OutputSink::Memory => None,
            },
            script: built.script,
        })
    }
}
