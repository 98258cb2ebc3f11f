//! CLI argument definitions.
//!
//! This module contains the top-level CLI structure and shared types.
//! Individual command definitions are in the `commands` module.

use clap::Parser;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use crate::commands::Command;
use crate::config::ConfigFile;
use crate::output::OutputFormat;
use crate::schema::{BuildError, DirectiveRegistry};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

fn validate_file_exists(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("File not found: {}", path.display()))
    }
}

/// Arguments shared by every command that reads a schema.
#[derive(clap::Args, Debug, Clone)]
pub struct SchemaArgs {
    /// Path to the annotated GraphQL schema
    #[arg(short, long, value_parser = validate_file_exists)]
    pub schema: PathBuf,

    /// Name of the extraction directive [default: sql]
    #[arg(long)]
    pub directive: Option<String>,

    /// Name of the suppression directive [default: sqlSkip]
    #[arg(long)]
    pub suppress_directive: Option<String>,

    /// Config file to read defaults from [default: ./.sql_schema.json if present]
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl SchemaArgs {
    /// Reads the schema file.
    pub fn read_source(&self) -> Result<String, BuildError> {
        fs::read_to_string(&self.schema).map_err(|e| BuildError::ReadFailed {
            path: self.schema.display().to_string(),
            message: e.to_string(),
        })
    }

    pub fn load_config(&self) -> Result<ConfigFile, Box<dyn Error>> {
        ConfigFile::load(self.config.as_deref())
    }

    pub fn registry(&self, config: &ConfigFile) -> DirectiveRegistry {
        config.registry(self.directive.as_deref(), self.suppress_directive.as_deref())
    }
}
