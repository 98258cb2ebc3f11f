mod execute;
mod output;

pub use execute::BuildResult;

use std::path::PathBuf;

use clap::Args;

use crate::cli::SchemaArgs;

/// Compile an annotated schema into CREATE TABLE statements
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  sql_schema build -s schema.graphql -d app                 # Print the script
  sql_schema build -s schema.graphql -d app -p test_        # Prefix every table name
  sql_schema build -s schema.graphql -d app -o schema.sql   # Write the script to a file")]
pub struct BuildCmd {
    #[command(flatten)]
    pub common: SchemaArgs,

    /// Database every table is qualified with (required unless set in the config file)
    #[arg(short, long)]
    pub database: Option<String>,

    /// Prefix prepended to every table name
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Write the script to this file instead of printing it
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
