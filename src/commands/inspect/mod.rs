mod execute;
mod output;
mod output_tests;

pub use execute::InspectResult;

use clap::Args;

use crate::cli::SchemaArgs;

/// Show the relational model extracted from an annotated schema
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  sql_schema inspect -s schema.graphql               # Tables, columns and indices
  sql_schema inspect -s schema.graphql --format json # Machine-readable model
  sql_schema inspect -s schema.graphql --declarations # Also print directive declarations")]
pub struct InspectCmd {
    #[command(flatten)]
    pub common: SchemaArgs,

    /// Also print the SDL declarations of the registered directives
    #[arg(long)]
    pub declarations: bool,
}
