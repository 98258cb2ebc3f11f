//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing
//! - An `Execute` implementation producing a serializable result
//! - An `Outputable` implementation for the table format

mod build;
mod inspect;

pub use build::{BuildCmd, BuildResult};
pub use inspect::{InspectCmd, InspectResult};

use clap::Subcommand;
use std::error::Error;

use crate::output::{OutputFormat, Outputable};

/// Trait for executing commands with command-specific result types.
pub trait Execute {
    type Output: Outputable;

    fn execute(self) -> Result<Self::Output, Box<dyn Error>>;
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile an annotated schema into CREATE TABLE statements
    Build(BuildCmd),

    /// Show the relational model extracted from an annotated schema
    Inspect(InspectCmd),

    /// Catch-all for unknown commands
    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

impl Command {
    /// Execute the command and return formatted output
    pub fn run(self, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        match self {
            Command::Build(cmd) => {
                let result = cmd.execute()?;
                Ok(result.format(format))
            }
            Command::Inspect(cmd) => {
                let result = cmd.execute()?;
                Ok(result.format(format))
            }
            Command::Unknown(args) => {
                Err(format!("Unknown command: {}", args.first().unwrap_or(&String::new())).into())
            }
        }
    }
}
