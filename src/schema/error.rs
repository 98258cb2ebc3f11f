use thiserror::Error;

use crate::sdl::SdlError;

/// Build error types
#[derive(Error, Debug)]
pub enum BuildError {
    /// A model violation, scoped to a table and (possibly empty) column.
    #[error("[{table} : {column}]: {message}")]
    Invalid {
        table: String,
        column: String,
        message: String,
    },

    #[error(transparent)]
    Schema(#[from] SdlError),

    #[error("Failed to read '{path}': {message}")]
    ReadFailed { path: String, message: String },

    #[error("Failed to write '{path}': {message}")]
    WriteFailed { path: String, message: String },
}

impl BuildError {
    pub(crate) fn invalid(table: &str, column: &str, message: impl Into<String>) -> Self {
        BuildError::Invalid {
            table: table.to_string(),
            column: column.to_string(),
            message: message.into(),
        }
    }
}
