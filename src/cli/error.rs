//! CLI-level errors (wraps library errors)

use thiserror::Error;

use crate::errors::OrgError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Org(#[from] OrgError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::Org(e) => match e {
                OrgError::Io { .. } => crate::exitcode::IOERR,
                OrgError::Json { .. } => crate::exitcode::DATAERR,
                OrgError::Config { .. } => crate::exitcode::CONFIG,
                OrgError::SnapshotNotFound(_) => crate::exitcode::NOINPUT,
            },
        }
    }
}
