use std::path::PathBuf;
use thiserror::Error;

/// Errors at the edges of the hierarchy core: reading snapshots and settings.
///
/// Building, flattening and navigating never fail; malformed records are
/// normalized instead.
#[derive(Error, Debug)]
pub enum OrgError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid person records in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("snapshot not found: {0}")]
    SnapshotNotFound(PathBuf),
}

pub type OrgResult<T> = Result<T, OrgError>;
