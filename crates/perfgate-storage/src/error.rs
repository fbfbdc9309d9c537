//! Storage error types

use std::path::PathBuf;

use perfgate_process::ProcessError;
use thiserror::Error;

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;

/// Object storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    /// Storage command exited unsuccessfully
    #[error("Storage command `{command}` failed (exit code {code:?}): {stderr}")]
    Command {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// Storage command could not be run
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// File read failed
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory walk failed
    #[error("Failed to walk storage directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// No object stored under the key
    #[error("Object not found: {0}")]
    NotFound(String),

    /// Key escapes the store or is otherwise unusable
    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    /// Listing output could not be understood
    #[error("Invalid listing: {0}")]
    InvalidListing(String),
}
