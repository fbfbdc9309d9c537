//! Performance error types

use perfgate_vcs::VcsError;
use thiserror::Error;

use crate::model::Mode;

/// Result type for regression detection
pub type Result<T> = std::result::Result<T, PerformanceError>;

/// Errors raised while locating or comparing benchmark results
#[derive(Error, Debug)]
pub enum PerformanceError {
    /// Storage listing matched more than one object, or did not report a count
    #[error(
        "Ambiguous results for commit {commit} under prefix {prefix}: expected at most one object, listing reported {}",
        describe_count(.count)
    )]
    AmbiguousResult {
        commit: String,
        prefix: String,
        count: Option<usize>,
    },

    /// No comparison rule exists for this measurement mode
    #[error("Unsupported benchmark mode '{mode}' for {benchmark}")]
    UnsupportedMode { benchmark: String, mode: Mode },

    /// Commit ancestry query failed
    #[error("Ancestry query failed: {0}")]
    Vcs(#[from] VcsError),

    /// Object storage access failed
    #[error("Storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Result document could not be parsed
    #[error("Failed to parse result document {key}: {source}")]
    Parse {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid detector configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PerformanceError {
    /// Wrap any storage backend error
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        PerformanceError::Storage(Box::new(err))
    }
}

fn describe_count(count: &Option<usize>) -> String {
    match count {
        Some(count) => count.to_string(),
        None => "no count".to_string(),
    }
}
