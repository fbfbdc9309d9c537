//! Error types for VCS operations

use thiserror::Error;

/// Result type for VCS operations
pub type Result<T> = std::result::Result<T, VcsError>;

/// Errors that can occur during VCS operations
#[derive(Debug, Error)]
pub enum VcsError {
    /// The external history query failed, exited non-zero or wrote to stderr
    #[error("`{command}` failed (exit code {code:?}): {stderr}")]
    ToolInvocation {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// Git repository error
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    /// Repository not found
    #[error("Repository not found at path: {path}")]
    RepositoryNotFound { path: String },

    /// Invalid commit reference
    #[error("Invalid commit reference: {reference}")]
    InvalidReference { reference: String },
}

impl VcsError {
    /// Whether this error came from the external tool boundary
    pub fn is_tool_invocation(&self) -> bool {
        matches!(self, VcsError::ToolInvocation { .. })
    }
}
