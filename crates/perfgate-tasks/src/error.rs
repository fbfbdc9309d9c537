//! Task-queue client error types

use thiserror::Error;

/// Result type for task-queue operations
pub type Result<T> = std::result::Result<T, TaskError>;

/// Task-queue client errors
#[derive(Debug, Error)]
pub enum TaskError {
    /// Network request failed
    #[error("Network request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Queue service answered with an error status
    #[error("HTTP {status}: {message}")]
    Http {
        status: reqwest::StatusCode,
        message: String,
    },

    /// Payload or response (de)serialization failed
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid client configuration
    #[error("Invalid task queue configuration: {0}")]
    InvalidConfig(String),
}
