//! CLI error types and exit codes

use perfgate_performance::PerformanceError;
use perfgate_storage::StorageError;
use perfgate_tasks::TaskError;
use perfgate_vcs::VcsError;
use thiserror::Error;

/// Exit status when nothing regressed (or there was nothing to check)
pub const EXIT_OK: i32 = 0;
/// Exit status when at least one benchmark regressed
pub const EXIT_REGRESSIONS: i32 = 1;
/// Exit status for tool, storage and configuration failures
pub const EXIT_FAILURE: i32 = 2;

/// CLI errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// Required input absent; the run ends without doing anything
    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error(transparent)]
    Performance(#[from] PerformanceError),

    #[error(transparent)]
    Vcs(#[from] VcsError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Task(#[from] TaskError),

    #[error("Failed to render output: {0}")]
    Render(String),

    #[error("{0} performance regression(s) detected")]
    RegressionsDetected(usize),
}

impl CliError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::MissingInput(_) => EXIT_OK,
            CliError::RegressionsDetected(_) => EXIT_REGRESSIONS,
            _ => EXIT_FAILURE,
        }
    }

    /// Whether the run should be reported as failed
    pub fn is_failure(&self) -> bool {
        self.exit_code() != EXIT_OK
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Render(err.to_string())
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        CliError::Render(err.to_string())
    }
}

pub type CliResult<T> = Result<T, CliError>;
