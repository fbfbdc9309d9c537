//! Process runner - spawn, wait, capture

use std::borrow::Cow;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, trace};

use crate::{
    config::ProcessConfig,
    error::{ProcessError, Result},
};

/// Captured result of a finished process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code (None when terminated by a signal)
    pub code: Option<i32>,
    /// Captured stdout, as written
    pub stdout: Vec<u8>,
    /// Captured stderr, lossily decoded
    pub stderr: String,
}

impl ProcessOutput {
    /// Whether the process exited with status 0
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Stdout decoded as UTF-8, invalid sequences replaced
    pub fn stdout_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    /// Whether the process wrote anything other than whitespace to stderr
    pub fn has_stderr(&self) -> bool {
        !self.stderr.trim().is_empty()
    }
}

/// Runs external commands to completion
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    /// Create new process runner
    pub fn new() -> Self {
        Self
    }

    /// Run a process to completion and capture its output
    ///
    /// The exit status is reported, not interpreted: a non-zero exit is still
    /// `Ok`. Only spawn failures, I/O failures and timeouts are errors.
    ///
    /// # Examples
    /// ```no_run
    /// use perfgate_process::{ProcessConfig, ProcessRunner};
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let output = ProcessRunner::new()
    ///     .output(ProcessConfig::new("echo").args(["hello"]))
    ///     .await?;
    /// assert_eq!(output.stdout_lossy().trim(), "hello");
    /// # Ok(())
    /// # }
    /// ```
    pub async fn output(&self, config: ProcessConfig) -> Result<ProcessOutput> {
        if config.command.trim().is_empty() {
            return Err(ProcessError::InvalidConfig(
                "command must not be empty".to_string(),
            ));
        }

        debug!(
            command = %config.command,
            args = ?config.args,
            "Running process"
        );

        let mut cmd = Command::new(&config.command);
        cmd.args(&config.args);

        if let Some(ref dir) = config.working_dir {
            cmd.current_dir(dir);
        }

        for (key, value) in &config.env {
            cmd.env(key, value);
        }

        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd.spawn().map_err(|source| ProcessError::SpawnFailed {
            command: config.display(),
            source,
        })?;

        let output = match config.timeout {
            Some(timeout) => tokio::time::timeout(timeout, child.wait_with_output())
                .await
                .map_err(|_| ProcessError::Timeout {
                    command: config.display(),
                    seconds: timeout.as_secs(),
                })?,
            None => child.wait_with_output().await,
        }
        .map_err(|source| ProcessError::Io {
            command: config.display(),
            source,
        })?;

        let output = ProcessOutput {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        trace!(
            command = %config.command,
            code = ?output.code,
            stdout_len = output.stdout.len(),
            stderr_len = output.stderr.len(),
            "Process finished"
        );

        Ok(output)
    }
}
