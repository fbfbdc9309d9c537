//! Parent lookup through the `git` command-line tool

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use perfgate_process::{ProcessConfig, ProcessRunner};
use tracing::debug;

use crate::{
    error::{Result, VcsError},
    lookup::ParentLookup,
};

/// Runs `git log --pretty=%P -n 1 --end-of-options <commit>` for each lookup
///
/// Any stderr output fails the lookup, even on a zero exit.
#[derive(Debug, Clone)]
pub struct GitCli {
    runner: ProcessRunner,
    git_binary: String,
    repo_dir: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl GitCli {
    /// Create a lookup that runs `git` in the current directory
    pub fn new() -> Self {
        Self {
            runner: ProcessRunner::new(),
            git_binary: "git".to_string(),
            repo_dir: None,
            timeout: None,
        }
    }

    /// Use a different git executable
    pub fn git_binary(mut self, binary: impl Into<String>) -> Self {
        self.git_binary = binary.into();
        self
    }

    /// Run against the repository at `dir` (passed as `git -C <dir>`)
    pub fn repo_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.repo_dir = Some(dir.into());
        self
    }

    /// Bound each invocation by `timeout`
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn command(&self, commit: &str) -> ProcessConfig {
        let mut args = Vec::new();
        if let Some(dir) = &self.repo_dir {
            args.push("-C".to_string());
            args.push(dir.display().to_string());
        }
        args.extend(
            ["log", "--pretty=%P", "-n", "1", "--end-of-options", commit].map(String::from),
        );

        ProcessConfig::new(&self.git_binary)
            .args(args)
            .env("GIT_PAGER", "cat")
            .timeout(self.timeout)
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

/// Split `%P` output into parent ids
pub fn parse_parents(stdout: &str) -> Vec<String> {
    stdout
        .split_whitespace()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl ParentLookup for GitCli {
    async fn parents(&self, commit: &str) -> Result<Vec<String>> {
        let config = self.command(commit);
        let command = config.display();

        let output = self
            .runner
            .output(config)
            .await
            .map_err(|e| VcsError::ToolInvocation {
                command: command.clone(),
                code: None,
                stderr: e.to_string(),
            })?;

        if !output.success() || output.has_stderr() {
            return Err(VcsError::ToolInvocation {
                command,
                code: output.code,
                stderr: output.stderr.trim().to_string(),
            });
        }

        let parents = parse_parents(&output.stdout_lossy());
        debug!(commit, ?parents, "Resolved parents via git CLI");
        Ok(parents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_parent() {
        assert_eq!(parse_parents("abc123\n"), vec!["abc123"]);
    }

    #[test]
    fn test_parse_merge_parents() {
        assert_eq!(parse_parents("  aaa bbb  ccc\n"), vec!["aaa", "bbb", "ccc"]);
    }

    #[test]
    fn test_parse_root_commit() {
        assert!(parse_parents("\n").is_empty());
        assert!(parse_parents("").is_empty());
    }

    #[test]
    fn test_command_line() {
        let git = GitCli::new().repo_dir("/work/repo");
        assert_eq!(
            git.command("abc").display(),
            "git -C /work/repo log --pretty=%P -n 1 --end-of-options abc"
        );

        let git = GitCli::new().git_binary("/usr/bin/git");
        assert_eq!(
            git.command("HEAD").display(),
            "/usr/bin/git log --pretty=%P -n 1 --end-of-options HEAD"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_tool_invocation() {
        let git = GitCli::new().git_binary("false");
        let err = git.parents("abc").await.unwrap_err();
        assert!(err.is_tool_invocation());
    }

    #[tokio::test]
    async fn test_missing_binary_is_tool_invocation() {
        let git = GitCli::new().git_binary("perfgate-no-such-git");
        let err = git.parents("abc").await.unwrap_err();
        assert!(err.is_tool_invocation());
    }
}
