//! Task payloads

use std::fmt;

use serde::{Deserialize, Serialize};

/// A benchmark run to schedule on the worker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnqueueRequest {
    /// Commit to benchmark
    pub commit: String,
    /// Benchmark include patterns; empty runs everything
    #[serde(default)]
    pub includes: Vec<String>,
}

impl EnqueueRequest {
    pub fn new(commit: impl Into<String>) -> Self {
        Self {
            commit: commit.into(),
            includes: Vec::new(),
        }
    }

    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.includes.push(pattern.into());
        self
    }

    pub fn includes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.includes.extend(patterns.into_iter().map(Into::into));
        self
    }
}

/// Name the queue service assigned to a created task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskHandle {
    pub name: String,
}

impl fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
