//! Task-queue client configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, TaskError};

/// Where and how to enqueue benchmark tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskQueueConfig {
    /// Queue service base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default)]
    pub project: String,

    #[serde(default)]
    pub location: String,

    #[serde(default)]
    pub queue: String,

    /// URL the queue delivers each task to
    #[serde(default)]
    pub worker_url: String,

    /// OAuth bearer token; requests are unauthenticated without one
    #[serde(default, skip_serializing)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Custom user agent
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for TaskQueueConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            project: String::new(),
            location: String::new(),
            queue: String::new(),
            worker_url: String::new(),
            token: None,
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl TaskQueueConfig {
    /// Config for `queue` in `project`/`location`, delivering to `worker_url`
    pub fn new(
        project: impl Into<String>,
        location: impl Into<String>,
        queue: impl Into<String>,
        worker_url: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            location: location.into(),
            queue: queue.into(),
            worker_url: worker_url.into(),
            ..Default::default()
        }
    }

    /// Set endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Fully-qualified queue name
    pub fn queue_path(&self) -> String {
        format!(
            "projects/{}/locations/{}/queues/{}",
            self.project, self.location, self.queue
        )
    }

    /// Task creation URL for the configured queue
    pub fn tasks_url(&self) -> Result<Url> {
        let url = format!(
            "{}/v2/{}/tasks",
            self.endpoint.trim_end_matches('/'),
            self.queue_path()
        );
        Url::parse(&url).map_err(|e| TaskError::InvalidUrl(format!("{url}: {e}")))
    }

    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("project", &self.project),
            ("location", &self.location),
            ("queue", &self.queue),
            ("worker_url", &self.worker_url),
        ] {
            if value.trim().is_empty() {
                return Err(TaskError::InvalidConfig(format!("{field} must be set")));
            }
        }

        Url::parse(&self.worker_url)
            .map_err(|e| TaskError::InvalidUrl(format!("{}: {e}", self.worker_url)))?;
        self.tasks_url()?;
        Ok(())
    }
}

fn default_endpoint() -> String {
    "https://cloudtasks.googleapis.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("perfgate/{}", env!("CARGO_PKG_VERSION"))
}
