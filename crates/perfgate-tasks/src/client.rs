//! Task-queue HTTP client

use std::collections::BTreeMap;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    config::TaskQueueConfig,
    error::{Result, TaskError},
    request::{EnqueueRequest, TaskHandle},
};

/// Mockable task queue
#[async_trait]
pub trait TaskQueue: Send + Sync {
    /// Create one task for `request`
    async fn enqueue(&self, request: &EnqueueRequest) -> Result<TaskHandle>;
}

#[derive(Serialize)]
struct CreateTask<'a> {
    task: Task<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Task<'a> {
    http_request: HttpRequest<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HttpRequest<'a> {
    http_method: &'static str,
    url: &'a str,
    headers: BTreeMap<&'static str, &'static str>,
    /// Base64-encoded JSON payload
    body: String,
}

#[derive(Deserialize)]
struct CreatedTask {
    name: String,
}

/// Creates HTTP-target tasks through the Cloud Tasks v2 REST API
pub struct TaskQueueClient {
    http: reqwest::Client,
    config: TaskQueueConfig,
}

impl TaskQueueClient {
    /// Create a new client, validating the configuration first
    pub fn new(config: TaskQueueConfig) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { http, config })
    }

    /// Get configuration
    pub fn config(&self) -> &TaskQueueConfig {
        &self.config
    }

    fn body(&self, request: &EnqueueRequest) -> Result<serde_json::Value> {
        let payload = serde_json::to_vec(request)?;
        let body = CreateTask {
            task: Task {
                http_request: HttpRequest {
                    http_method: "POST",
                    url: &self.config.worker_url,
                    headers: BTreeMap::from([("Content-Type", "application/json")]),
                    body: STANDARD.encode(payload),
                },
            },
        };
        Ok(serde_json::to_value(body)?)
    }
}

#[async_trait]
impl TaskQueue for TaskQueueClient {
    async fn enqueue(&self, request: &EnqueueRequest) -> Result<TaskHandle> {
        let url = self.config.tasks_url()?;
        debug!(%url, commit = %request.commit, includes = ?request.includes, "Creating task");

        let mut builder = self.http.post(url).json(&self.body(request)?);
        if let Some(token) = &self.config.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TaskError::Http {
                status,
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string()),
            });
        }

        let created: CreatedTask = serde_json::from_slice(&response.bytes().await?)?;
        info!(task = %created.name, commit = %request.commit, "Enqueued benchmark task");
        Ok(TaskHandle { name: created.name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TaskQueueClient {
        let config =
            TaskQueueConfig::new("perf", "us-central1", "jmh", "https://worker.example.com/run");
        TaskQueueClient::new(config).unwrap()
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = TaskQueueClient::new(TaskQueueConfig::default());
        assert!(matches!(result, Err(TaskError::InvalidConfig(_))));
    }

    #[test]
    fn test_body_shape() {
        let request = EnqueueRequest::new("abc123").include("Twitter.*");
        let body = client().body(&request).unwrap();

        let http = &body["task"]["httpRequest"];
        assert_eq!(http["httpMethod"], "POST");
        assert_eq!(http["url"], "https://worker.example.com/run");
        assert_eq!(http["headers"]["Content-Type"], "application/json");

        let decoded = STANDARD.decode(http["body"].as_str().unwrap()).unwrap();
        let payload: serde_json::Value = serde_json::from_slice(&decoded).unwrap();
        assert_eq!(
            payload,
            serde_json::json!({"commit": "abc123", "includes": ["Twitter.*"]})
        );
    }
}
