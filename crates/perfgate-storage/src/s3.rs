//! S3 access through the AWS command-line tool

use std::time::Duration;

use async_trait::async_trait;
use perfgate_process::{ProcessConfig, ProcessOutput, ProcessRunner};
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::{Result, StorageError},
    store::{ObjectListing, ObjectStore},
};

/// Lists and fetches objects in one bucket with `aws s3api` / `aws s3 cp`
///
/// Credentials and endpoint resolution are left to the AWS CLI (environment,
/// profiles, instance metadata).
#[derive(Debug, Clone)]
pub struct S3CliStore {
    runner: ProcessRunner,
    aws_binary: String,
    bucket: String,
    region: Option<String>,
    profile: Option<String>,
    timeout: Option<Duration>,
}

impl S3CliStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            runner: ProcessRunner::new(),
            aws_binary: "aws".to_string(),
            bucket: bucket.into(),
            region: None,
            profile: None,
            timeout: None,
        }
    }

    /// Use a different `aws` executable
    pub fn aws_binary(mut self, binary: impl Into<String>) -> Self {
        self.aws_binary = binary.into();
        self
    }

    pub fn region(mut self, region: Option<String>) -> Self {
        self.region = region;
        self
    }

    pub fn profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile;
        self
    }

    /// Bound each invocation by `timeout`
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    fn command<I>(&self, args: I) -> ProcessConfig
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut config = ProcessConfig::new(&self.aws_binary)
            .args(args)
            .timeout(self.timeout);
        if let Some(region) = &self.region {
            config = config.arg("--region").arg(region);
        }
        if let Some(profile) = &self.profile {
            config = config.arg("--profile").arg(profile);
        }
        config
    }

    fn list_command(&self, prefix: &str) -> ProcessConfig {
        self.command([
            "s3api",
            "list-objects-v2",
            "--bucket",
            self.bucket.as_str(),
            "--prefix",
            prefix,
            "--no-paginate",
            "--output",
            "json",
        ])
    }

    fn get_command(&self, key: &str) -> ProcessConfig {
        let url = format!("s3://{}/{}", self.bucket, key);
        self.command(["s3", "cp", url.as_str(), "-"])
    }

    async fn run(&self, config: ProcessConfig) -> Result<ProcessOutput> {
        let command = config.display();
        let output = self.runner.output(config).await?;

        if !output.success() {
            return Err(StorageError::Command {
                command,
                code: output.code,
                stderr: output.stderr.trim().to_string(),
            });
        }

        Ok(output)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListObjectsV2 {
    key_count: Option<usize>,
    #[serde(default)]
    contents: Vec<ObjectSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ObjectSummary {
    key: String,
}

/// Parse `list-objects-v2` JSON output
///
/// Blank output is treated as a response without a `KeyCount`.
pub fn parse_listing(stdout: &str) -> Result<ObjectListing> {
    if stdout.trim().is_empty() {
        return Ok(ObjectListing::default());
    }

    let response: ListObjectsV2 = serde_json::from_str(stdout)
        .map_err(|e| StorageError::InvalidListing(e.to_string()))?;

    Ok(ObjectListing {
        key_count: response.key_count,
        keys: response.contents.into_iter().map(|o| o.key).collect(),
    })
}

#[async_trait]
impl ObjectStore for S3CliStore {
    async fn list(&self, prefix: &str) -> Result<ObjectListing> {
        let output = self.run(self.list_command(prefix)).await?;
        let listing = parse_listing(&output.stdout_lossy())?;
        debug!(
            bucket = %self.bucket,
            prefix,
            key_count = ?listing.key_count,
            "Listed objects"
        );
        Ok(listing)
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        let output = self.run(self.get_command(key)).await?;
        debug!(bucket = %self.bucket, key, bytes = output.stdout.len(), "Fetched object");
        Ok(output.stdout)
    }
}
