//! Subcommand implementations

use perfgate_performance::{RegressionDetector, ResultSource};
use perfgate_storage::{LocalStore, ObjectStore, ResultStore, S3CliStore};
use perfgate_tasks::{EnqueueRequest, TaskQueue, TaskQueueClient};
use perfgate_vcs::{GitCli, GitRepository, ParentLookup};
use tracing::{info, warn};

use crate::{
    config::{PerfgateConfig, StoreBackend, VcsBackend},
    error::{CliError, CliResult},
    report::{render_check, render_results, OutputFormat},
};

/// Environment variable naming the commit to check or enqueue
pub const COMMIT_ENV: &str = "COMMIT_HASH";

/// Object store selected by the configuration
pub fn build_store(config: &PerfgateConfig) -> CliResult<Box<dyn ObjectStore>> {
    let settings = &config.store;
    match settings.backend {
        StoreBackend::S3 => {
            let bucket = settings
                .bucket
                .clone()
                .ok_or_else(|| CliError::Config("store.bucket is not set".to_string()))?;
            Ok(Box::new(
                S3CliStore::new(bucket)
                    .aws_binary(&settings.aws_binary)
                    .region(settings.region.clone())
                    .profile(settings.profile.clone())
                    .timeout(config.process_timeout()),
            ))
        }
        StoreBackend::Local => {
            let root = settings
                .root
                .clone()
                .ok_or_else(|| CliError::Config("store.root is not set".to_string()))?;
            Ok(Box::new(LocalStore::new(root)))
        }
    }
}

/// Result lookup over the configured store
pub fn build_results(config: &PerfgateConfig) -> CliResult<ResultStore<Box<dyn ObjectStore>>> {
    Ok(ResultStore::new(build_store(config)?).with_namespace(&config.store.namespace))
}

/// Parent lookup selected by the configuration
pub fn build_lookup(config: &PerfgateConfig) -> CliResult<Box<dyn ParentLookup>> {
    let settings = &config.vcs;
    match settings.backend {
        VcsBackend::Cli => Ok(Box::new(
            GitCli::new()
                .git_binary(&settings.git_binary)
                .repo_dir(&settings.repo)
                .timeout(config.process_timeout()),
        )),
        VcsBackend::Libgit2 => Ok(Box::new(GitRepository::discover(&settings.repo)?)),
    }
}

/// Resolve the commit argument, which may come from `COMMIT_HASH`
pub fn require_commit(commit: Option<String>) -> CliResult<String> {
    match commit {
        Some(commit) if !commit.trim().is_empty() => Ok(commit.trim().to_string()),
        _ => Err(CliError::MissingInput(format!(
            "no commit given; pass --commit or set {COMMIT_ENV}"
        ))),
    }
}

/// Run regression detection and print the report
///
/// Returns `RegressionsDetected` after printing when anything regressed.
pub async fn check(
    config: &PerfgateConfig,
    commit: &str,
    max_depth: Option<usize>,
    format: OutputFormat,
) -> CliResult<()> {
    let mut detector_config = config.detector.clone();
    if let Some(max_depth) = max_depth {
        detector_config.max_depth = max_depth;
    }
    detector_config
        .validate()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let max_depth = detector_config.max_depth;
    let detector = RegressionDetector::with_config(
        build_results(config)?,
        build_lookup(config)?,
        detector_config,
    );

    info!(%commit, max_depth, "Checking for performance regressions");
    let detection = detector.detect(commit).await?;
    print!("{}", render_check(commit, &detection, max_depth, format)?);

    let count = detection.regressions().len();
    if count > 0 {
        return Err(CliError::RegressionsDetected(count));
    }
    Ok(())
}

/// Print the result set stored for one commit
pub async fn find(config: &PerfgateConfig, commit: &str, format: OutputFormat) -> CliResult<()> {
    let results = build_results(config)?.find_results(commit).await?;
    if results.is_none() {
        warn!(%commit, "No results stored");
    }
    print!("{}", render_results(commit, results.as_ref(), format)?);
    Ok(())
}

/// Print the immediate parents of one commit
pub async fn parents(config: &PerfgateConfig, commit: &str) -> CliResult<()> {
    for parent in build_lookup(config)?.parents(commit).await? {
        println!("{parent}");
    }
    Ok(())
}

/// Schedule a benchmark run and print the created task's name
pub async fn enqueue(
    config: &PerfgateConfig,
    commit: String,
    includes: Vec<String>,
) -> CliResult<()> {
    let client = TaskQueueClient::new(config.tasks.clone())?;

    let handle = client
        .enqueue(&EnqueueRequest::new(commit).includes(includes))
        .await?;
    println!("{handle}");
    Ok(())
}

/// Print the effective configuration as TOML
pub fn show_config(config: &PerfgateConfig) -> CliResult<()> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
