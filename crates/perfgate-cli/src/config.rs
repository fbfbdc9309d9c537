//! Layered configuration: defaults, optional TOML file, `PERFGATE_` environment

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File, FileFormat, Map};
use perfgate_performance::DetectorConfig;
use perfgate_storage::DEFAULT_NAMESPACE;
use perfgate_tasks::TaskQueueConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Config file read when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "perfgate.toml";

/// Environment variable prefix (`PERFGATE_STORE__BUCKET` sets `store.bucket`)
pub const ENV_PREFIX: &str = "PERFGATE";

/// Which object store holds result documents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    S3,
    Local,
}

/// Which implementation answers parent queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VcsBackend {
    #[default]
    Cli,
    Libgit2,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub backend: StoreBackend,
    /// S3 bucket (s3 backend)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// AWS CLI profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    pub aws_binary: String,
    /// Directory holding result documents (local backend)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    /// Key prefix; the commit id is appended to it
    pub namespace: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            bucket: None,
            region: None,
            profile: None,
            aws_binary: "aws".to_string(),
            root: None,
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VcsSettings {
    pub backend: VcsBackend,
    /// Repository the commits belong to
    pub repo: PathBuf,
    pub git_binary: String,
}

impl Default for VcsSettings {
    fn default() -> Self {
        Self {
            backend: VcsBackend::default(),
            repo: PathBuf::from("."),
            git_binary: "git".to_string(),
        }
    }
}

/// Effective perfgate configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerfgateConfig {
    /// Bound on every external command, unbounded when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_timeout_secs: Option<u64>,
    pub store: StoreSettings,
    pub vcs: VcsSettings,
    pub detector: DetectorConfig,
    pub tasks: TaskQueueConfig,
}

impl PerfgateConfig {
    pub fn process_timeout(&self) -> Option<Duration> {
        self.process_timeout_secs.map(Duration::from_secs)
    }

    pub fn validate(&self) -> CliResult<()> {
        self.detector
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;

        match self.store.backend {
            StoreBackend::S3 if is_blank(self.store.bucket.as_deref()) => {
                return Err(CliError::Config(
                    "store.bucket is required for the s3 backend".to_string(),
                ));
            }
            StoreBackend::Local if self.store.root.is_none() => {
                return Err(CliError::Config(
                    "store.root is required for the local backend".to_string(),
                ));
            }
            _ => {}
        }

        if self.store.namespace.is_empty() {
            return Err(CliError::Config(
                "store.namespace must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Loads [`PerfgateConfig`] from its sources
pub struct ConfigLoader {
    path: PathBuf,
    required: bool,
    env_prefix: String,
    env: Option<Map<String, String>>,
}

impl ConfigLoader {
    /// Read `perfgate.toml` in the working directory if it exists
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CONFIG_FILE),
            required: false,
            env_prefix: ENV_PREFIX.to_string(),
            env: None,
        }
    }

    /// Read `path`, which must exist
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: true,
            ..Self::new()
        }
    }

    /// Loader for an optional `--config` argument
    pub fn from_arg(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::with_path(path),
            None => Self::new(),
        }
    }

    /// Read variables from `vars` instead of the process environment
    pub fn with_env(mut self, vars: Map<String, String>) -> Self {
        self.env = Some(vars);
        self
    }

    pub fn load(&self) -> CliResult<PerfgateConfig> {
        let environment = Environment::with_prefix(&self.env_prefix)
            .prefix_separator("_")
            .separator("__")
            .source(self.env.clone());

        let settings = Config::builder()
            .add_source(
                File::from(self.path.as_path())
                    .format(FileFormat::Toml)
                    .required(self.required),
            )
            .add_source(environment)
            .build()?;

        let config: PerfgateConfig = settings.try_deserialize()?;
        config.validate()?;

        debug!(
            path = %self.path.display(),
            store = ?config.store.backend,
            vcs = ?config.vcs.backend,
            max_depth = config.detector.max_depth,
            "Loaded configuration"
        );
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
