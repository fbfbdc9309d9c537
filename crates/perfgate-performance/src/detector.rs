//! Regression detection for one target commit

use perfgate_vcs::ParentLookup;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    compare::{compare_result_sets, Regression},
    error::{PerformanceError, Result},
    model::ResultSet,
    search::{find_baseline, Baseline},
    source::ResultSource,
};

/// Default number of ancestry levels searched for a baseline
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Regression detection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Ancestry levels to search before giving up on a baseline
    pub max_depth: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DetectorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(PerformanceError::InvalidConfig(
                "max_depth must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Outcome of one detector run
#[derive(Debug, Clone, PartialEq)]
pub enum Detection {
    /// The target commit has no stored results
    NoCurrentResults,
    /// No ancestor within the search depth has stored results
    NoBaseline { current: ResultSet },
    /// Both result sets were found and compared
    Compared {
        current: ResultSet,
        baseline: Baseline,
        regressions: Vec<Regression>,
    },
}

impl Detection {
    /// Regressions found, empty unless a comparison happened
    pub fn regressions(&self) -> &[Regression] {
        match self {
            Detection::Compared { regressions, .. } => regressions,
            _ => &[],
        }
    }

    /// Whether this outcome should fail the pipeline step
    pub fn has_regressions(&self) -> bool {
        !self.regressions().is_empty()
    }

    pub fn into_regressions(self) -> Vec<Regression> {
        match self {
            Detection::Compared { regressions, .. } => regressions,
            _ => Vec::new(),
        }
    }
}

/// Locates a target's results, finds its baseline and compares the two
pub struct RegressionDetector<S, L> {
    source: S,
    lookup: L,
    config: DetectorConfig,
}

impl<S, L> RegressionDetector<S, L>
where
    S: ResultSource,
    L: ParentLookup,
{
    /// Create a new detector with the default configuration
    pub fn new(source: S, lookup: L) -> Self {
        Self::with_config(source, lookup, DetectorConfig::default())
    }

    /// Create a new detector
    pub fn with_config(source: S, lookup: L, config: DetectorConfig) -> Self {
        Self {
            source,
            lookup,
            config,
        }
    }

    /// Get configuration
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Run detection for `target`
    pub async fn detect(&self, target: &str) -> Result<Detection> {
        self.config.validate()?;

        let Some(current) = self.source.find_results(target).await? else {
            warn!(commit = %target, "No results stored for commit, nothing to compare");
            return Ok(Detection::NoCurrentResults);
        };

        info!(
            commit = %target,
            key = %current.key,
            benchmarks = current.len(),
            "Loaded current results"
        );

        let Some(baseline) =
            find_baseline(&self.source, &self.lookup, target, self.config.max_depth).await?
        else {
            warn!(
                commit = %target,
                max_depth = self.config.max_depth,
                "No baseline found within search depth"
            );
            return Ok(Detection::NoBaseline { current });
        };

        info!(
            commit = %target,
            baseline = %baseline.commit(),
            depth = baseline.depth,
            "Comparing against baseline"
        );

        let regressions = compare_result_sets(&current, &baseline.results)?;
        for regression in &regressions {
            warn!(benchmark = %regression.benchmark, "{}", regression.message);
        }

        Ok(Detection::Compared {
            current,
            baseline,
            regressions,
        })
    }

    /// Run detection and return only the regressions
    ///
    /// An empty vector covers every success path: no regressions, no current
    /// results, and no baseline.
    pub async fn detect_regressions(&self, target: &str) -> Result<Vec<Regression>> {
        Ok(self.detect(target).await?.into_regressions())
    }
}
