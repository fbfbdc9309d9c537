//! Confidence-interval comparison between two result sets

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    error::{PerformanceError, Result},
    model::{BenchmarkResult, Mode, ResultSet},
};

/// A benchmark whose current interval lies entirely above its baseline interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Regression {
    /// Fully-qualified benchmark name
    pub benchmark: String,
    /// Upper confidence bound measured on the baseline commit
    pub baseline_high: f64,
    /// Lower confidence bound measured on the current commit
    pub current_low: f64,
    /// Human-readable description
    pub message: String,
}

impl Regression {
    fn new(benchmark: &str, baseline_high: f64, current_low: f64) -> Self {
        let message = format!(
            "{benchmark} regressed: baseline upper bound {baseline_high} < current lower bound {current_low}"
        );
        Self {
            benchmark: benchmark.to_string(),
            baseline_high,
            current_low,
            message,
        }
    }
}

impl fmt::Display for Regression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Compare every benchmark of `current` against `baseline`
///
/// Both sets are indexed by benchmark name with the last occurrence winning.
/// Benchmarks missing from the baseline are skipped. The comparison rule is
/// chosen by the baseline's mode; modes without a rule fail the whole
/// comparison.
pub fn compare_result_sets(current: &ResultSet, baseline: &ResultSet) -> Result<Vec<Regression>> {
    let current_index = index_by_name(current);
    let baseline_index = index_by_name(baseline);

    let mut regressions = Vec::new();
    let mut seen = HashSet::new();

    for name in current.results.iter().map(|r| r.benchmark.as_str()) {
        if !seen.insert(name) {
            continue;
        }

        let Some(previous) = baseline_index.get(name) else {
            trace!(benchmark = name, "No baseline measurement, skipping");
            continue;
        };

        if let Some(regression) = compare_benchmark(current_index[name], previous)? {
            debug!(benchmark = name, "Regression detected");
            regressions.push(regression);
        }
    }

    Ok(regressions)
}

fn index_by_name(set: &ResultSet) -> HashMap<&str, &BenchmarkResult> {
    set.results
        .iter()
        .map(|result| (result.benchmark.as_str(), result))
        .collect()
}

fn compare_benchmark(
    current: &BenchmarkResult,
    baseline: &BenchmarkResult,
) -> Result<Option<Regression>> {
    match &baseline.mode {
        Mode::AverageTime => {
            let baseline_high = baseline.primary_metric.high();
            let current_low = current.primary_metric.low();

            // lower is faster; only a gap in the slower direction counts
            if baseline_high < current_low {
                Ok(Some(Regression::new(
                    &current.benchmark,
                    baseline_high,
                    current_low,
                )))
            } else {
                Ok(None)
            }
        }
        // modes without a defined rule are rejected
        mode => Err(PerformanceError::UnsupportedMode {
            benchmark: baseline.benchmark.clone(),
            mode: mode.clone(),
        }),
    }
}
