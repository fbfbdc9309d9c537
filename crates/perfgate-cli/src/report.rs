//! Text and JSON rendering of command results

use std::fmt::Write as _;

use clap::ValueEnum;
use perfgate_performance::{Detection, Regression, ResultSet};
use serde::Serialize;

use crate::error::CliResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    NoCurrentResults,
    NoBaseline,
    Passed,
    Regressed,
}

/// Machine-readable summary of one `check` run
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport<'a> {
    pub commit: &'a str,
    pub status: CheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<usize>,
    pub benchmarks: usize,
    pub regressions: &'a [Regression],
}

impl<'a> CheckReport<'a> {
    pub fn new(commit: &'a str, detection: &'a Detection) -> Self {
        match detection {
            Detection::NoCurrentResults => Self {
                commit,
                status: CheckStatus::NoCurrentResults,
                baseline: None,
                depth: None,
                benchmarks: 0,
                regressions: &[],
            },
            Detection::NoBaseline { current } => Self {
                commit,
                status: CheckStatus::NoBaseline,
                baseline: None,
                depth: None,
                benchmarks: current.len(),
                regressions: &[],
            },
            Detection::Compared {
                current,
                baseline,
                regressions,
            } => Self {
                commit,
                status: if regressions.is_empty() {
                    CheckStatus::Passed
                } else {
                    CheckStatus::Regressed
                },
                baseline: Some(baseline.commit()),
                depth: Some(baseline.depth),
                benchmarks: current.len(),
                regressions,
            },
        }
    }
}

pub fn render_check(
    commit: &str,
    detection: &Detection,
    max_depth: usize,
    format: OutputFormat,
) -> CliResult<String> {
    let report = CheckReport::new(commit, detection);
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(&report)?);
    }

    let mut out = String::new();
    match report.status {
        CheckStatus::NoCurrentResults => {
            let _ = writeln!(out, "No results stored for {commit}; nothing to compare");
        }
        CheckStatus::NoBaseline => {
            let _ = writeln!(
                out,
                "No benchmarked ancestor of {commit} within {max_depth} levels; nothing to compare"
            );
        }
        CheckStatus::Passed | CheckStatus::Regressed => {
            let _ = writeln!(
                out,
                "Compared {} benchmark(s) of {commit} against {} (depth {})",
                report.benchmarks,
                report.baseline.unwrap_or_default(),
                report.depth.unwrap_or_default(),
            );
            for regression in report.regressions {
                let _ = writeln!(out, "  REGRESSION {regression}");
            }
            if report.regressions.is_empty() {
                let _ = writeln!(out, "No regressions");
            } else {
                let _ = writeln!(out, "{} regression(s)", report.regressions.len());
            }
        }
    }
    Ok(out)
}

pub fn render_results(
    commit: &str,
    results: Option<&ResultSet>,
    format: OutputFormat,
) -> CliResult<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(&results)?);
    }

    let Some(set) = results else {
        return Ok(format!("No results stored for {commit}\n"));
    };

    let mut out = String::new();
    let _ = writeln!(out, "{} ({} benchmark(s))", set.key, set.len());
    for result in &set.results {
        let metric = &result.primary_metric;
        let _ = writeln!(
            out,
            "  {} [{}] {} ± {} {} ({}, {})",
            result.benchmark,
            result.mode,
            metric.score,
            metric.score_error,
            metric.score_unit.as_deref().unwrap_or(""),
            metric.low(),
            metric.high(),
        );
    }
    Ok(out)
}
