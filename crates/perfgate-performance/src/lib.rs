//! JMH performance regression detection
//!
//! This crate holds the core of perfgate:
//! - The JMH result document model ([`BenchmarkResult`], [`ResultSet`])
//! - Confidence-interval comparison between two result sets
//! - Breadth-first search over commit ancestry for the nearest baseline
//! - The [`RegressionDetector`] that ties lookup, search and comparison together
//!
//! Storage and history access are abstracted behind [`ResultSource`] and
//! [`perfgate_vcs::ParentLookup`] so the detector can run against stubs.

pub mod compare;
pub mod detector;
pub mod error;
pub mod model;
pub mod search;
pub mod source;

pub use compare::{compare_result_sets, Regression};
pub use detector::{Detection, DetectorConfig, RegressionDetector, DEFAULT_MAX_DEPTH};
pub use error::{PerformanceError, Result};
pub use model::{BenchmarkResult, Mode, PrimaryMetric, ResultSet};
pub use search::{find_baseline, Baseline};
pub use source::ResultSource;
