//! JMH result document model

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PerformanceError, Result};

/// JMH measurement mode
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Mode {
    /// `avgt`: average time per operation, lower is better
    AverageTime,
    /// `thrpt`: operations per unit of time, higher is better
    Throughput,
    /// `sample`: sampled time per operation
    SampleTime,
    /// `ss`: single invocation time
    SingleShotTime,
    /// Any mode string JMH may add later
    Other(String),
}

impl Mode {
    /// The short name JMH writes into result documents
    pub fn as_str(&self) -> &str {
        match self {
            Mode::AverageTime => "avgt",
            Mode::Throughput => "thrpt",
            Mode::SampleTime => "sample",
            Mode::SingleShotTime => "ss",
            Mode::Other(other) => other,
        }
    }
}

impl From<String> for Mode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "avgt" => Mode::AverageTime,
            "thrpt" => Mode::Throughput,
            "sample" => Mode::SampleTime,
            "ss" => Mode::SingleShotTime,
            _ => Mode::Other(value),
        }
    }
}

impl From<&str> for Mode {
    fn from(value: &str) -> Self {
        Mode::from(value.to_string())
    }
}

impl From<Mode> for String {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primary score of one benchmark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryMetric {
    /// Point estimate
    #[serde(deserialize_with = "lenient::number")]
    pub score: f64,
    /// Estimated error
    #[serde(deserialize_with = "lenient::number")]
    pub score_error: f64,
    /// Confidence interval as `[low, high]`
    #[serde(deserialize_with = "lenient::pair")]
    pub score_confidence: [f64; 2],
    /// Unit of the score, e.g. `ms/op`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_unit: Option<String>,
}

impl PrimaryMetric {
    /// Lower confidence bound
    pub fn low(&self) -> f64 {
        self.score_confidence[0]
    }

    /// Upper confidence bound
    pub fn high(&self) -> f64 {
        self.score_confidence[1]
    }
}

/// One measured benchmark as written by JMH's JSON result format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkResult {
    /// Fully-qualified benchmark method name
    pub benchmark: String,
    pub mode: Mode,
    #[serde(default)]
    pub threads: u32,
    #[serde(default)]
    pub forks: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jvm: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub jvm_args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jdk_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vm_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vm_version: Option<String>,
    pub primary_metric: PrimaryMetric,
}

/// All benchmark results stored for one commit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    /// Commit the results were recorded for
    pub commit: String,
    /// Storage key the document was loaded from
    pub key: String,
    /// Results in document order
    pub results: Vec<BenchmarkResult>,
}

impl ResultSet {
    /// Parse a JMH JSON result document
    pub fn from_json(
        commit: impl Into<String>,
        key: impl Into<String>,
        document: &[u8],
    ) -> Result<Self> {
        let key = key.into();
        let results = serde_json::from_slice(document).map_err(|source| {
            PerformanceError::Parse {
                key: key.clone(),
                source,
            }
        })?;

        Ok(Self {
            commit: commit.into(),
            key,
            results,
        })
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// JMH writes statistics it could not compute as the string `"NaN"`
mod lenient {
    use serde::{de::Error, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    impl Raw {
        fn into_f64<E: Error>(self) -> Result<f64, E> {
            match self {
                Raw::Number(value) => Ok(value),
                Raw::Text(text) => text
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| E::custom(format!("expected a number, got \"{text}\""))),
            }
        }
    }

    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Raw::deserialize(deserializer)?.into_f64()
    }

    pub fn pair<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[f64; 2], D::Error> {
        let [low, high] = <[Raw; 2]>::deserialize(deserializer)?;
        Ok([low.into_f64()?, high.into_f64()?])
    }
}
