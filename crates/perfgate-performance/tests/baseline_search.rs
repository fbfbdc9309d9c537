//! Ancestry search and detection against in-memory history and results

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use perfgate_performance::{
    find_baseline, Detection, DetectorConfig, PerformanceError, RegressionDetector, ResultSet,
    ResultSource,
};
use perfgate_vcs::{ParentLookup, VcsError};

/// Commit graph held in memory; records every parent query
#[derive(Default)]
struct StubHistory {
    parents: HashMap<String, Vec<String>>,
    queried: Mutex<Vec<String>>,
}

impl StubHistory {
    fn with(mut self, commit: &str, parents: &[&str]) -> Self {
        self.parents.insert(
            commit.to_string(),
            parents.iter().map(|p| p.to_string()).collect(),
        );
        self
    }

    /// c0 <- c1 <- ... <- cN
    fn chain(len: usize) -> Self {
        let mut history = Self::default();
        for i in 1..=len {
            history = history.with(&format!("c{i}"), &[&format!("c{}", i - 1)]);
        }
        history.with("c0", &[])
    }

    fn queried(&self) -> Vec<String> {
        self.queried.lock().clone()
    }
}

#[async_trait]
impl ParentLookup for StubHistory {
    async fn parents(&self, commit: &str) -> perfgate_vcs::Result<Vec<String>> {
        self.queried.lock().push(commit.to_string());
        match self.parents.get(commit) {
            Some(parents) => Ok(parents.clone()),
            None => Err(VcsError::ToolInvocation {
                command: format!("git log --pretty=%P -n 1 {commit}"),
                code: Some(128),
                stderr: format!("fatal: bad revision '{commit}'"),
            }),
        }
    }
}

/// Result documents keyed by commit; records every lookup
#[derive(Default)]
struct StubResults {
    documents: HashMap<String, String>,
    queried: Mutex<Vec<String>>,
}

impl StubResults {
    fn with(mut self, commit: &str, document: String) -> Self {
        self.documents.insert(commit.to_string(), document);
        self
    }

    fn queried(&self) -> Vec<String> {
        self.queried.lock().clone()
    }
}

#[async_trait]
impl ResultSource for StubResults {
    async fn find_results(&self, commit: &str) -> perfgate_performance::Result<Option<ResultSet>> {
        self.queried.lock().push(commit.to_string());
        self.documents
            .get(commit)
            .map(|doc| {
                ResultSet::from_json(commit, format!("jmh-results/jmh-{commit}"), doc.as_bytes())
            })
            .transpose()
    }
}

fn avgt(benchmark: &str, low: f64, high: f64) -> String {
    format!(
        r#"[{{"benchmark": "{benchmark}", "mode": "avgt", "threads": 1, "forks": 1,
            "primaryMetric": {{"score": {score}, "scoreError": {error},
                "scoreConfidence": [{low}, {high}], "scoreUnit": "ms/op"}}}}]"#,
        score = (low + high) / 2.0,
        error = (high - low) / 2.0,
    )
}

#[tokio::test]
async fn nearest_ancestor_wins() {
    // t <- p1 <- p2, both ancestors benchmarked
    let history = StubHistory::default()
        .with("t", &["p1"])
        .with("p1", &["p2"])
        .with("p2", &[]);
    let results = StubResults::default()
        .with("p1", avgt("A.a", 1.0, 2.0))
        .with("p2", avgt("A.a", 1.0, 2.0));

    let baseline = find_baseline(&results, &history, "t", 10).await.unwrap().unwrap();
    assert_eq!(baseline.commit(), "p1");
    assert_eq!(baseline.depth, 1);
    assert_eq!(history.queried(), vec!["t"]);
}

#[tokio::test]
async fn target_itself_is_never_a_baseline() {
    let history = StubHistory::default().with("t", &[]);
    let results = StubResults::default().with("t", avgt("A.a", 1.0, 2.0));

    assert!(find_baseline(&results, &history, "t", 10).await.unwrap().is_none());
    assert!(results.queried().is_empty());
}

#[tokio::test]
async fn equal_depth_tie_goes_to_first_parent() {
    // merge m has parents [l, r]; both benchmarked
    let history = StubHistory::default()
        .with("m", &["l", "r"])
        .with("l", &["base"])
        .with("r", &["base"]);
    let results = StubResults::default()
        .with("l", avgt("A.a", 1.0, 2.0))
        .with("r", avgt("A.a", 1.0, 2.0));

    let baseline = find_baseline(&results, &history, "m", 10).await.unwrap().unwrap();
    assert_eq!(baseline.commit(), "l");
    assert_eq!(results.queried(), vec!["l"]);
}

#[tokio::test]
async fn levels_are_scanned_before_going_deeper() {
    // m -> [l, r]; l -> [l2]; r benchmarked at depth 1, l2 at depth 2
    let history = StubHistory::default()
        .with("m", &["l", "r"])
        .with("l", &["l2"])
        .with("r", &[]);
    let results = StubResults::default()
        .with("l2", avgt("A.a", 1.0, 2.0))
        .with("r", avgt("A.a", 1.0, 2.0));

    let baseline = find_baseline(&results, &history, "m", 10).await.unwrap().unwrap();
    assert_eq!(baseline.commit(), "r");
    assert_eq!(baseline.depth, 1);
    assert_eq!(results.queried(), vec!["l", "r"]);
}

#[tokio::test]
async fn shared_ancestors_are_queried_per_path() {
    // diamond: m -> [l, r] -> base; nothing benchmarked
    let history = StubHistory::default()
        .with("m", &["l", "r"])
        .with("l", &["base"])
        .with("r", &["base"])
        .with("base", &[]);
    let results = StubResults::default();

    assert!(find_baseline(&results, &history, "m", 10).await.unwrap().is_none());
    assert_eq!(results.queried(), vec!["l", "r", "base", "base"]);
}

#[tokio::test]
async fn search_stops_at_depth_cap() {
    let history = StubHistory::chain(20);
    let results = StubResults::default().with("c5", avgt("A.a", 1.0, 2.0));

    // levels 1..=10 are c19 down to c10; c9 is out of reach
    assert!(find_baseline(&results, &history, "c20", 10).await.unwrap().is_none());

    let queried = results.queried();
    assert_eq!(queried.len(), 10);
    assert_eq!(queried.first().map(String::as_str), Some("c19"));
    assert_eq!(queried.last().map(String::as_str), Some("c10"));

    // parents of the last level (c10) are never requested
    let parent_queries = history.queried();
    assert_eq!(parent_queries.len(), 10);
    assert!(!parent_queries.contains(&"c10".to_string()));
}

#[tokio::test]
async fn baseline_at_exact_depth_cap_is_found() {
    let history = StubHistory::chain(20);
    let results = StubResults::default().with("c10", avgt("A.a", 1.0, 2.0));

    let baseline = find_baseline(&results, &history, "c20", 10).await.unwrap().unwrap();
    assert_eq!(baseline.commit(), "c10");
    assert_eq!(baseline.depth, 10);
}

#[tokio::test]
async fn parent_lookup_failure_propagates() {
    let history = StubHistory::default().with("t", &["gone"]);
    let results = StubResults::default();

    let err = find_baseline(&results, &history, "t", 10).await.unwrap_err();
    assert!(matches!(err, PerformanceError::Vcs(VcsError::ToolInvocation { .. })));
}

#[tokio::test]
async fn detects_regression_against_parent() {
    let history = StubHistory::default()
        .with("abc123", &["def456"])
        .with("def456", &[]);
    let results = StubResults::default()
        .with("abc123", avgt("Foo.bar", 100.0, 110.0))
        .with("def456", avgt("Foo.bar", 80.0, 90.0));

    let detector = RegressionDetector::new(results, history);
    let detection = detector.detect("abc123").await.unwrap();

    let Detection::Compared {
        baseline,
        regressions,
        ..
    } = &detection
    else {
        panic!("expected a comparison, got {detection:?}");
    };
    assert_eq!(baseline.commit(), "def456");
    assert_eq!(regressions.len(), 1);
    assert!(regressions[0].message.contains("Foo.bar"));
    assert!(regressions[0].message.contains("90"));
    assert!(regressions[0].message.contains("100"));
    assert!(detection.has_regressions());
}

#[tokio::test]
async fn improvement_is_not_a_regression() {
    let history = StubHistory::default()
        .with("abc123", &["def456"])
        .with("def456", &[]);
    let results = StubResults::default()
        .with("abc123", avgt("Foo.bar", 80.0, 90.0))
        .with("def456", avgt("Foo.bar", 100.0, 110.0));

    let detector = RegressionDetector::new(results, history);
    assert!(detector.detect_regressions("abc123").await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_current_results_skip_ancestry() {
    let history = StubHistory::default().with("abc123", &["def456"]);
    let results = StubResults::default().with("def456", avgt("Foo.bar", 80.0, 90.0));

    let detector = RegressionDetector::new(&results, &history);
    let detection = detector.detect("abc123").await.unwrap();

    assert_eq!(detection, Detection::NoCurrentResults);
    assert!(history.queried().is_empty());
    assert_eq!(results.queried(), vec!["abc123"]);
}

#[tokio::test]
async fn no_baseline_within_depth() {
    let history = StubHistory::chain(3);
    let results = StubResults::default().with("c3", avgt("Foo.bar", 1.0, 2.0));

    let detector = RegressionDetector::new(results, history);
    let detection = detector.detect("c3").await.unwrap();

    assert!(matches!(detection, Detection::NoBaseline { .. }));
    assert!(!detection.has_regressions());
}

#[tokio::test]
async fn custom_depth_limits_search() {
    let history = StubHistory::chain(5);
    let results = StubResults::default()
        .with("c5", avgt("Foo.bar", 100.0, 110.0))
        .with("c2", avgt("Foo.bar", 80.0, 90.0));

    let shallow = RegressionDetector::with_config(
        &results,
        &history,
        DetectorConfig { max_depth: 2 },
    );
    assert!(matches!(
        shallow.detect("c5").await.unwrap(),
        Detection::NoBaseline { .. }
    ));

    let deep = RegressionDetector::with_config(&results, &history, DetectorConfig { max_depth: 3 });
    assert_eq!(deep.detect_regressions("c5").await.unwrap().len(), 1);
}

#[tokio::test]
async fn zero_depth_is_rejected() {
    let detector = RegressionDetector::with_config(
        StubResults::default(),
        StubHistory::default(),
        DetectorConfig { max_depth: 0 },
    );
    assert!(matches!(
        detector.detect("t").await,
        Err(PerformanceError::InvalidConfig(_))
    ));
}
