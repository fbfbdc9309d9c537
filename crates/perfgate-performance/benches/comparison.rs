use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use perfgate_performance::{
    compare_result_sets, find_baseline, BenchmarkResult, Mode, PrimaryMetric, ResultSet,
    ResultSource,
};
use perfgate_vcs::ParentLookup;

fn result_set(commit: &str, benchmarks: usize, shift: f64) -> ResultSet {
    let results = (0..benchmarks)
        .map(|i| {
            let low = i as f64 + shift;
            BenchmarkResult {
                benchmark: format!("benchmark.Suite.case{i}"),
                mode: Mode::AverageTime,
                threads: 1,
                forks: 2,
                jvm: None,
                jvm_args: Vec::new(),
                jdk_version: None,
                vm_name: None,
                vm_version: None,
                primary_metric: PrimaryMetric {
                    score: low + 0.5,
                    score_error: 0.5,
                    score_confidence: [low, low + 1.0],
                    score_unit: Some("ms/op".to_string()),
                },
            }
        })
        .collect();

    ResultSet {
        commit: commit.to_string(),
        key: format!("jmh-results/jmh-{commit}"),
        results,
    }
}

fn bench_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare_result_sets");

    for size in [10usize, 100, 1_000] {
        let baseline = result_set("base", size, 0.0);
        let current = result_set("head", size, 2.0);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| compare_result_sets(black_box(&current), black_box(&baseline)))
        });
    }

    group.finish();
}

/// Binary merge tree: commit `n` has parents `2n` and `2n + 1`
struct MergeTree;

#[async_trait::async_trait]
impl ParentLookup for MergeTree {
    async fn parents(&self, commit: &str) -> perfgate_vcs::Result<Vec<String>> {
        let n: u64 = commit.parse().unwrap_or(1);
        Ok(vec![(2 * n).to_string(), (2 * n + 1).to_string()])
    }
}

struct NoResults;

#[async_trait::async_trait]
impl ResultSource for NoResults {
    async fn find_results(&self, _commit: &str) -> perfgate_performance::Result<Option<ResultSet>> {
        Ok(None)
    }
}

fn bench_search(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("find_baseline_exhaustive");

    for depth in [4usize, 8, 10] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| runtime.block_on(find_baseline(&NoResults, &MergeTree, "1", depth)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compare, bench_search);
criterion_main!(benches);
