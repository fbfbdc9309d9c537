//! Result lookup over an object store

use async_trait::async_trait;
use perfgate_performance::{PerformanceError, ResultSet, ResultSource};
use tracing::{debug, info};

use crate::{
    error::StorageError,
    store::ObjectStore,
};

/// Key prefix under which JMH result documents are stored
pub const DEFAULT_NAMESPACE: &str = "jmh-results/jmh-";

/// Finds the single result document stored for a commit
///
/// Each lookup issues one listing under `namespace + commit` and at most one
/// fetch. Nothing is cached.
#[derive(Debug, Clone)]
pub struct ResultStore<S> {
    store: S,
    namespace: String,
}

impl<S: ObjectStore> ResultStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Storage-key prefix for `commit`
    pub fn prefix(&self, commit: &str) -> String {
        format!("{}{}", self.namespace, commit)
    }
}

#[async_trait]
impl<S: ObjectStore> ResultSource for ResultStore<S> {
    async fn find_results(&self, commit: &str) -> perfgate_performance::Result<Option<ResultSet>> {
        let prefix = self.prefix(commit);
        let listing = self
            .store
            .list(&prefix)
            .await
            .map_err(PerformanceError::storage)?;

        match listing.key_count {
            Some(0) => {
                debug!(commit, %prefix, "No results stored");
                Ok(None)
            }
            Some(1) => {
                let key = listing.keys.into_iter().next().ok_or_else(|| {
                    PerformanceError::storage(StorageError::InvalidListing(format!(
                        "listing under {prefix} reported one key but returned none"
                    )))
                })?;
                let body = self
                    .store
                    .get(&key)
                    .await
                    .map_err(PerformanceError::storage)?;
                let results = ResultSet::from_json(commit, key, &body)?;
                info!(commit, key = %results.key, benchmarks = results.len(), "Loaded results");
                Ok(Some(results))
            }
            count => Err(PerformanceError::AmbiguousResult {
                commit: commit.to_string(),
                prefix,
                count,
            }),
        }
    }
}
