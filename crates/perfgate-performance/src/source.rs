//! Result lookup capability

use std::sync::Arc;

use async_trait::async_trait;

use crate::{error::Result, model::ResultSet};

/// Finds the stored result set for a commit
///
/// `Ok(None)` means the commit was never benchmarked. That is the common
/// case and not an error.
#[async_trait]
pub trait ResultSource: Send + Sync {
    /// Find the results recorded for `commit`
    async fn find_results(&self, commit: &str) -> Result<Option<ResultSet>>;
}

#[async_trait]
impl<'a, T: ResultSource + ?Sized> ResultSource for &'a T {
    async fn find_results(&self, commit: &str) -> Result<Option<ResultSet>> {
        (**self).find_results(commit).await
    }
}

#[async_trait]
impl<T: ResultSource + ?Sized> ResultSource for Arc<T> {
    async fn find_results(&self, commit: &str) -> Result<Option<ResultSet>> {
        (**self).find_results(commit).await
    }
}

#[async_trait]
impl<T: ResultSource + ?Sized> ResultSource for Box<T> {
    async fn find_results(&self, commit: &str) -> Result<Option<ResultSet>> {
        (**self).find_results(commit).await
    }
}
