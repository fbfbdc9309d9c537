//! Parent lookup capability

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

/// Immediate-parent query over commit history
///
/// Implementations return parents in the order the history store records
/// them: empty for a root commit, two or more for a merge. Identifiers are
/// trimmed of surrounding whitespace. Failures are returned as-is; nothing
/// here retries.
#[async_trait]
pub trait ParentLookup: Send + Sync {
    /// Get the immediate parents of `commit`
    async fn parents(&self, commit: &str) -> Result<Vec<String>>;
}

#[async_trait]
impl<'a, T: ParentLookup + ?Sized> ParentLookup for &'a T {
    async fn parents(&self, commit: &str) -> Result<Vec<String>> {
        (**self).parents(commit).await
    }
}

#[async_trait]
impl<T: ParentLookup + ?Sized> ParentLookup for Arc<T> {
    async fn parents(&self, commit: &str) -> Result<Vec<String>> {
        (**self).parents(commit).await
    }
}

#[async_trait]
impl<T: ParentLookup + ?Sized> ParentLookup for Box<T> {
    async fn parents(&self, commit: &str) -> Result<Vec<String>> {
        (**self).parents(commit).await
    }
}
