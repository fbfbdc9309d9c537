//! Object store capability

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Keys found under a prefix
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectListing {
    /// Count as reported by the store; `None` when the store did not report one
    pub key_count: Option<usize>,
    /// Matching keys in listing order
    pub keys: Vec<String>,
}

impl ObjectListing {
    /// Listing whose count is the number of keys
    pub fn counted(keys: Vec<String>) -> Self {
        Self {
            key_count: Some(keys.len()),
            keys,
        }
    }
}

/// Minimal list/get access to a key-value object store
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List keys starting with `prefix`
    async fn list(&self, prefix: &str) -> Result<ObjectListing>;

    /// Fetch the full body stored under `key`
    async fn get(&self, key: &str) -> Result<Vec<u8>>;
}

#[async_trait]
impl<'a, T: ObjectStore + ?Sized> ObjectStore for &'a T {
    async fn list(&self, prefix: &str) -> Result<ObjectListing> {
        (**self).list(prefix).await
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        (**self).get(key).await
    }
}

#[async_trait]
impl<T: ObjectStore + ?Sized> ObjectStore for Arc<T> {
    async fn list(&self, prefix: &str) -> Result<ObjectListing> {
        (**self).list(prefix).await
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        (**self).get(key).await
    }
}

#[async_trait]
impl<T: ObjectStore + ?Sized> ObjectStore for Box<T> {
    async fn list(&self, prefix: &str) -> Result<ObjectListing> {
        (**self).list(prefix).await
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        (**self).get(key).await
    }
}
