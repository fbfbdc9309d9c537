//! In-process object store

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::{
    error::{Result, StorageError},
    store::{ObjectListing, ObjectStore},
};

/// Insertion-ordered in-memory store, used for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RwLock<Vec<(String, Vec<u8>)>>,
    // Some(None) makes listings report no count at all
    reported_count: RwLock<Option<Option<usize>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `body` under `key`, replacing any previous body in place
    pub fn insert(&self, key: impl Into<String>, body: impl Into<Vec<u8>>) {
        let key = key.into();
        let body = body.into();
        let mut objects = self.objects.write();
        match objects.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = body,
            None => objects.push((key, body)),
        }
    }

    /// Builder form of [`MemoryStore::insert`]
    pub fn with_object(self, key: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.insert(key, body);
        self
    }

    /// Report `count` from every listing instead of the real match count
    pub fn override_count(&self, count: Option<usize>) {
        *self.reported_count.write() = Some(count);
    }

    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn list(&self, prefix: &str) -> Result<ObjectListing> {
        let keys: Vec<String> = self
            .objects
            .read()
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect();

        Ok(match *self.reported_count.read() {
            Some(key_count) => ObjectListing { key_count, keys },
            None => ObjectListing::counted(keys),
        })
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        self.objects
            .read()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, body)| body.clone())
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }
}
