//! Parent lookup through libgit2

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use git2::Repository as Git2Repository;
use parking_lot::Mutex;
use tracing::debug;

use crate::{
    error::{Result, VcsError},
    lookup::ParentLookup,
};

/// Git repository opened in-process
pub struct GitRepository {
    /// The underlying git2 repository
    repo: Mutex<Git2Repository>,
    /// Path the repository was opened from
    path: PathBuf,
}

impl GitRepository {
    /// Open a Git repository at the specified path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Opening Git repository at: {}", path.display());

        let repo = Git2Repository::open(path).map_err(|e| {
            debug!("Failed to open repository: {}", e);
            VcsError::RepositoryNotFound {
                path: path.display().to_string(),
            }
        })?;

        Ok(Self {
            repo: Mutex::new(repo),
            path: path.to_path_buf(),
        })
    }

    /// Discover a Git repository starting from the given path
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Discovering Git repository from: {}", path.display());

        let repo = Git2Repository::discover(path).map_err(|e| {
            debug!("Failed to discover repository: {}", e);
            VcsError::RepositoryNotFound {
                path: path.display().to_string(),
            }
        })?;

        Ok(Self {
            repo: Mutex::new(repo),
            path: path.to_path_buf(),
        })
    }

    /// Path this repository was opened or discovered from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve `reference` and list its parents
    pub fn parent_ids(&self, reference: &str) -> Result<Vec<String>> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(VcsError::InvalidReference {
                reference: reference.to_string(),
            });
        }

        let repo = self.repo.lock();
        let commit = repo.revparse_single(reference)?.peel_to_commit()?;
        let parents = commit.parent_ids().map(|oid| oid.to_string()).collect();
        Ok(parents)
    }
}

#[async_trait]
impl ParentLookup for GitRepository {
    async fn parents(&self, commit: &str) -> Result<Vec<String>> {
        let parents = self.parent_ids(commit)?;
        debug!(commit, ?parents, "Resolved parents via libgit2");
        Ok(parents)
    }
}
