//! perfgate VCS integration
//!
//! Answers one question about version-control history: what are the
//! immediate parents of a commit? The [`ParentLookup`] trait is the seam the
//! regression detector depends on; two implementations are provided:
//!
//! - [`GitCli`] shells out to `git log --pretty=%P -n 1 --end-of-options <commit>`
//! - [`GitRepository`] reads the object database directly through libgit2
//!
//! # Examples
//!
//! ```ignore
//! use perfgate_vcs::{GitCli, ParentLookup};
//!
//! let git = GitCli::new().repo_dir(".");
//! let parents = git.parents("HEAD").await?;
//! println!("HEAD has {} parent(s)", parents.len());
//! ```

pub mod cli;
pub mod error;
pub mod git;
pub mod lookup;

pub use cli::GitCli;
pub use error::{Result, VcsError};
pub use git::GitRepository;
pub use lookup::ParentLookup;
