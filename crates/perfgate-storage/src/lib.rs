//! Object storage access for perfgate
//!
//! Result documents live in a key-value object store. [`ObjectStore`] is the
//! list/get capability with three implementations:
//! - [`S3CliStore`]: an S3 bucket, driven through the AWS command-line tool
//! - [`LocalStore`]: a directory tree, keys are relative paths
//! - [`MemoryStore`]: an in-process map for tests and dry runs
//!
//! [`ResultStore`] layers the per-commit lookup on top and implements
//! [`perfgate_performance::ResultSource`].

pub mod error;
pub mod local;
pub mod memory;
pub mod results;
pub mod s3;
pub mod store;

pub use error::{Result, StorageError};
pub use local::LocalStore;
pub use memory::MemoryStore;
pub use results::{ResultStore, DEFAULT_NAMESPACE};
pub use s3::S3CliStore;
pub use store::{ObjectListing, ObjectStore};
