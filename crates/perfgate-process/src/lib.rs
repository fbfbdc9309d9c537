//! # perfgate-process
//!
//! **Purpose**: External command execution for perfgate
//!
//! Every tool perfgate shells out to (`git`, `aws`) goes through
//! [`ProcessRunner`], which captures raw stdout and decoded stderr, applies
//! an optional timeout and reports the exit status without interpreting it.
//! Callers decide what counts as a failure.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use perfgate_process::{ProcessConfig, ProcessRunner};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let runner = ProcessRunner::new();
//! let config = ProcessConfig::new("git")
//!     .args(["log", "--pretty=%P", "-n", "1", "HEAD"])
//!     .timeout_secs(30);
//!
//! let output = runner.output(config).await?;
//! if output.success() {
//!     println!("{}", output.stdout_lossy());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod runner;

pub use config::ProcessConfig;
pub use error::{ProcessError, Result};
pub use runner::{ProcessOutput, ProcessRunner};
