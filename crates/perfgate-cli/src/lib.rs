//! perfgate command-line interface
//!
//! Wires configuration, logging and the perfgate crates into the `perfgate`
//! binary. Exit status follows [`CliError::exit_code`]: 0 when nothing
//! regressed or there was nothing to compare, 1 when regressions were found,
//! 2 for tool, storage and configuration failures.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;

pub use crate::cli::{run_cli, Cli, Commands};
pub use crate::config::{ConfigLoader, PerfgateConfig, StoreBackend, VcsBackend};
pub use error::{CliError, CliResult};
pub use report::OutputFormat;
