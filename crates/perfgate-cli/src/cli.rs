//! Command-line interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{
    commands,
    config::ConfigLoader,
    error::CliResult,
    report::OutputFormat,
};

#[derive(Parser, Debug)]
#[command(name = "perfgate", version)]
#[command(about = "Detect JMH performance regressions against the nearest benchmarked ancestor")]
pub struct Cli {
    /// Configuration file (TOML); defaults to ./perfgate.toml when present
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log filter such as `debug` or `warn,perfgate_performance=trace`; overrides RUST_LOG
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare a commit's results against its nearest benchmarked ancestor
    Check {
        /// Commit to check
        #[arg(long, env = "COMMIT_HASH")]
        commit: Option<String>,

        /// Ancestry levels to search (overrides detector.max_depth)
        #[arg(long)]
        max_depth: Option<usize>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show the result set stored for a commit
    Find {
        commit: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show the immediate parents of a commit
    Parents { commit: String },

    /// Schedule a benchmark run for a commit
    Enqueue {
        /// Commit to benchmark
        #[arg(long, env = "COMMIT_HASH")]
        commit: Option<String>,

        /// Benchmark include pattern, repeatable
        #[arg(long = "include", value_name = "PATTERN")]
        includes: Vec<String>,
    },

    /// Print the effective configuration
    Config,
}

pub async fn run_cli(cli: Cli) -> CliResult<()> {
    let loader = ConfigLoader::from_arg(cli.config.as_deref());

    match cli.command {
        Commands::Check {
            commit,
            max_depth,
            format,
        } => {
            let commit = commands::require_commit(commit)?;
            commands::check(&loader.load()?, &commit, max_depth, format).await
        }

        Commands::Find { commit, format } => {
            commands::find(&loader.load()?, &commit, format).await
        }

        Commands::Parents { commit } => commands::parents(&loader.load()?, &commit).await,

        Commands::Enqueue { commit, includes } => {
            let commit = commands::require_commit(commit)?;
            commands::enqueue(&loader.load()?, commit, includes).await
        }

        Commands::Config => commands::show_config(&loader.load()?),
    }
}
