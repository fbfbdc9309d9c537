//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use crate::error::{CliError, CliResult};

/// Filter used when neither `--log-level` nor `RUST_LOG` is set
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Build the log filter, preferring an explicit `--log-level` over `RUST_LOG`
pub fn env_filter(level: Option<&str>) -> CliResult<EnvFilter> {
    match level {
        Some(level) => EnvFilter::try_new(level)
            .map_err(|e| CliError::Config(format!("invalid log level '{level}': {e}"))),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))),
    }
}

/// Install the global subscriber; logs go to stderr so stdout carries only reports
pub fn init_logging(level: Option<&str>) -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level)?)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| CliError::Config(format!("failed to initialise logging: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_level() {
        let filter = env_filter(Some("debug")).unwrap();
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn test_directives() {
        assert!(env_filter(Some("warn,perfgate_performance=trace")).is_ok());
    }

    #[test]
    fn test_invalid_level() {
        assert!(matches!(
            env_filter(Some("perfgate=loud")),
            Err(CliError::Config(_))
        ));
    }
}
