// perfgate entry point

use std::process;

use clap::Parser;
use perfgate_cli::{logging, run_cli, Cli};
use tracing::warn;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.log_level.as_deref()) {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }

    if let Err(e) = run_cli(cli).await {
        if e.is_failure() {
            eprintln!("Error: {}", e);
        } else {
            warn!("{}", e);
        }
        process::exit(e.exit_code());
    }
}
