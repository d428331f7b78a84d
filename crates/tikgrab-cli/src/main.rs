use clap::Parser;
use tikgrab_core::logging;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging before anything else; fall back to stderr if the state dir is unusable.
    if cli.log_stderr {
        logging::init_logging_stderr();
    } else if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable ({:#}); logging to stderr", err);
    }

    if let Err(err) = cli.run().await {
        eprintln!("tikgrab error: {:#}", err);
        std::process::exit(1);
    }
}
