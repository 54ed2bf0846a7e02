use clap::Parser;

use crate::cli::TsperfRunnerCli;

/// Initialise the CLI and logging for the runner.
pub fn init() -> TsperfRunnerCli {
    env_logger::init();

    TsperfRunnerCli::parse()
}
