//! FILENAME: app/dashboard/src/main.rs
// PURPOSE: Command-line entry point. Logging verbosity comes from RUST_LOG.

use clap::Parser;
use dashboard_lib::config::Cli;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    dashboard_lib::run(&cli)
}
