//! FILENAME: app/dashboard/src/lib.rs
// PURPOSE: Dashboard shell: loads the dataset once, then answers one request
// (filter selections + requested outputs) as JSON on stdout.

pub mod config;
pub mod report;

use anyhow::Context;
use chart_engine::Dashboard;
use config::Cli;

pub use report::{build_report, to_json, Report};

/// Loads the dataset named by the configuration. A load failure is fatal.
pub fn load_dashboard(cli: &Cli) -> anyhow::Result<Dashboard> {
    let table = persistence::load_dataset(&cli.data)
        .with_context(|| format!("failed to load dataset from {}", cli.data.display()))?;
    Ok(Dashboard::new(table))
}

pub fn run(cli: &Cli) -> anyhow::Result<()> {
    log::info!("Starting dashboard, data={}", cli.data.display());

    let dashboard = load_dashboard(cli)?;
    let report = build_report(&dashboard, cli)?;

    println!("{}", to_json(&report, cli.pretty)?);
    Ok(())
}
