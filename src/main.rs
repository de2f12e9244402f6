//! soccer_viz - main entry point
//!
//! Reads england.csv, france.csv, germany.csv and italy.csv from the data
//! directory (next to the executable unless `data.dir` is set) and writes the
//! four-page chart document to the working directory.
//!
//! Optional overrides are read from `report_config.json` in the working
//! directory; see report.json for the available properties.

use anyhow::Context;
use soccer_viz::config::{ReportConfig, OVERRIDE_FILE};
use soccer_viz::pipeline::{generate_report, print_summary};
use soccer_viz::soccer::CsvSource;
use std::path::Path;

fn main() {
    if let Err(e) = run() {
        eprintln!("\n✗ Report generation failed: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = ReportConfig::load(Path::new(OVERRIDE_FILE))
        .with_context(|| format!("failed to read {}", OVERRIDE_FILE))?;
    soccer_viz::init_tracing(&config.log_level)?;
    tracing::debug!(?config, "report configuration");

    let data_dir = config.resolve_data_dir()?;
    let source = CsvSource::new(data_dir);

    let summary = generate_report(&source, &config)?;
    print_summary(&summary, &config.team);
    Ok(())
}
