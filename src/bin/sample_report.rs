//! Development binary: render the report from generated data
//!
//! Usage:
//!   sample_report            # writes soccer_viz_sample.pdf
//!   sample_report <dir>      # also writes the generated league CSVs to <dir>
//!
//! The CSVs can be fed to the main binary by setting `data.dir` to `<dir>` in
//! report_config.json.

use anyhow::Context;
use soccer_viz::config::{ReportConfig, OVERRIDE_FILE};
use soccer_viz::pipeline::{generate_report, print_summary};
use soccer_viz::soccer::{MatchSource, SampleSource};
use std::path::{Path, PathBuf};

const SAMPLE_OUTPUT: &str = "soccer_viz_sample.pdf";

fn main() {
    println!("=== soccer_viz sample report ===\n");

    if let Err(e) = run() {
        eprintln!("\n✗ Report generation failed: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = ReportConfig {
        output_file: PathBuf::from(SAMPLE_OUTPUT),
        ..ReportConfig::load(Path::new(OVERRIDE_FILE))
            .with_context(|| format!("failed to read {}", OVERRIDE_FILE))?
    };
    soccer_viz::init_tracing(&config.log_level)?;

    let source = SampleSource::default();
    println!("Source: {}", source.describe());

    if let Some(dir) = std::env::args().nth(1).map(PathBuf::from) {
        source
            .write_csv(&dir)
            .with_context(|| format!("failed to write sample tables to {}", dir.display()))?;
        println!("Wrote sample league tables to {}\n", dir.display());
    }

    let summary = generate_report(&source, &config)?;
    print_summary(&summary, &config.team);
    println!("  ({} generated matches)", summary.matches);
    Ok(())
}
