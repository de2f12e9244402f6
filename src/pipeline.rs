//! Shared report generation pipeline
//!
//! This module contains the report logic shared between the production binary
//! (main.rs) and the sample binary (bin/sample_report.rs).
//!
//! The pipeline:
//! 1. Loads every league table from a `MatchSource`
//! 2. Aggregates and draws the four charts in fixed order
//! 3. Writes the document once all pages are drawn
//!
//! Any failure aborts the run before the output file is created.

use crate::charts::{goal_difference, goal_distribution, head_to_head, scoring_trend};
use crate::config::ReportConfig;
use crate::memprof;
use crate::soccer::error::Result;
use crate::soccer::pages::DocumentWriter;
use crate::soccer::source::MatchSource;
use std::path::PathBuf;
use std::time::Instant;

/// Title stored in the PDF metadata
pub const DOCUMENT_TITLE: &str = "Soccer Data Visualizations";

/// Short descriptions of the pages, in document order
pub const PAGE_SUMMARIES: [&str; 4] = [
    "Q2: Total goals distribution bar chart",
    "Q7: Arsenal comparison bar charts (home & away wins)",
    "Q9: England vs Italy average goals line chart",
    "Q10: Goal difference distribution bar chart",
];

/// What a finished run produced
#[derive(Debug, Clone)]
pub struct ReportSummary {
    pub output: PathBuf,
    pub pages: usize,
    pub matches: usize,
}

/// Generate the report from any match source
pub fn generate_report<S: MatchSource>(source: &S, config: &ReportConfig) -> Result<ReportSummary> {
    let m0 = memprof::checkpoint("generate_report START");
    let t0 = Instant::now();

    println!("Loading data...");
    let tables = source.load_all()?;
    let matches = tables.total_rows();
    let m1 = memprof::delta("After load", m0);
    let t1 = memprof::time_delta("After load", t0, t0);

    println!(
        "Creating visualizations in {}...",
        config.output_file.display()
    );
    let mut writer = DocumentWriter::new(DOCUMENT_TITLE);

    println!("Creating Q2 visualization...");
    let distribution = goal_distribution::aggregate(&tables.england, config.distribution_since)?;
    tracing::debug!(bars = distribution.rows.len(), "goal distribution");
    goal_distribution::render(&distribution, config.colors.distribution, &mut writer)?;
    let t2 = memprof::time_delta("After Q2", t0, t1);

    println!("Creating Q7 visualization...");
    let head_to_head = head_to_head::aggregate(
        &tables.england,
        &config.team,
        config.top_tier,
        config.head_to_head_since,
    )?;
    tracing::debug!(team = %config.team, opponents = head_to_head.rows.len(), "head to head");
    head_to_head::render(&head_to_head, &config.colors, &mut writer)?;
    let t3 = memprof::time_delta("After Q7", t0, t2);

    println!("Creating Q9 visualization...");
    let trend = scoring_trend::aggregate(&tables.england, &tables.italy, config.trend_since)?;
    tracing::debug!(seasons = trend.rows.len(), "scoring trend");
    scoring_trend::render(&trend, &config.colors, &mut writer)?;
    let t4 = memprof::time_delta("After Q9", t0, t3);

    println!("Creating Q10 visualization...");
    let share = goal_difference::aggregate(&tables.france, &tables.england, config.top_tier)?;
    tracing::debug!(differences = share.rows.len(), "goal difference share");
    goal_difference::render(&share, &config.colors, &mut writer)?;
    memprof::time_delta("After Q10", t0, t4);

    let pages = writer.finish(&config.output_file)?;
    memprof::delta("generate_report END", m1);

    Ok(ReportSummary {
        output: config.output_file.clone(),
        pages,
        matches,
    })
}

/// Print the closing summary of a successful run
pub fn print_summary(summary: &ReportSummary, team: &str) {
    println!(
        "\nAll visualizations saved to {}",
        summary.output.display()
    );
    println!("\nGenerated visualizations:");
    for line in PAGE_SUMMARIES {
        println!("  - {}", line.replace("Arsenal", team));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soccer::source::SampleSource;

    #[test]
    fn test_sample_report_has_four_pages() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReportConfig {
            output_file: dir.path().join("sample.pdf"),
            ..ReportConfig::default()
        };

        let summary = generate_report(&SampleSource::new(11, 1975, 1990), &config).unwrap();
        assert_eq!(summary.pages, 4);
        assert!(summary.matches > 0);

        let bytes = std::fs::read(&summary.output).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_failure_writes_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReportConfig {
            output_file: dir.path().join("sample.pdf"),
            team: "Nobody FC".to_string(),
            ..ReportConfig::default()
        };

        assert!(generate_report(&SampleSource::new(11, 1975, 1990), &config).is_err());
        assert!(!config.output_file.exists());
    }
}
