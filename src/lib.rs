//! Soccer visualization library
//!
//! This library provides the core modules for the soccer_viz report.
//! It is shared by the `soccer_viz` and `sample_report` binaries.
//!
//! Module organization:
//! - `soccer`: league tables, properties, palettes and PDF output
//! - `charts`: the four chart aggregations and renderers
//! - `config`: report configuration
//! - `pipeline`: load, draw and write in one run

pub mod charts;
pub mod config;
pub mod memprof;
pub mod pipeline;
pub mod soccer;

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "SOCCER_VIZ_LOG";

/// Install the stderr diagnostics subscriber
///
/// `SOCCER_VIZ_LOG` wins over `level` when it is set and valid.
pub fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
