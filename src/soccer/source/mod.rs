//! Where match tables come from
//!
//! The report pipeline only sees a `MatchSource`, so the same code path runs
//! against the league CSV files and against generated sample data.

use super::error::Result;
use super::league::{League, LeagueTables};
use polars::prelude::DataFrame;

mod csv_source;
mod sample_source;

pub use csv_source::CsvSource;
pub use sample_source::SampleSource;

/// Provider of one match table per league
pub trait MatchSource {
    /// Short description for progress output
    fn describe(&self) -> String;

    /// Load the table for one league
    fn load(&self, league: League) -> Result<DataFrame>;

    /// Load every league, stopping at the first failure
    fn load_all(&self) -> Result<LeagueTables> {
        let england = self.load(League::England)?;
        let france = self.load(League::France)?;
        let germany = self.load(League::Germany)?;
        let italy = self.load(League::Italy)?;

        let tables = LeagueTables {
            england,
            france,
            germany,
            italy,
        };
        tracing::info!(
            source = %self.describe(),
            rows = tables.total_rows(),
            "loaded league tables"
        );
        Ok(tables)
    }
}
