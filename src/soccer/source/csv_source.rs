//! League tables read from CSV files in one directory

use super::MatchSource;
use crate::soccer::data::load_match_table;
use crate::soccer::error::Result;
use crate::soccer::league::League;
use polars::prelude::DataFrame;
use std::path::PathBuf;

/// Reads `<league>.csv` files from a data directory
#[derive(Debug, Clone)]
pub struct CsvSource {
    data_dir: PathBuf,
}

impl CsvSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Path of the file for a league
    pub fn path_for(&self, league: League) -> PathBuf {
        self.data_dir.join(league.file_name())
    }
}

impl MatchSource for CsvSource {
    fn describe(&self) -> String {
        self.data_dir.display().to_string()
    }

    fn load(&self, league: League) -> Result<DataFrame> {
        let path = self.path_for(league);
        let df = load_match_table(&path, league.table_name())?;
        println!("  {}: {} matches", league, df.height());
        Ok(df)
    }
}
