//! League identifiers and the loaded league tables

use polars::prelude::DataFrame;
use std::fmt;

/// The four leagues whose match tables are loaded for a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum League {
    England,
    France,
    Germany,
    Italy,
}

impl League {
    /// All leagues, in load order
    pub const ALL: [League; 4] = [
        League::England,
        League::France,
        League::Germany,
        League::Italy,
    ];

    /// Lowercase table name, also the CSV file stem
    pub fn table_name(&self) -> &'static str {
        match self {
            League::England => "england",
            League::France => "france",
            League::Germany => "germany",
            League::Italy => "italy",
        }
    }

    /// CSV file name inside the data directory
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.table_name())
    }

    /// Display label used in chart legends
    pub fn label(&self) -> &'static str {
        match self {
            League::England => "England",
            League::France => "France",
            League::Germany => "Germany",
            League::Italy => "Italy",
        }
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Match tables for every league, read-only once loaded
///
/// Germany is loaded with the others so a missing file still aborts the run,
/// but no chart reads it.
#[derive(Debug, Clone)]
pub struct LeagueTables {
    pub england: DataFrame,
    pub france: DataFrame,
    pub germany: DataFrame,
    pub italy: DataFrame,
}

impl LeagueTables {
    /// Get the table for a league
    pub fn get(&self, league: League) -> &DataFrame {
        match league {
            League::England => &self.england,
            League::France => &self.france,
            League::Germany => &self.germany,
            League::Italy => &self.italy,
        }
    }

    /// Total number of match rows across all leagues
    pub fn total_rows(&self) -> usize {
        League::ALL.iter().map(|l| self.get(*l).height()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        assert_eq!(League::England.file_name(), "england.csv");
        assert_eq!(League::Italy.file_name(), "italy.csv");
    }

    #[test]
    fn test_all_leagues_in_load_order() {
        let names: Vec<&str> = League::ALL.iter().map(|l| l.table_name()).collect();
        assert_eq!(names, vec!["england", "france", "germany", "italy"]);
    }
}
