//! Generated league tables for demos and tests
//!
//! Every season is a double round robin per tier. Scores are drawn from a
//! Poisson distribution whose means depend on the league, with Italy scoring
//! noticeably less before 1995. The generated tables carry the same optional
//! columns as the real files: England has `totgoal` and `goaldif`, France only
//! `goaldif`, Germany and Italy neither.

use super::MatchSource;
use crate::soccer::data::{matches_to_dataframe, write_matches_csv, MatchRow};
use crate::soccer::error::{ReportError, Result};
use crate::soccer::league::League;
use polars::prelude::DataFrame;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Poisson};
use std::path::Path;

const ENGLAND_TIER_1: [&str; 8] = [
    "Arsenal",
    "Liverpool",
    "Manchester United",
    "Everton",
    "Tottenham Hotspur",
    "Aston Villa",
    "Chelsea",
    "Newcastle United",
];
const ENGLAND_TIER_2: [&str; 4] = ["Leeds United", "Sunderland", "Derby County", "Ipswich Town"];
const FRANCE_TIER_1: [&str; 6] = ["Marseille", "Paris SG", "Lyon", "Monaco", "Nantes", "Bordeaux"];
const GERMANY_TIER_1: [&str; 6] = [
    "Bayern Munich",
    "Borussia Dortmund",
    "Schalke 04",
    "Hamburger SV",
    "Werder Bremen",
    "VfB Stuttgart",
];
const ITALY_TIER_1: [&str; 6] = ["Juventus", "Inter", "AC Milan", "Roma", "Napoli", "Lazio"];

/// Which optional columns a league table carries
#[derive(Debug, Clone, Copy)]
struct Columns {
    total_goals: bool,
    goal_difference: bool,
}

/// Deterministic synthetic match data
#[derive(Debug, Clone)]
pub struct SampleSource {
    seed: u64,
    first_season: i64,
    last_season: i64,
}

impl Default for SampleSource {
    fn default() -> Self {
        Self::new(42, 1965, 2015)
    }
}

impl SampleSource {
    pub fn new(seed: u64, first_season: i64, last_season: i64) -> Self {
        Self {
            seed,
            first_season,
            last_season,
        }
    }

    /// All rows for one league
    pub fn rows(&self, league: League) -> Result<Vec<MatchRow>> {
        // Per-league stream so leagues stay stable when others change
        let mut rng = StdRng::seed_from_u64(self.seed ^ ((league as u64 + 1) << 32));
        let mut rows = Vec::new();

        for season in self.first_season..=self.last_season {
            let (home_mean, away_mean) = scoring_means(league, season);
            let home_goals = goal_distribution(home_mean)?;
            let away_goals = goal_distribution(away_mean)?;
            for (tier, teams) in tiers(league) {
                for home in teams {
                    for visitor in teams {
                        if home == visitor {
                            continue;
                        }
                        let hgoal = home_goals.sample(&mut rng) as i64;
                        let vgoal = away_goals.sample(&mut rng) as i64;
                        rows.push(MatchRow::new(season, tier, home, visitor, hgoal, vgoal));
                    }
                }
            }
        }
        Ok(rows)
    }

    /// Write one CSV per league into `dir`
    pub fn write_csv(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;
        for league in League::ALL {
            let columns = columns(league);
            let path = dir.join(league.file_name());
            write_matches_csv(
                &self.rows(league)?,
                &path,
                columns.total_goals,
                columns.goal_difference,
            )?;
            tracing::debug!(path = %path.display(), "wrote sample table");
        }
        Ok(())
    }
}

impl MatchSource for SampleSource {
    fn describe(&self) -> String {
        format!(
            "sample data (seed {}, seasons {}-{})",
            self.seed, self.first_season, self.last_season
        )
    }

    fn load(&self, league: League) -> Result<DataFrame> {
        let columns = columns(league);
        let rows = self.rows(league)?;
        println!("  {}: {} matches", league, rows.len());
        matches_to_dataframe(&rows, columns.total_goals, columns.goal_difference)
    }
}

fn tiers(league: League) -> Vec<(i64, &'static [&'static str])> {
    match league {
        League::England => vec![(1, &ENGLAND_TIER_1[..]), (2, &ENGLAND_TIER_2[..])],
        League::France => vec![(1, &FRANCE_TIER_1[..])],
        League::Germany => vec![(1, &GERMANY_TIER_1[..])],
        League::Italy => vec![(1, &ITALY_TIER_1[..])],
    }
}

fn columns(league: League) -> Columns {
    match league {
        League::England => Columns {
            total_goals: true,
            goal_difference: true,
        },
        League::France => Columns {
            total_goals: false,
            goal_difference: true,
        },
        League::Germany | League::Italy => Columns {
            total_goals: false,
            goal_difference: false,
        },
    }
}

/// Mean home and away goals for a league season
fn scoring_means(league: League, season: i64) -> (f64, f64) {
    match league {
        League::England => (1.6, 1.1),
        League::France => (1.5, 1.0),
        League::Germany => (1.8, 1.2),
        League::Italy if season < 1995 => (1.2, 0.7),
        League::Italy => (1.5, 1.1),
    }
}

fn goal_distribution(mean: f64) -> Result<Poisson<f64>> {
    Poisson::new(mean)
        .map_err(|e| ReportError::Config(format!("invalid scoring mean {}: {}", mean, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soccer::data::{has_column, GOAL_DIFFERENCE, TOTAL_GOALS};
    use crate::soccer::source::CsvSource;

    #[test]
    fn test_rows_are_deterministic() {
        let source = SampleSource::new(7, 1980, 1982);
        assert_eq!(source.rows(League::England).unwrap(), source.rows(League::England).unwrap());
        assert_ne!(
            source.rows(League::England).unwrap(),
            SampleSource::new(8, 1980, 1982).rows(League::England).unwrap()
        );
    }

    #[test]
    fn test_double_round_robin() {
        let source = SampleSource::new(1, 1990, 1991);
        let england = source.rows(League::England).unwrap();
        // (8 * 7 + 4 * 3) matches per season
        assert_eq!(england.len(), 2 * 68);
        assert!(england
            .iter()
            .any(|r| r.home == "Arsenal" && r.visitor == "Chelsea"));
        assert!(england
            .iter()
            .any(|r| r.home == "Chelsea" && r.visitor == "Arsenal"));
    }

    #[test]
    fn test_result_matches_score() {
        for row in SampleSource::new(3, 2000, 2000).rows(League::Italy).unwrap() {
            let expected = if row.hgoal > row.vgoal {
                "H"
            } else if row.hgoal < row.vgoal {
                "A"
            } else {
                "D"
            };
            assert_eq!(row.result, expected);
        }
    }

    #[test]
    fn test_scores_track_league_means() {
        let source = SampleSource::new(11, 1970, 1990);
        let average = |rows: &[MatchRow]| {
            rows.iter().map(|r| (r.hgoal + r.vgoal) as f64).sum::<f64>() / rows.len() as f64
        };
        let italy = source.rows(League::Italy).unwrap();
        let germany = source.rows(League::Germany).unwrap();

        assert!(italy.iter().all(|r| r.hgoal >= 0 && r.vgoal >= 0));
        assert!(average(&italy) < average(&germany));
    }

    #[test]
    fn test_goal_distribution_rejects_bad_mean() {
        assert!(goal_distribution(1.5).is_ok());
        assert!(matches!(goal_distribution(-1.0), Err(ReportError::Config(_))));
    }

    #[test]
    fn test_optional_columns_per_league() {
        let source = SampleSource::new(1, 1990, 1990);
        let england = source.load(League::England).unwrap();
        let france = source.load(League::France).unwrap();
        let italy = source.load(League::Italy).unwrap();

        assert!(has_column(&england, TOTAL_GOALS));
        assert!(has_column(&england, GOAL_DIFFERENCE));
        assert!(!has_column(&france, TOTAL_GOALS));
        assert!(has_column(&france, GOAL_DIFFERENCE));
        assert!(!has_column(&italy, TOTAL_GOALS));
        assert!(!has_column(&italy, GOAL_DIFFERENCE));
    }

    #[test]
    fn test_written_csv_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let source = SampleSource::new(5, 1990, 1991);
        source.write_csv(dir.path()).unwrap();

        let tables = CsvSource::new(dir.path()).load_all().unwrap();
        assert_eq!(
            tables.england.height(),
            source.rows(League::England).unwrap().len()
        );
        assert!(!has_column(&tables.italy, TOTAL_GOALS));
    }
}
