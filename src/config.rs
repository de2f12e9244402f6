//! Report configuration from report properties
//!
//! Configuration is loaded from report properties (defined in report.json).
//! All default values come from report.json; nothing here hardcodes a fallback.

use crate::soccer::error::{ReportError, Result};
use crate::soccer::palettes::resolve_color;
use crate::soccer::properties::ReportPropertyReader;
use plotters::style::RGBColor;
use std::path::{Path, PathBuf};

/// Override file looked up in the working directory
pub const OVERRIDE_FILE: &str = "report_config.json";

/// Season filters accept years in this range
const SEASON_RANGE: (i64, i64) = (1800, 3000);

/// Chart colors, resolved from names or hex codes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartColors {
    pub distribution: RGBColor,
    pub team: RGBColor,
    pub opponent: RGBColor,
    pub england: RGBColor,
    pub italy: RGBColor,
    pub france: RGBColor,
}

#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Directory with the league CSV files; None means next to the executable
    pub data_dir: Option<PathBuf>,

    /// Output document
    pub output_file: PathBuf,

    /// Team on the head-to-head page
    pub team: String,

    /// First season of the goal distribution
    pub distribution_since: i64,

    /// First season of the head-to-head comparison
    pub head_to_head_since: i64,

    /// First season of the scoring trend
    pub trend_since: i64,

    /// Tier treated as the top division
    pub top_tier: i64,

    pub colors: ChartColors,

    /// Log level used when SOCCER_VIZ_LOG is unset
    pub log_level: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self::from_properties(&ReportPropertyReader::default())
    }
}

impl ReportConfig {
    /// Create config from report properties
    pub fn from_properties(props: &ReportPropertyReader) -> Self {
        let data_dir = props.get_optional_string("data.dir").map(PathBuf::from);
        let output_file = PathBuf::from(props.get_string("output.file"));

        let team = props.get_string("team");

        let (min, max) = SEASON_RANGE;
        let distribution_since = props.get_i64_in_range("distribution.since", min, max);
        let head_to_head_since = props.get_i64_in_range("head_to_head.since", min, max);
        let trend_since = props.get_i64_in_range("trend.since", min, max);
        let top_tier = props.get_i64_in_range("top.tier", 1, 10);

        let colors = ChartColors {
            distribution: resolve_color(&props.get_string("color.distribution")),
            team: resolve_color(&props.get_string("color.team")),
            opponent: resolve_color(&props.get_string("color.opponent")),
            england: resolve_color(&props.get_string("color.england")),
            italy: resolve_color(&props.get_string("color.italy")),
            france: resolve_color(&props.get_string("color.france")),
        };

        let log_level = props.get_enum("log.level");

        Self {
            data_dir,
            output_file,
            team,
            distribution_since,
            head_to_head_since,
            trend_since,
            top_tier,
            colors,
            log_level,
        }
    }

    /// Load config from an override file (missing file = defaults)
    pub fn load(path: &Path) -> Result<Self> {
        let props = ReportPropertyReader::from_json_file(path)?;
        Ok(Self::from_properties(&props))
    }

    /// Directory holding the league files
    ///
    /// An unset `data.dir` resolves to the directory of the running executable.
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }

        let exe = std::env::current_exe()?;
        exe.parent().map(Path::to_path_buf).ok_or_else(|| {
            ReportError::Config(format!(
                "cannot determine directory of executable {}",
                exe.display()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn reader(pairs: &[(&str, &str)]) -> ReportPropertyReader {
        ReportPropertyReader::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        )
    }

    #[test]
    fn test_defaults() {
        let config = ReportConfig::default();
        assert_eq!(config.data_dir, None);
        assert_eq!(config.output_file, PathBuf::from("soccer_viz.pdf"));
        assert_eq!(config.team, "Arsenal");
        assert_eq!(config.distribution_since, 1980);
        assert_eq!(config.head_to_head_since, 1980);
        assert_eq!(config.trend_since, 1970);
        assert_eq!(config.top_tier, 1);
        assert_eq!(config.colors.distribution, RGBColor(70, 130, 180));
        assert_eq!(config.colors.team, RGBColor(220, 20, 60));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_overrides() {
        let config = ReportConfig::from_properties(&reader(&[
            ("data.dir", "/data/leagues"),
            ("team", "Liverpool"),
            ("trend.since", "1990"),
            ("color.italy", "#0000FF"),
        ]));
        assert_eq!(config.data_dir, Some(PathBuf::from("/data/leagues")));
        assert_eq!(config.team, "Liverpool");
        assert_eq!(config.trend_since, 1990);
        assert_eq!(config.colors.italy, RGBColor(0, 0, 255));
    }

    #[test]
    fn test_out_of_range_values_use_defaults() {
        let config =
            ReportConfig::from_properties(&reader(&[("top.tier", "0"), ("trend.since", "12")]));
        assert_eq!(config.top_tier, 1);
        assert_eq!(config.trend_since, 1970);
    }

    #[test]
    fn test_load_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(OVERRIDE_FILE);
        std::fs::write(&path, r#"{"team": "Chelsea", "top.tier": 2, "log.level": "debug"}"#)
            .unwrap();

        let config = ReportConfig::load(&path).unwrap();
        assert_eq!(config.team, "Chelsea");
        assert_eq!(config.top_tier, 2);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.trend_since, 1970);

        let missing = ReportConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(missing.team, "Arsenal");
    }

    #[test]
    fn test_resolve_data_dir() {
        let config = ReportConfig::from_properties(&reader(&[("data.dir", "/tmp/leagues")]));
        assert_eq!(
            config.resolve_data_dir().unwrap(),
            PathBuf::from("/tmp/leagues")
        );

        let exe_dir = ReportConfig::default().resolve_data_dir().unwrap();
        assert!(exe_dir.is_dir());
    }
}
