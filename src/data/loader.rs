//! Per-season CSV loading
//!
//! Absent season files are reported as `None`, never as an error; the
//! caller decides that "no data" halts rendering. A file that exists but
//! cannot be read as a shot table is an error.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::constants::{DEFAULT_DATA_DIR, FIRST_SEASON, LAST_SEASON, season_file_name};
use crate::error::{Result, ShotChartError};
use crate::shots::{RawShotRow, ShotDataset, ShotRecord};

/// Row counts from one load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub rows: usize,
    pub skipped: usize,
}

/// Reads `NBA_<year>_Shots.csv` files from a data directory
#[derive(Debug, Clone)]
pub struct SeasonLoader {
    data_dir: PathBuf,
    first_season: i32,
    last_season: i32,
}

impl Default for SeasonLoader {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR, FIRST_SEASON, LAST_SEASON)
    }
}

impl SeasonLoader {
    pub fn new(data_dir: impl Into<PathBuf>, first_season: i32, last_season: i32) -> Self {
        Self {
            data_dir: data_dir.into(),
            first_season: first_season.min(last_season),
            last_season: first_season.max(last_season),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Every season in the configured range, ascending, each once
    pub fn seasons(&self) -> Vec<i32> {
        (self.first_season..=self.last_season).collect()
    }

    pub fn season_path(&self, season: i32) -> PathBuf {
        self.data_dir.join(season_file_name(season))
    }

    /// Season files that do not exist
    pub fn missing_files(&self) -> Vec<PathBuf> {
        self.seasons()
            .into_iter()
            .map(|s| self.season_path(s))
            .filter(|p| !p.is_file())
            .collect()
    }

    /// Load one season; `Ok(None)` when its file is absent
    pub fn load_season(&self, season: i32) -> Result<Option<ShotDataset>> {
        let path = self.season_path(season);
        if !path.is_file() {
            warn!("Season file {} not found", path.display());
            return Ok(None);
        }
        let (dataset, stats) = read_shot_csv(&path)?;
        info!(
            "Loaded {} shots from {} ({} rows skipped)",
            stats.rows,
            path.display(),
            stats.skipped
        );
        Ok(Some(dataset))
    }

    /// Load and concatenate every configured season.
    ///
    /// `Ok(None)` if any season file is absent: a dataset silently missing a
    /// season is never returned.
    pub fn load_all(&self) -> Result<Option<ShotDataset>> {
        let missing = self.missing_files();
        if !missing.is_empty() {
            for path in &missing {
                warn!("Season file {} not found", path.display());
            }
            return Ok(None);
        }

        let seasons = self.seasons();
        let parts: Vec<(ShotDataset, LoadStats)> = seasons
            .par_iter()
            .map(|&season| read_shot_csv(&self.season_path(season)))
            .collect::<Result<_>>()?;

        let total: LoadStats = parts.iter().fold(LoadStats::default(), |acc, (_, s)| LoadStats {
            rows: acc.rows + s.rows,
            skipped: acc.skipped + s.skipped,
        });
        let dataset = ShotDataset::concat(parts.into_iter().map(|(ds, _)| ds));
        info!(
            "Loaded {} shots across {} seasons ({} rows skipped)",
            total.rows,
            seasons.len(),
            total.skipped
        );
        Ok(Some(dataset))
    }

    /// Like `load_all`, but turns absence into `ShotChartError::NoData`
    pub fn require_all(&self) -> Result<ShotDataset> {
        self.load_all()?.ok_or_else(|| ShotChartError::NoData {
            missing: self.missing_files(),
        })
    }
}

/// Parse one shot CSV. Rows that fail to parse are skipped and counted; a
/// missing required column fails the whole file.
pub fn read_shot_csv(path: &Path) -> Result<(ShotDataset, LoadStats)> {
    let csv_err = |source| ShotChartError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;

    check_required_columns(reader.headers().map_err(csv_err)?)
        .map_err(|column| ShotChartError::MalformedRow(format!(
            "{} has no {} column",
            path.display(),
            column
        )))?;

    let mut records = Vec::new();
    let mut stats = LoadStats::default();
    for (line, row) in reader.deserialize::<RawShotRow>().enumerate() {
        let parsed = row
            .map_err(|e| ShotChartError::MalformedRow(e.to_string()))
            .and_then(ShotRecord::try_from);
        match parsed {
            Ok(record) => {
                records.push(record);
                stats.rows += 1;
            }
            Err(e) => {
                // +2: header line and 1-based numbering
                debug!("{}:{} skipped: {}", path.display(), line + 2, e);
                stats.skipped += 1;
            }
        }
    }

    if stats.skipped > 0 {
        warn!("{}: skipped {} malformed rows", path.display(), stats.skipped);
    }
    Ok((ShotDataset::new(records), stats))
}

/// Column groups where any one name satisfies the requirement
const REQUIRED_COLUMNS: [&[&str]; 10] = [
    &["PLAYER_NAME"],
    &["TEAM_NAME"],
    &["SEASON_1", "SEASON"],
    &["GAME_ID"],
    &["HOME_TEAM"],
    &["AWAY_TEAM"],
    &["GAME_DATE"],
    &["LOC_X"],
    &["LOC_Y"],
    &["SHOT_MADE", "SHOT_MADE_FLAG"],
];

fn check_required_columns(headers: &csv::StringRecord) -> std::result::Result<(), &'static str> {
    for group in REQUIRED_COLUMNS {
        if !group.iter().any(|name| headers.iter().any(|h| h == *name)) {
            return Err(group[0]);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str = "SEASON_1,SEASON_2,TEAM_NAME,PLAYER_NAME,GAME_DATE,GAME_ID,HOME_TEAM,AWAY_TEAM,SHOT_MADE,LOC_X,LOC_Y\n";

    fn write_season(dir: &Path, season: i32, rows: &[&str]) {
        let mut body = String::from(HEADER);
        for row in rows {
            body.push_str(row);
            body.push('\n');
        }
        fs::write(dir.join(season_file_name(season)), body).unwrap();
    }

    #[test]
    fn reads_rows_and_ignores_extra_columns() {
        let dir = TempDir::new().unwrap();
        write_season(
            dir.path(),
            2010,
            &[
                "2010,2009-10,Miami Heat,A,01-05-2010,20900001,MIA,BOS,TRUE,0.0,0.0",
                "2010,2009-10,Miami Heat,B,01-05-2010,20900001,MIA,BOS,FALSE,5.0,5.0",
            ],
        );
        let loader = SeasonLoader::new(dir.path(), 2010, 2010);
        let ds = loader.load_season(2010).unwrap().unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].game_id, 20900001);
        assert!(ds.records()[0].made);
        assert!(!ds.records()[1].made);
        assert_eq!(ds.records()[1].loc_x, 5.0);
    }

    #[test]
    fn malformed_rows_are_skipped_and_counted() {
        let dir = TempDir::new().unwrap();
        write_season(
            dir.path(),
            2011,
            &[
                "2011,2010-11,Miami Heat,A,01-05-2011,1,MIA,BOS,TRUE,0.0,0.0",
                "2011,2010-11,Miami Heat,A,not-a-date,1,MIA,BOS,TRUE,0.0,0.0",
                "2011,2010-11,Miami Heat,A,01-05-2011,1,MIA,BOS,TRUE,abc,0.0",
            ],
        );
        let (ds, stats) = read_shot_csv(&dir.path().join(season_file_name(2011))).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(stats, LoadStats { rows: 1, skipped: 2 });
    }

    #[test]
    fn alias_columns_are_accepted() {
        let dir = TempDir::new().unwrap();
        let body = "SEASON,TEAM_NAME,PLAYER_NAME,GAME_DATE,GAME_ID,HOME_TEAM,AWAY_TEAM,SHOT_MADE_FLAG,LOC_X,LOC_Y\n\
                    2005,Miami Heat,A,2005-02-01,7,MIA,BOS,1,1.5,2.5\n";
        fs::write(dir.path().join(season_file_name(2005)), body).unwrap();
        let ds = SeasonLoader::new(dir.path(), 2005, 2005)
            .load_season(2005)
            .unwrap()
            .unwrap();
        assert_eq!(ds.records()[0].season, 2005);
        assert!(ds.records()[0].made);
    }

    #[test]
    fn missing_column_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(season_file_name(2006)),
            "PLAYER_NAME,LOC_X,LOC_Y\nA,0,0\n",
        )
        .unwrap();
        let loader = SeasonLoader::new(dir.path(), 2006, 2006);
        assert!(loader.load_season(2006).is_err());
    }

    #[test]
    fn absent_season_is_none() {
        let dir = TempDir::new().unwrap();
        let loader = SeasonLoader::new(dir.path(), 2004, 2004);
        assert!(loader.load_season(2004).unwrap().is_none());
    }

    #[test]
    fn load_all_concatenates_in_season_order() {
        let dir = TempDir::new().unwrap();
        write_season(dir.path(), 2013, &["2013,x,Heat,B,01-01-2013,2,MIA,BOS,TRUE,1,1"]);
        write_season(dir.path(), 2012, &["2012,x,Heat,A,01-01-2012,1,MIA,BOS,TRUE,0,0"]);
        let ds = SeasonLoader::new(dir.path(), 2012, 2013)
            .load_all()
            .unwrap()
            .unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.seasons(), vec![2012, 2013]);
        assert_eq!(ds.records()[0].player_name, "A");
    }

    #[test]
    fn one_missing_season_means_no_data() {
        let dir = TempDir::new().unwrap();
        write_season(dir.path(), 2012, &["2012,x,Heat,A,01-01-2012,1,MIA,BOS,TRUE,0,0"]);
        let loader = SeasonLoader::new(dir.path(), 2012, 2013);
        assert!(loader.load_all().unwrap().is_none());
        match loader.require_all() {
            Err(ShotChartError::NoData { missing }) => {
                assert_eq!(missing, vec![dir.path().join("NBA_2013_Shots.csv")]);
            }
            other => panic!("expected NoData, got {:?}", other.map(|d| d.len())),
        }
    }
}
