//! Load-once cache of the all-seasons dataset
//!
//! Built explicitly by the session and passed by reference to request
//! handlers. The dataset behind the `Arc` is never mutated; readers clone
//! the `Arc` and filter into private subsets.

use std::sync::{Arc, RwLock};

use tracing::info;

use crate::error::{Result, ShotChartError};
use crate::shots::ShotDataset;

use super::loader::SeasonLoader;

pub struct DatasetCache {
    loader: SeasonLoader,
    slot: RwLock<Option<Arc<ShotDataset>>>,
}

impl DatasetCache {
    pub fn new(loader: SeasonLoader) -> Self {
        Self {
            loader,
            slot: RwLock::new(None),
        }
    }

    pub fn loader(&self) -> &SeasonLoader {
        &self.loader
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.read().map(|slot| slot.is_some()).unwrap_or(false)
    }

    /// The full dataset, loading it on first use. Any absent season file
    /// yields `ShotChartError::NoData` and leaves the cache empty.
    pub fn all_seasons(&self) -> Result<Arc<ShotDataset>> {
        if let Some(cached) = self.read_slot() {
            return Ok(cached);
        }

        let mut slot = self.slot.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        // Another caller may have filled it while we waited
        if let Some(cached) = slot.as_ref() {
            return Ok(Arc::clone(cached));
        }

        let dataset = Arc::new(self.loader.require_all()?);
        *slot = Some(Arc::clone(&dataset));
        Ok(dataset)
    }

    /// One season. Served from the full dataset when it is already cached
    /// and covers `season`, otherwise read straight from that season's file.
    pub fn season(&self, season: i32) -> Result<Arc<ShotDataset>> {
        if let Some(all) = self.read_slot().filter(|_| self.loader.seasons().contains(&season)) {
            let records = all.iter().filter(|r| r.season == season).cloned().collect();
            return Ok(Arc::new(ShotDataset::new(records)));
        }

        match self.loader.load_season(season)? {
            Some(dataset) => Ok(Arc::new(dataset)),
            None => Err(ShotChartError::NoData {
                missing: vec![self.loader.season_path(season)],
            }),
        }
    }

    /// Drop the cached dataset; the next request reloads from disk
    pub fn invalidate(&self) {
        let mut slot = self.slot.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        if slot.take().is_some() {
            info!("Shot dataset cache invalidated");
        }
    }

    fn read_slot(&self) -> Option<Arc<ShotDataset>> {
        self.slot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
            .map(Arc::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::season_file_name;
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str =
        "SEASON_1,TEAM_NAME,PLAYER_NAME,GAME_DATE,GAME_ID,HOME_TEAM,AWAY_TEAM,SHOT_MADE,LOC_X,LOC_Y\n";

    fn seed(dir: &TempDir, season: i32) {
        let body = format!(
            "{}{},Heat,A,01-01-{},1,MIA,BOS,TRUE,0,0\n",
            HEADER, season, season
        );
        fs::write(dir.path().join(season_file_name(season)), body).unwrap();
    }

    #[test]
    fn loads_once_and_shares() {
        let dir = TempDir::new().unwrap();
        seed(&dir, 2015);
        seed(&dir, 2016);
        let cache = DatasetCache::new(SeasonLoader::new(dir.path(), 2015, 2016));
        assert!(!cache.is_loaded());

        let first = cache.all_seasons().unwrap();
        // Removing a file no longer matters once cached
        fs::remove_file(dir.path().join(season_file_name(2016))).unwrap();
        let second = cache.all_seasons().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.season(2016).unwrap().len(), 1);

        cache.invalidate();
        assert!(!cache.is_loaded());
        assert!(matches!(
            cache.all_seasons(),
            Err(ShotChartError::NoData { .. })
        ));
    }

    #[test]
    fn season_without_cache_reads_file() {
        let dir = TempDir::new().unwrap();
        seed(&dir, 2018);
        let cache = DatasetCache::new(SeasonLoader::new(dir.path(), 2004, 2023));
        assert_eq!(cache.season(2018).unwrap().len(), 1);
        assert!(matches!(
            cache.season(2019),
            Err(ShotChartError::NoData { .. })
        ));
        assert!(!cache.is_loaded());
    }

    #[test]
    fn season_outside_range_is_no_data_after_caching() {
        let dir = TempDir::new().unwrap();
        seed(&dir, 2015);
        seed(&dir, 2016);
        let cache = DatasetCache::new(SeasonLoader::new(dir.path(), 2015, 2016));
        assert!(matches!(cache.season(2030), Err(ShotChartError::NoData { .. })));

        cache.all_seasons().unwrap();
        assert!(cache.is_loaded());
        match cache.season(2030) {
            Err(ShotChartError::NoData { missing }) => {
                assert_eq!(missing, vec![dir.path().join(season_file_name(2030))]);
            }
            other => panic!("expected NoData, got {:?}", other.map(|d| d.len())),
        }
        assert_eq!(cache.season(2015).unwrap().len(), 1);
    }
}
