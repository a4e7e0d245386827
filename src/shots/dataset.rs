//! In-memory shot table

use std::collections::HashSet;

use super::record::ShotRecord;

/// Ordered collection of shot records, one or more seasons
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShotDataset {
    records: Vec<ShotRecord>,
}

impl ShotDataset {
    pub fn new(records: Vec<ShotRecord>) -> Self {
        Self { records }
    }

    /// Concatenate per-season tables in the given order
    pub fn concat(parts: impl IntoIterator<Item = ShotDataset>) -> Self {
        let mut records = Vec::new();
        for part in parts {
            records.extend(part.records);
        }
        Self { records }
    }

    pub fn records(&self) -> &[ShotRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ShotRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct player names in first-seen order
    pub fn unique_players(&self) -> Vec<&str> {
        unique_in_order(self.records.iter().map(|r| r.player_name.as_str()))
    }

    /// Distinct team names in first-seen order
    pub fn unique_teams(&self) -> Vec<&str> {
        unique_in_order(self.records.iter().map(|r| r.team_name.as_str()))
    }

    /// Distinct seasons, ascending
    pub fn seasons(&self) -> Vec<i32> {
        let mut seasons: Vec<i32> = self.records.iter().map(|r| r.season).collect();
        seasons.sort_unstable();
        seasons.dedup();
        seasons
    }
}

impl<'a> IntoIterator for &'a ShotDataset {
    type Item = &'a ShotRecord;
    type IntoIter = std::slice::Iter<'a, ShotRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn unique_in_order<'a>(names: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    names.filter(|name| seen.insert(*name)).collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::NaiveDate;

    use super::*;

    pub fn shot(player: &str, team: &str, season: i32, game_id: i64, x: f64, y: f64) -> ShotRecord {
        ShotRecord {
            player_name: player.to_string(),
            team_name: team.to_string(),
            season,
            game_id,
            home_team: "HOM".to_string(),
            away_team: "AWY".to_string(),
            game_date: NaiveDate::from_ymd_opt(season, 1, 15).unwrap(),
            loc_x: x,
            loc_y: y,
            made: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::shot;
    use super::*;

    #[test]
    fn concat_keeps_season_order() {
        let a = ShotDataset::new(vec![shot("A", "T", 2004, 1, 0.0, 0.0)]);
        let b = ShotDataset::new(vec![
            shot("B", "T", 2005, 2, 1.0, 1.0),
            shot("C", "U", 2005, 2, 2.0, 2.0),
        ]);
        let all = ShotDataset::concat([a, b]);
        assert_eq!(all.len(), 3);
        assert_eq!(all.seasons(), vec![2004, 2005]);
        let names: Vec<_> = all.iter().map(|r| r.player_name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn unique_players_first_seen_order() {
        let ds = ShotDataset::new(vec![
            shot("Zed", "T", 2010, 1, 0.0, 0.0),
            shot("Amy", "T", 2010, 1, 0.0, 0.0),
            shot("Zed", "T", 2010, 2, 0.0, 0.0),
        ]);
        assert_eq!(ds.unique_players(), vec!["Zed", "Amy"]);
        assert_eq!(ds.unique_teams(), vec!["T"]);
    }
}
