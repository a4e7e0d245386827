//! Categorical shot selection
//!
//! Selections borrow from the dataset; nothing here copies or mutates
//! records. An empty selection is a valid result.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{Result, ShotChartError};

use super::dataset::ShotDataset;
use super::record::{ShotRecord, parse_game_date};

/// Borrowed subset of a dataset, discarded after the render
pub type ShotSubset<'a> = Vec<&'a ShotRecord>;

pub fn select_by_player<'a>(dataset: &'a ShotDataset, player_name: &str) -> ShotSubset<'a> {
    dataset
        .iter()
        .filter(|r| r.player_name == player_name)
        .collect()
}

pub fn select_by_player_season<'a>(
    dataset: &'a ShotDataset,
    player_name: &str,
    season: i32,
) -> ShotSubset<'a> {
    dataset
        .iter()
        .filter(|r| r.player_name == player_name && r.season == season)
        .collect()
}

pub fn select_by_team_game<'a>(
    dataset: &'a ShotDataset,
    team_name: &str,
    season: i32,
    game_id: i64,
) -> ShotSubset<'a> {
    dataset
        .iter()
        .filter(|r| r.team_name == team_name && r.season == season && r.game_id == game_id)
        .collect()
}

/// Strict season coercion: trimmed integer, four digits
pub fn parse_season(value: &str) -> Result<i32> {
    let trimmed = value.trim();
    match trimmed.parse::<i32>() {
        Ok(year) if (1000..=9999).contains(&year) => Ok(year),
        _ => Err(ShotChartError::InvalidSeason(value.to_string())),
    }
}

pub fn parse_game_id(value: &str) -> Result<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| ShotChartError::InvalidGameId(value.to_string()))
}

/// Team + season + game, coerced from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamGameQuery {
    pub team_name: String,
    pub season: i32,
    pub game_id: i64,
}

impl TeamGameQuery {
    /// Coerce string inputs; non-numeric season or game id fails here
    /// instead of silently matching nothing.
    pub fn parse(team_name: &str, season: &str, game_id: &str) -> Result<Self> {
        Ok(Self {
            team_name: team_name.to_string(),
            season: parse_season(season)?,
            game_id: parse_game_id(game_id)?,
        })
    }

    pub fn select<'a>(&self, dataset: &'a ShotDataset) -> ShotSubset<'a> {
        select_by_team_game(dataset, &self.team_name, self.season, self.game_id)
    }
}

/// Games between two named teams in one season, optionally on one date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchupQuery {
    pub team_name: String,
    pub opponent_name: String,
    pub season: i32,
    pub date: Option<NaiveDate>,
}

impl MatchupQuery {
    pub fn parse(team_name: &str, opponent_name: &str, season: &str, date: Option<&str>) -> Result<Self> {
        Ok(Self {
            team_name: team_name.to_string(),
            opponent_name: opponent_name.to_string(),
            season: parse_season(season)?,
            date: date.map(parse_game_date).transpose()?,
        })
    }
}

/// Shots by `team_name` in every game of the season where the opponent also
/// recorded a shot (both teams took part), restricted to `date` when set.
///
/// Participation comes from the opponent's own shot rows. `home_team` and
/// `away_team` hold abbreviations, not the full names the query carries, so
/// they are not consulted; a game in which the opponent logged no shot is
/// not counted.
pub fn select_matchup<'a>(dataset: &'a ShotDataset, query: &MatchupQuery) -> ShotSubset<'a> {
    let in_scope = |r: &ShotRecord| {
        r.season == query.season && query.date.is_none_or(|d| r.game_date == d)
    };

    let opponent_games: HashSet<i64> = dataset
        .iter()
        .filter(|r| in_scope(r) && r.team_name == query.opponent_name)
        .map(|r| r.game_id)
        .collect();

    dataset
        .iter()
        .filter(|r| {
            in_scope(r) && r.team_name == query.team_name && opponent_games.contains(&r.game_id)
        })
        .collect()
}

/// One game a team played in a season, for disambiguating selections
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub game_id: i64,
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub opponent: Option<String>,
    pub attempts: usize,
}

/// Games for `team_name` in `season`, ordered by date then id
pub fn list_games(dataset: &ShotDataset, team_name: &str, season: i32) -> Vec<GameSummary> {
    let mut games: BTreeMap<(NaiveDate, i64), GameSummary> = BTreeMap::new();
    for r in dataset.iter().filter(|r| r.season == season && r.team_name == team_name) {
        games
            .entry((r.game_date, r.game_id))
            .or_insert_with(|| GameSummary {
                game_id: r.game_id,
                date: r.game_date,
                home_team: r.home_team.clone(),
                away_team: r.away_team.clone(),
                opponent: None,
                attempts: 0,
            })
            .attempts += 1;
    }

    // Opponent full name comes from the other team's rows in the same game
    for r in dataset.iter().filter(|r| r.season == season && r.team_name != team_name) {
        if let Some(game) = games.get_mut(&(r.game_date, r.game_id)) {
            game.opponent.get_or_insert_with(|| r.team_name.clone());
        }
    }

    games.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::super::dataset::fixtures::shot;
    use super::*;

    fn dated(mut r: ShotRecord, y: i32, m: u32, d: u32) -> ShotRecord {
        r.game_date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        r
    }

    fn sample() -> ShotDataset {
        ShotDataset::new(vec![
            dated(shot("A", "Heat", 2019, 123, 0.0, 0.0), 2019, 1, 10),
            dated(shot("B", "Celtics", 2019, 123, 5.0, 5.0), 2019, 1, 10),
            dated(shot("A", "Heat", 2019, 124, 1.0, 1.0), 2019, 1, 12),
            dated(shot("C", "Knicks", 2019, 124, 2.0, 2.0), 2019, 1, 12),
            dated(shot("A", "Heat", 2019, 130, 3.0, 3.0), 2019, 3, 1),
            dated(shot("B", "Celtics", 2019, 130, 4.0, 4.0), 2019, 3, 1),
            dated(shot("A", "Heat", 2020, 123, 0.0, 0.0), 2020, 1, 10),
        ])
    }

    #[test]
    fn player_without_shots_is_empty_not_error() {
        let ds = sample();
        assert!(select_by_player(&ds, "Nobody").is_empty());
        assert_eq!(select_by_player(&ds, "A").len(), 4);
        assert_eq!(select_by_player_season(&ds, "A", 2020).len(), 1);
    }

    #[test]
    fn team_game_is_conjunctive() {
        let ds = sample();
        let subset = select_by_team_game(&ds, "Heat", 2019, 123);
        assert_eq!(subset.len(), 1);
        assert_eq!(subset[0].season, 2019);
        assert!(select_by_team_game(&ds, "Heat", 2021, 123).is_empty());
    }

    #[test]
    fn string_inputs_match_integer_inputs() {
        let ds = sample();
        let parsed = TeamGameQuery::parse("Heat", "2019", " 123 ").unwrap();
        assert_eq!(parsed.season, 2019);
        assert_eq!(parsed.game_id, 123);
        assert_eq!(parsed.select(&ds), select_by_team_game(&ds, "Heat", 2019, 123));
    }

    #[test]
    fn non_numeric_season_fails_fast() {
        assert!(matches!(
            TeamGameQuery::parse("Heat", "twenty-nineteen", "123"),
            Err(ShotChartError::InvalidSeason(_))
        ));
        assert!(matches!(
            TeamGameQuery::parse("Heat", "2019", "12x"),
            Err(ShotChartError::InvalidGameId(_))
        ));
        assert!(parse_season("19").is_err());
    }

    #[test]
    fn matchup_selects_only_games_against_opponent() {
        let ds = sample();
        let query = MatchupQuery::parse("Heat", "Celtics", "2019", None).unwrap();
        let ids: Vec<i64> = select_matchup(&ds, &query).iter().map(|r| r.game_id).collect();
        assert_eq!(ids, vec![123, 130]);

        let on_date = MatchupQuery::parse("Heat", "Celtics", "2019", Some("03-01-2019")).unwrap();
        let ids: Vec<i64> = select_matchup(&ds, &on_date).iter().map(|r| r.game_id).collect();
        assert_eq!(ids, vec![130]);
    }

    #[test]
    fn matchup_needs_opponent_shots_in_the_game() {
        // Game 140 lists Boston on the row, but no Celtics shot was recorded
        let mut ds = sample().iter().cloned().collect::<Vec<_>>();
        let mut heat_only = dated(shot("A", "Heat", 2019, 140, 6.0, 6.0), 2019, 4, 2);
        heat_only.away_team = "BOS".into();
        ds.push(heat_only);
        let ds = ShotDataset::new(ds);

        let query = MatchupQuery::parse("Heat", "Celtics", "2019", None).unwrap();
        let ids: Vec<i64> = select_matchup(&ds, &query).iter().map(|r| r.game_id).collect();
        assert_eq!(ids, vec![123, 130]);
    }

    #[test]
    fn list_games_names_opponents() {
        let ds = sample();
        let games = list_games(&ds, "Heat", 2019);
        assert_eq!(games.len(), 3);
        assert_eq!(games[0].game_id, 123);
        assert_eq!(games[0].opponent.as_deref(), Some("Celtics"));
        assert_eq!(games[1].opponent.as_deref(), Some("Knicks"));
        assert_eq!(games[2].attempts, 1);
    }
}
