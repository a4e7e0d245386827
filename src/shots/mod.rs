//! Shot records, selection and coordinate normalization

mod dataset;
mod normalize;
mod record;
mod select;

pub(crate) use record::RawShotRow;

pub use dataset::ShotDataset;
pub use normalize::{CourtPoint, normalize, normalize_location, partition_made};
pub use record::{ShotRecord, parse_game_date};
pub use select::{
    GameSummary, MatchupQuery, ShotSubset, TeamGameQuery, list_games, parse_game_id,
    parse_season, select_by_player, select_by_player_season, select_by_team_game,
    select_matchup,
};

#[cfg(test)]
pub(crate) use dataset::fixtures;
