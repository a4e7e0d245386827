//! Shot rows as stored in the per-season CSV files

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShotChartError};

/// Accepted GAME_DATE layouts, tried in order
const DATE_FORMATS: [&str; 3] = ["%m-%d-%Y", "%Y-%m-%d", "%m/%d/%Y"];

/// One logged field-goal attempt. Locations are raw feet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotRecord {
    pub player_name: String,
    pub team_name: String,
    pub season: i32,
    pub game_id: i64,
    pub home_team: String,
    pub away_team: String,
    pub game_date: NaiveDate,
    pub loc_x: f64,
    pub loc_y: f64,
    pub made: bool,
}

/// CSV row before date/flag coercion. Column names moved around between
/// dataset revisions, hence the aliases.
#[derive(Debug, Deserialize)]
pub(crate) struct RawShotRow {
    #[serde(rename = "PLAYER_NAME")]
    player_name: String,
    #[serde(rename = "TEAM_NAME")]
    team_name: String,
    #[serde(rename = "SEASON_1", alias = "SEASON")]
    season: i32,
    #[serde(rename = "GAME_ID")]
    game_id: i64,
    #[serde(rename = "HOME_TEAM")]
    home_team: String,
    #[serde(rename = "AWAY_TEAM")]
    away_team: String,
    #[serde(rename = "GAME_DATE")]
    game_date: String,
    #[serde(rename = "LOC_X")]
    loc_x: f64,
    #[serde(rename = "LOC_Y")]
    loc_y: f64,
    #[serde(rename = "SHOT_MADE", alias = "SHOT_MADE_FLAG")]
    made: String,
}

impl TryFrom<RawShotRow> for ShotRecord {
    type Error = ShotChartError;

    fn try_from(row: RawShotRow) -> Result<Self> {
        let made = parse_made_flag(&row.made).ok_or_else(|| {
            ShotChartError::MalformedRow(format!("bad SHOT_MADE value {:?}", row.made))
        })?;
        Ok(ShotRecord {
            player_name: row.player_name,
            team_name: row.team_name,
            season: row.season,
            game_id: row.game_id,
            home_team: row.home_team,
            away_team: row.away_team,
            game_date: parse_game_date(&row.game_date)?,
            loc_x: row.loc_x,
            loc_y: row.loc_y,
            made,
        })
    }
}

/// Parse a GAME_DATE cell in any of the layouts seen across revisions
pub fn parse_game_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .ok_or_else(|| ShotChartError::InvalidDate(value.to_string()))
}

fn parse_made_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "made" => Some(true),
        "false" | "0" | "missed" => Some(false),
        _ => None,
    }
}
