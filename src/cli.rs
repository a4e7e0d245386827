//! Command line parsing for the `shotchart` binary

use std::path::PathBuf;

use crate::dashboard::{ChartRequest, ChartSubject, SeasonChoice};
use crate::render::PlotStyle;
use crate::shots::{MatchupQuery, TeamGameQuery, parse_season};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Render one chart
    Chart {
        /// `None` means the configured default style
        style: Option<PlotStyle>,
        subject: ChartSubject,
        split_outcome: bool,
    },
    Players { season: SeasonChoice },
    Teams { season: SeasonChoice },
    Games { team: String, season: i32 },
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub command: Command,
    pub settings: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub verbose: bool,
}

impl Command {
    /// Fill in the default style for chart commands
    pub fn into_request(self, default_style: PlotStyle) -> Option<ChartRequest> {
        match self {
            Command::Chart {
                style,
                subject,
                split_outcome,
            } => Some(
                ChartRequest::new(subject, style.unwrap_or(default_style)).with_split(split_outcome),
            ),
            _ => None,
        }
    }
}

impl CliArgs {
    pub fn from_env() -> Result<Self, String> {
        Self::parse(std::env::args().skip(1))
    }

    /// Parse arguments (program name already stripped)
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, String> {
        let mut positional = Vec::new();
        let mut settings = None;
        let mut out = None;
        let mut verbose = false;
        let mut help = false;
        let mut season = None;
        let mut style = None;
        let mut split = false;
        let mut opponent = None;
        let mut date = None;
        let mut game_id = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let mut value = |flag: &str| args.next().ok_or_else(|| format!("{} needs a value", flag));
            match arg.as_str() {
                "--help" | "-h" => help = true,
                "--verbose" | "-v" => verbose = true,
                "--split" => split = true,
                "--settings" => settings = Some(PathBuf::from(value("--settings")?)),
                "--out" | "-o" => out = Some(PathBuf::from(value("--out")?)),
                "--season" => season = Some(value("--season")?),
                "--style" => {
                    let v = value("--style")?;
                    style = Some(v.parse::<PlotStyle>().map_err(|e| e.to_string())?);
                }
                "--opponent" => opponent = Some(value("--opponent")?),
                "--date" => date = Some(value("--date")?),
                "--game-id" => game_id = Some(value("--game-id")?),
                s if s.starts_with('-') => return Err(format!("unknown option {}", s)),
                _ => positional.push(arg),
            }
        }

        let command = if help || positional.is_empty() {
            Command::Help
        } else {
            let season_choice = |season: Option<&str>| -> Result<SeasonChoice, String> {
                season
                    .unwrap_or("all")
                    .parse::<SeasonChoice>()
                    .map_err(|e| e.to_string())
            };

            match positional[0].as_str() {
                "player" => {
                    let name = positional
                        .get(1..)
                        .filter(|rest| !rest.is_empty())
                        .map(|rest| rest.join(" "))
                        .ok_or("player needs a name")?;
                    Command::Chart {
                        style,
                        subject: ChartSubject::Player {
                            name,
                            season: season_choice(season.as_deref())?,
                        },
                        split_outcome: split,
                    }
                }
                "team" => {
                    let team = positional
                        .get(1..)
                        .filter(|rest| !rest.is_empty())
                        .map(|rest| rest.join(" "))
                        .ok_or("team needs a name")?;
                    let season = season.ok_or("team charts need --season <YYYY>")?;
                    let subject = match (game_id, opponent) {
                        (Some(_), Some(_)) => {
                            return Err("--game-id cannot be combined with --opponent".into());
                        }
                        (Some(_), None) if date.is_some() => {
                            return Err("--date only applies with --opponent".into());
                        }
                        (Some(id), None) => ChartSubject::TeamGame(
                            TeamGameQuery::parse(&team, &season, &id).map_err(|e| e.to_string())?,
                        ),
                        (None, Some(opp)) => ChartSubject::Matchup(
                            MatchupQuery::parse(&team, &opp, &season, date.as_deref())
                                .map_err(|e| e.to_string())?,
                        ),
                        (None, None) => {
                            return Err("team charts need --game-id <ID> or --opponent <TEAM>".into());
                        }
                    };
                    Command::Chart {
                        style,
                        subject,
                        split_outcome: split,
                    }
                }
                "players" => Command::Players {
                    season: season_choice(season.as_deref())?,
                },
                "teams" => Command::Teams {
                    season: season_choice(season.as_deref())?,
                },
                "games" => {
                    let team = positional
                        .get(1..)
                        .filter(|rest| !rest.is_empty())
                        .map(|rest| rest.join(" "))
                        .ok_or("games needs a team name")?;
                    let season = season.ok_or("games needs --season <YYYY>")?;
                    Command::Games {
                        team,
                        season: parse_season(&season).map_err(|e| e.to_string())?,
                    }
                }
                other => return Err(format!("unknown command {:?}", other)),
            }
        };

        Ok(Self {
            command,
            settings,
            out,
            verbose,
        })
    }
}

pub fn print_help() {
    println!(
        r#"Shotchart - NBA shot charts over a half-court diagram

USAGE:
    shotchart <COMMAND> [OPTIONS]

COMMANDS:
    player <NAME>       Chart every shot by a player
    team <TEAM>         Chart a team's shots in one game or matchup
    players             List players with shots
    teams               List teams with shots
    games <TEAM>        List a team's games in a season (ids, dates, opponents)

OPTIONS:
    --season <YYYY|all> Season to use (default: all; team and games need a year)
    --style <STYLE>     simple, kde or hex (default from settings)
    --split             Color made and missed shots separately (simple style)
    --opponent <TEAM>   Team charts: games against this opponent
    --date <DATE>       Team charts: only the matchup on this date
    --game-id <ID>      Team charts: one game by id
    --settings <FILE>   Settings file (default: config/shotchart.toml)
    --out, -o <FILE>    Output PNG (default: timestamped file in output_dir)
    --verbose, -v       Debug logging (RUST_LOG overrides)
    --help, -h          Show this help

EXAMPLES:
    shotchart player "LeBron James" --season 2013 --style kde
    shotchart games "Miami Heat" --season 2013
    shotchart team "Miami Heat" --season 2013 --opponent "San Antonio Spurs" --date 2013-06-20
"#
    );
}
