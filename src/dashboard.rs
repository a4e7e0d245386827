//! Chart requests and the session that serves them
//!
//! A `ChartRequest` is what the user picked (who, which season, which
//! style). The `Session` owns the settings and the dataset cache, resolves
//! the request to a set of court points and renders it.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use chrono::Local;
use image::RgbImage;
use tracing::{debug, info};

use crate::data::DatasetCache;
use crate::error::{Result, ShotChartError};
use crate::render::{ChartSpec, PlotStyle, RenderOptions, render_chart};
use crate::settings::Settings;
use crate::shots::{
    CourtPoint, GameSummary, MatchupQuery, ShotDataset, TeamGameQuery, list_games, normalize,
    parse_season, select_by_player, select_by_player_season, select_matchup,
};
use crate::stats::ShotSummary;

/// Specific year or every configured season
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonChoice {
    Year(i32),
    All,
}

impl FromStr for SeasonChoice {
    type Err = ShotChartError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") || trimmed.eq_ignore_ascii_case("all years") {
            Ok(SeasonChoice::All)
        } else {
            parse_season(trimmed).map(SeasonChoice::Year)
        }
    }
}

impl fmt::Display for SeasonChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeasonChoice::Year(y) => write!(f, "{}", y),
            SeasonChoice::All => f.write_str("All years"),
        }
    }
}

/// Whose shots to plot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartSubject {
    Player { name: String, season: SeasonChoice },
    TeamGame(TeamGameQuery),
    Matchup(MatchupQuery),
}

impl ChartSubject {
    /// Human readable title
    pub fn title(&self) -> String {
        match self {
            ChartSubject::Player { name, season } => format!("{} - {}", name, season),
            ChartSubject::TeamGame(q) => {
                format!("{} - {} game {}", q.team_name, q.season, q.game_id)
            }
            ChartSubject::Matchup(q) => match q.date {
                Some(date) => format!("{} vs {} - {}", q.team_name, q.opponent_name, date),
                None => format!("{} vs {} - {}", q.team_name, q.opponent_name, q.season),
            },
        }
    }

    /// Stem for output files
    pub fn file_stem(&self) -> String {
        let raw = match self {
            ChartSubject::Player { name, season } => format!("player {} {}", name, season),
            ChartSubject::TeamGame(q) => format!("team {} {} {}", q.team_name, q.season, q.game_id),
            ChartSubject::Matchup(q) => match q.date {
                Some(date) => format!("matchup {} {} {}", q.team_name, q.opponent_name, date),
                None => format!("matchup {} {} {}", q.team_name, q.opponent_name, q.season),
            },
        };
        sanitize_file_name(&raw)
    }

    fn season(&self) -> SeasonChoice {
        match self {
            ChartSubject::Player { season, .. } => *season,
            ChartSubject::TeamGame(q) => SeasonChoice::Year(q.season),
            ChartSubject::Matchup(q) => SeasonChoice::Year(q.season),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRequest {
    pub subject: ChartSubject,
    pub style: PlotStyle,
    /// Color made and missed shots separately (Simple style only)
    pub split_outcome: bool,
}

impl ChartRequest {
    pub fn new(subject: ChartSubject, style: PlotStyle) -> Self {
        Self {
            subject,
            style,
            split_outcome: false,
        }
    }

    pub fn with_split(mut self, split: bool) -> Self {
        self.split_outcome = split;
        self
    }
}

pub struct RenderedChart {
    pub image: RgbImage,
    pub summary: ShotSummary,
}

/// Where a chart landed on disk
#[derive(Debug, Clone)]
pub struct ChartOutput {
    pub image_path: PathBuf,
    pub summary_path: PathBuf,
    pub summary: ShotSummary,
}

pub struct Session {
    settings: Settings,
    cache: DatasetCache,
    options: RenderOptions,
}

impl Session {
    pub fn new(settings: Settings) -> Result<Self> {
        let options = settings.render_options()?;
        let cache = DatasetCache::new(settings.season_loader());
        Ok(Self {
            settings,
            cache,
            options,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn cache(&self) -> &DatasetCache {
        &self.cache
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Dataset for a season choice. Any missing file is `NoData`.
    pub fn dataset(&self, season: SeasonChoice) -> Result<Arc<ShotDataset>> {
        match season {
            SeasonChoice::All => self.cache.all_seasons(),
            SeasonChoice::Year(year) => self.cache.season(year),
        }
    }

    /// Select and normalize the request's shots
    pub fn points(&self, subject: &ChartSubject) -> Result<Vec<CourtPoint>> {
        let dataset = self.dataset(subject.season())?;
        let subset = match subject {
            ChartSubject::Player {
                name,
                season: SeasonChoice::All,
            } => select_by_player(&dataset, name),
            ChartSubject::Player {
                name,
                season: SeasonChoice::Year(year),
            } => select_by_player_season(&dataset, name, *year),
            ChartSubject::TeamGame(q) => q.select(&dataset),
            ChartSubject::Matchup(q) => select_matchup(&dataset, q),
        };
        debug!("{} matched {} shots", subject.title(), subset.len());
        Ok(normalize(subset))
    }

    /// Resolve and render; `NoData` comes back before anything is drawn
    pub fn render(&self, request: &ChartRequest) -> Result<RenderedChart> {
        let points = self.points(&request.subject)?;
        let title = request.subject.title();
        let summary = ShotSummary::from_points(title.clone(), &points);

        let spec = ChartSpec {
            points: &points,
            style: request.style,
            split_outcome: request.split_outcome,
            title,
            subtitle: summary.subtitle(),
        };
        let image = render_chart(&spec, &self.options);
        Ok(RenderedChart { image, summary })
    }

    /// Render and write the PNG plus its JSON summary. Without `out`, files
    /// go to the output directory under a timestamped name.
    pub fn render_to(&self, request: &ChartRequest, out: Option<&Path>) -> Result<ChartOutput> {
        let chart = self.render(request)?;

        let image_path = match out {
            Some(path) => path.to_path_buf(),
            None => {
                let timestamp = Local::now().format("%Y%m%d_%H%M%S");
                self.settings.output_dir.join(format!(
                    "{}_{}_{}.png",
                    request.subject.file_stem(),
                    request.style,
                    timestamp
                ))
            }
        };
        ensure_parent(&image_path)?;
        let summary_path = image_path.with_extension("json");

        chart.image.save(&image_path)?;
        chart.summary.write_to_file(&summary_path)?;
        info!("Wrote {}", image_path.display());

        Ok(ChartOutput {
            image_path,
            summary_path,
            summary: chart.summary,
        })
    }

    /// Players with at least one shot in the season choice
    pub fn players(&self, season: SeasonChoice) -> Result<Vec<String>> {
        let dataset = self.dataset(season)?;
        let mut names: Vec<String> = dataset.unique_players().into_iter().map(String::from).collect();
        names.sort();
        Ok(names)
    }

    pub fn teams(&self, season: SeasonChoice) -> Result<Vec<String>> {
        let dataset = self.dataset(season)?;
        let mut names: Vec<String> = dataset.unique_teams().into_iter().map(String::from).collect();
        names.sort();
        Ok(names)
    }

    pub fn games(&self, team_name: &str, season: i32) -> Result<Vec<GameSummary>> {
        let dataset = self.dataset(SeasonChoice::Year(season))?;
        Ok(list_games(&dataset, team_name, season))
    }
}

/// Create the parent directory of an output file
pub fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|source| ShotChartError::Io {
                path: dir.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

/// Lowercase alphanumerics, runs of anything else collapsed to one `_`
pub fn sanitize_file_name(name: &str) -> String {
    let mut out = String::new();
    let mut last_was_underscore = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
            last_was_underscore = false;
        } else if !last_was_underscore {
            out.push('_');
            last_was_underscore = true;
        }
    }

    out.trim_matches('_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::season_file_name;
    use tempfile::TempDir;

    const HEADER: &str = "SEASON_1,TEAM_NAME,PLAYER_NAME,GAME_DATE,GAME_ID,HOME_TEAM,AWAY_TEAM,SHOT_MADE,LOC_X,LOC_Y\n";

    fn write_season(dir: &Path, season: i32, rows: &[&str]) {
        let mut body = String::from(HEADER);
        for row in rows {
            body.push_str(row);
            body.push('\n');
        }
        fs::write(dir.join(season_file_name(season)), body).unwrap();
    }

    fn session(dir: &Path, first: i32, last: i32) -> Session {
        let settings = Settings {
            data_dir: dir.to_path_buf(),
            output_dir: dir.join("out"),
            first_season: first,
            last_season: last,
            ..Settings::default()
        };
        Session::new(settings).unwrap()
    }

    fn two_seasons() -> (TempDir, Session) {
        let dir = TempDir::new().unwrap();
        write_season(
            dir.path(),
            2019,
            &[
                "2019,Miami Heat,A,01-10-2019,123,MIA,BOS,TRUE,0.0,0.0",
                "2019,Boston Celtics,B,01-10-2019,123,MIA,BOS,FALSE,-10.0,20.0",
                "2019,Miami Heat,A,02-11-2019,456,MIA,NYK,FALSE,22.5,3.0",
            ],
        );
        write_season(
            dir.path(),
            2020,
            &["2020,Miami Heat,A,01-02-2020,789,MIA,BOS,TRUE,1.0,10.0"],
        );
        let s = session(dir.path(), 2019, 2020);
        (dir, s)
    }

    #[test]
    fn season_choice_parsing() {
        assert_eq!("2019".parse::<SeasonChoice>().unwrap(), SeasonChoice::Year(2019));
        assert_eq!("All years".parse::<SeasonChoice>().unwrap(), SeasonChoice::All);
        assert_eq!("all".parse::<SeasonChoice>().unwrap(), SeasonChoice::All);
        assert!(matches!(
            "19".parse::<SeasonChoice>(),
            Err(ShotChartError::InvalidSeason(_))
        ));
    }

    #[test]
    fn player_points_are_normalized() {
        let (_dir, s) = two_seasons();
        let subject = ChartSubject::Player {
            name: "A".into(),
            season: SeasonChoice::Year(2019),
        };
        let points = s.points(&subject).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!((points[0].x, points[0].y), (0.0, -45.0));
        assert_eq!((points[1].x, points[1].y), (225.0, -15.0));

        let all = ChartSubject::Player {
            name: "A".into(),
            season: SeasonChoice::All,
        };
        assert_eq!(s.points(&all).unwrap().len(), 3);
    }

    #[test]
    fn matchup_and_game_selection() {
        let (_dir, s) = two_seasons();
        let matchup = MatchupQuery::parse("Miami Heat", "Boston Celtics", "2019", None).unwrap();
        let points = s.points(&ChartSubject::Matchup(matchup)).unwrap();
        assert_eq!(points.len(), 1);

        let game = TeamGameQuery::parse("Miami Heat", "2019", "456").unwrap();
        assert_eq!(s.points(&ChartSubject::TeamGame(game)).unwrap().len(), 1);

        let games = s.games("Miami Heat", 2019).unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].opponent.as_deref(), Some("Boston Celtics"));
    }

    #[test]
    fn missing_season_file_is_no_data_before_render() {
        let dir = TempDir::new().unwrap();
        write_season(
            dir.path(),
            2019,
            &["2019,Miami Heat,A,01-10-2019,123,MIA,BOS,TRUE,0.0,0.0"],
        );
        let s = session(dir.path(), 2019, 2020);
        let request = ChartRequest::new(
            ChartSubject::Player {
                name: "A".into(),
                season: SeasonChoice::All,
            },
            PlotStyle::Simple,
        );
        match s.render_to(&request, None) {
            Err(ShotChartError::NoData { missing }) => {
                assert_eq!(missing, vec![dir.path().join(season_file_name(2020))]);
            }
            other => panic!("expected NoData, got {:?}", other.map(|o| o.image_path)),
        }
        assert!(!dir.path().join("out").exists());
        // The season that is present still works on its own
        assert!(s.players(SeasonChoice::Year(2019)).is_ok());
    }

    #[test]
    fn empty_selection_renders() {
        let (dir, s) = two_seasons();
        let request = ChartRequest::new(
            ChartSubject::Player {
                name: "Nobody".into(),
                season: SeasonChoice::Year(2019),
            },
            PlotStyle::Hex,
        );
        let out = dir.path().join("charts/nobody.png");
        let output = s.render_to(&request, Some(&out)).unwrap();
        assert!(output.image_path.is_file());
        assert!(output.summary_path.is_file());
        assert_eq!(output.summary.attempts, 0);
    }

    #[test]
    fn default_output_name() {
        let (dir, s) = two_seasons();
        let request = ChartRequest::new(
            ChartSubject::Player {
                name: "A".into(),
                season: SeasonChoice::All,
            },
            PlotStyle::Kde,
        );
        let output = s.render_to(&request, None).unwrap();
        assert!(output.image_path.starts_with(dir.path().join("out")));
        let name = output.image_path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("player_a_all_years_kde_"), "{}", name);
        assert_eq!(output.summary.attempts, 3);
    }

    #[test]
    fn listings_are_sorted() {
        let (_dir, s) = two_seasons();
        assert_eq!(s.players(SeasonChoice::Year(2019)).unwrap(), vec!["A", "B"]);
        assert_eq!(
            s.teams(SeasonChoice::All).unwrap(),
            vec!["Boston Celtics", "Miami Heat"]
        );
    }

    #[test]
    fn sanitize() {
        assert_eq!(sanitize_file_name("LeBron James - 2019"), "lebron_james_2019");
        assert_eq!(sanitize_file_name("  A.J. "), "a_j");
    }
}
