//! Shotchart - NBA shot location charts drawn over a half-court diagram
//!
//! This crate provides the court geometry, shot data loading and selection,
//! and the raster renderer used by the `shotchart` binaries.

// Core modules
pub mod cli;
pub mod constants;
pub mod error;
pub mod logging;
pub mod settings;

// Data and geometry
pub mod court;
pub mod data;
pub mod shots;
pub mod stats;

// Output
pub mod dashboard;
pub mod render;

// Re-export commonly used types for convenience
pub use court::{CourtColor, CourtPrimitive, Stroke, build_court};
pub use dashboard::{ChartOutput, ChartRequest, ChartSubject, SeasonChoice, Session};
pub use data::{DatasetCache, LoadStats, SeasonLoader, read_shot_csv};
pub use error::{Result, ShotChartError};
pub use logging::init_logging;
pub use render::{ChartSpec, CourtCanvas, PlotStyle, RenderOptions, combine_images, render_chart};
pub use settings::Settings;
pub use shots::{
    CourtPoint, GameSummary, MatchupQuery, ShotDataset, ShotRecord, ShotSubset, TeamGameQuery,
    list_games, normalize, select_by_player, select_by_player_season, select_by_team_game,
    select_matchup,
};
pub use stats::{ShotSummary, Zone};
