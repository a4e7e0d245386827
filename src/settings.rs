//! Persistent dashboard settings
//!
//! Loaded from `config/shotchart.toml`. Every field has a default, so a
//! missing file or a partial file is fine.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::constants::{
    DEFAULT_DATA_DIR, DEFAULT_OUTPUT_DIR, FIRST_SEASON, LAST_SEASON, SETTINGS_FILE,
};
use crate::court::CourtColor;
use crate::data::SeasonLoader;
use crate::error::{Result, ShotChartError};
use crate::render::{PlotStyle, RenderOptions};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding `NBA_<year>_Shots.csv`
    pub data_dir: PathBuf,
    /// Where rendered charts and stats sidecars are written
    pub output_dir: PathBuf,
    /// Season range used for "all years"
    pub first_season: i32,
    pub last_season: i32,
    pub court: CourtSettings,
    pub plot: PlotSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourtSettings {
    pub line_width: f64,
    pub color: String,
    pub outer_lines: bool,
    pub background: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotSettings {
    pub style: String,
    pub pixels_per_unit: f64,
    pub made_color: String,
    pub missed_color: String,
    pub point_radius: u32,
    /// Hexagons across the court width
    pub hex_gridsize: u32,
    /// Filled density bands
    pub kde_levels: u32,
    /// TTF/OTF used for the title; no font means no title
    pub font_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            first_season: FIRST_SEASON,
            last_season: LAST_SEASON,
            court: CourtSettings::default(),
            plot: PlotSettings::default(),
        }
    }
}

impl Default for CourtSettings {
    fn default() -> Self {
        Self {
            line_width: 2.0,
            color: "black".to_string(),
            outer_lines: true,
            background: "white".to_string(),
        }
    }
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            style: "simple".to_string(),
            pixels_per_unit: 2.0,
            made_color: "green".to_string(),
            missed_color: "red".to_string(),
            point_radius: 4,
            hex_gridsize: 25,
            kde_levels: 10,
            font_path: None,
        }
    }
}

impl Settings {
    /// Load from the default settings file, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(Path::new(SETTINGS_FILE))
    }

    /// Load from `path`; a missing or unreadable file yields defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No {} found, using defaults", path.display());
            return Self::default();
        }

        match Self::from_file(path) {
            Ok(settings) => {
                info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Strict load, for an explicitly requested settings file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ShotChartError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
            .map_err(|e| ShotChartError::Settings(format!("{}: {}", path.display(), e)))
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ShotChartError::Settings(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ShotChartError::Settings(e.to_string()))
    }

    pub fn season_loader(&self) -> SeasonLoader {
        SeasonLoader::new(&self.data_dir, self.first_season, self.last_season)
    }

    pub fn default_style(&self) -> Result<PlotStyle> {
        self.plot.style.parse()
    }

    /// Resolve color names and sizes into renderer options
    pub fn render_options(&self) -> Result<RenderOptions> {
        Ok(RenderOptions {
            pixels_per_unit: self.plot.pixels_per_unit.max(0.25),
            line_width: self.court.line_width,
            court_color: CourtColor::parse(&self.court.color)?,
            background: CourtColor::parse(&self.court.background)?,
            outer_lines: self.court.outer_lines,
            made_color: CourtColor::parse(&self.plot.made_color)?,
            missed_color: CourtColor::parse(&self.plot.missed_color)?,
            point_radius: self.plot.point_radius.max(1),
            hex_gridsize: self.plot.hex_gridsize.max(1),
            kde_levels: self.plot.kde_levels.max(2),
            font_path: self.plot.font_path.clone(),
        })
    }
}
