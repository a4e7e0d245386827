//! Fixed values for shotchart
//!
//! Court dimensions are in court units (feet x 10) with the hoop center at
//! the origin and Y increasing away from the baseline.

// =============================================================================
// COURT GEOMETRY
// =============================================================================

pub const HOOP_RADIUS: f64 = 7.5;

pub const BACKBOARD_ORIGIN: (f64, f64) = (-30.0, -7.5);
pub const BACKBOARD_WIDTH: f64 = 60.0;
pub const BACKBOARD_HEIGHT: f64 = -1.0;

/// Baseline Y in court units (bottom edge of paint and court bounds)
pub const BASELINE_Y: f64 = -47.5;

pub const OUTER_BOX_ORIGIN: (f64, f64) = (-80.0, BASELINE_Y);
pub const OUTER_BOX_WIDTH: f64 = 160.0;
pub const INNER_BOX_ORIGIN: (f64, f64) = (-60.0, BASELINE_Y);
pub const INNER_BOX_WIDTH: f64 = 120.0;
pub const PAINT_HEIGHT: f64 = 190.0;

pub const FREE_THROW_CENTER: (f64, f64) = (0.0, 142.5);
pub const FREE_THROW_DIAMETER: f64 = 120.0;

pub const RESTRICTED_DIAMETER: f64 = 80.0;

pub const CORNER_THREE_X: f64 = 220.0;
pub const CORNER_THREE_HEIGHT: f64 = 140.0;

pub const THREE_POINT_DIAMETER: f64 = 475.0;
pub const THREE_POINT_START_DEG: f64 = 22.0;
pub const THREE_POINT_END_DEG: f64 = 158.0;

pub const CENTER_COURT: (f64, f64) = (0.0, 422.5);
pub const CENTER_OUTER_DIAMETER: f64 = 120.0;
pub const CENTER_INNER_DIAMETER: f64 = 40.0;

pub const COURT_BOUNDS_ORIGIN: (f64, f64) = (-250.0, BASELINE_Y);
pub const COURT_BOUNDS_WIDTH: f64 = 500.0;
pub const COURT_BOUNDS_HEIGHT: f64 = 470.0;

/// Primitive count without the optional outer bounds
pub const COURT_PRIMITIVE_COUNT: usize = 12;

// =============================================================================
// VIEW BOUNDS (rendering)
// =============================================================================

pub const VIEW_X_MIN: f64 = -250.0;
pub const VIEW_X_MAX: f64 = 250.0;
/// Top edge of the image (Y axis is inverted, hoop near the top)
pub const VIEW_Y_TOP: f64 = -15.0;
/// Bottom edge of the image
pub const VIEW_Y_BOTTOM: f64 = 422.5;

// =============================================================================
// NORMALIZATION
// =============================================================================

/// Raw feet -> court units
pub const LOCATION_SCALE: f64 = 10.0;
/// Subtracted from scaled Y so the hoop lands on the origin
pub const LOCATION_Y_OFFSET: f64 = 45.0;

// =============================================================================
// DATA FILES
// =============================================================================

pub const DEFAULT_DATA_DIR: &str = "data";
pub const FIRST_SEASON: i32 = 2004;
pub const LAST_SEASON: i32 = 2023;

/// Per-season CSV name, `NBA_<year>_Shots.csv`
pub fn season_file_name(season: i32) -> String {
    format!("NBA_{:04}_Shots.csv", season)
}

// =============================================================================
// OUTPUT
// =============================================================================

pub const SETTINGS_FILE: &str = "config/shotchart.toml";
pub const DEFAULT_OUTPUT_DIR: &str = "showcase/shotcharts";
/// Height of the title band above the court when a font is available
pub const TITLE_BAND_HEIGHT: u32 = 48;
