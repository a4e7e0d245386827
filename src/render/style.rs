//! Plot style selection and color ramps

use std::fmt;
use std::str::FromStr;

use image::Rgb;
use serde::{Deserialize, Serialize};

use crate::court::CourtColor;
use crate::error::ShotChartError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotStyle {
    /// One marker per shot
    #[default]
    Simple,
    /// Filled density bands
    Kde,
    /// Hexagonal bin counts
    Hex,
}

impl PlotStyle {
    pub fn label(&self) -> &'static str {
        match self {
            PlotStyle::Simple => "simple",
            PlotStyle::Kde => "kde",
            PlotStyle::Hex => "hex",
        }
    }
}

impl fmt::Display for PlotStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PlotStyle {
    type Err = ShotChartError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "simple" | "scatter" => Ok(PlotStyle::Simple),
            "kde" | "density" => Ok(PlotStyle::Kde),
            "hex" | "hexbin" => Ok(PlotStyle::Hex),
            _ => Err(ShotChartError::UnknownStyle(value.to_string())),
        }
    }
}

pub fn to_rgb(color: CourtColor) -> Rgb<u8> {
    Rgb(color.0)
}

/// Normalized intensity (0-1) to color.
/// Low = green, high = red
pub fn intensity_to_color(t: f32) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0);
    // Green -> Yellow -> Red gradient
    let r = (t * 2.0).min(1.0);
    let g = ((1.0 - t) * 2.0).min(1.0);
    Rgb([(r * 255.0) as u8, (g * 255.0) as u8, 50])
}

/// Mix `over` onto `base` with the given opacity
pub fn blend(base: Rgb<u8>, over: Rgb<u8>, alpha: f32) -> Rgb<u8> {
    let a = alpha.clamp(0.0, 1.0);
    let mix = |b: u8, o: u8| (b as f32 * (1.0 - a) + o as f32 * a).round() as u8;
    Rgb([
        mix(base.0[0], over.0[0]),
        mix(base.0[1], over.0[1]),
        mix(base.0[2], over.0[2]),
    ])
}
