//! Raster rendering of shot charts
//!
//! Shot layers go down first, court lines on top, title last.

mod canvas;
mod layers;
mod sheet;
mod style;
mod text;

use std::path::PathBuf;

use image::{Rgb, RgbImage};
use tracing::debug;

use crate::constants::TITLE_BAND_HEIGHT;
use crate::court::{CourtColor, CourtPrimitive, build_court};
use crate::shots::CourtPoint;

pub use canvas::{CourtCanvas, stroke_segment};
pub use layers::{DensityGrid, HexBins, compute_density, draw_density, draw_hexbin, draw_scatter};
pub use sheet::combine_images;
pub use style::{PlotStyle, blend, intensity_to_color, to_rgb};
pub use text::{draw_title, load_font};

/// Marker color when outcomes are not split
const DEFAULT_MARKER: Rgb<u8> = Rgb([31, 119, 180]);

/// Resolved drawing options
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub pixels_per_unit: f64,
    pub line_width: f64,
    pub court_color: CourtColor,
    pub background: CourtColor,
    pub outer_lines: bool,
    pub made_color: CourtColor,
    pub missed_color: CourtColor,
    pub point_radius: u32,
    pub hex_gridsize: u32,
    pub kde_levels: u32,
    pub font_path: Option<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            pixels_per_unit: 2.0,
            line_width: 2.0,
            court_color: CourtColor::BLACK,
            background: CourtColor::WHITE,
            outer_lines: true,
            made_color: CourtColor([44, 160, 44]),
            missed_color: CourtColor([214, 39, 40]),
            point_radius: 4,
            hex_gridsize: 25,
            kde_levels: 10,
            font_path: None,
        }
    }
}

impl RenderOptions {
    pub fn court(&self) -> Vec<CourtPrimitive> {
        build_court(self.outer_lines, self.line_width, self.court_color)
    }
}

/// What to draw for one chart
#[derive(Debug, Clone)]
pub struct ChartSpec<'a> {
    pub points: &'a [CourtPoint],
    pub style: PlotStyle,
    /// Color scatter markers by made/missed
    pub split_outcome: bool,
    pub title: String,
    pub subtitle: String,
}

/// Render a chart to an RGB image
pub fn render_chart(spec: &ChartSpec<'_>, options: &RenderOptions) -> RgbImage {
    let font = options.font_path.as_deref().and_then(load_font);
    let header = if font.is_some() { TITLE_BAND_HEIGHT } else { 0 };
    let mut canvas = CourtCanvas::new(options.pixels_per_unit, header, to_rgb(options.background));

    debug!(
        "Rendering {} points as {} ({}x{})",
        spec.points.len(),
        spec.style,
        canvas.image.width(),
        canvas.image.height()
    );

    match spec.style {
        PlotStyle::Simple => {
            let outcome = spec
                .split_outcome
                .then(|| (to_rgb(options.made_color), to_rgb(options.missed_color)));
            draw_scatter(&mut canvas, spec.points, options.point_radius, DEFAULT_MARKER, outcome);
        }
        PlotStyle::Kde => draw_density(&mut canvas, spec.points, options.kde_levels),
        PlotStyle::Hex => draw_hexbin(&mut canvas, spec.points, options.hex_gridsize),
    }

    for primitive in options.court() {
        canvas.draw_primitive(&primitive);
    }

    if let Some(font) = &font {
        draw_title(
            &mut canvas,
            font,
            &spec.title,
            &spec.subtitle,
            to_rgb(options.court_color),
        );
    }

    canvas.image
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selection_still_renders_court() {
        let options = RenderOptions::default();
        for style in [PlotStyle::Simple, PlotStyle::Kde, PlotStyle::Hex] {
            let spec = ChartSpec {
                points: &[],
                style,
                split_outcome: true,
                title: String::new(),
                subtitle: String::new(),
            };
            let img = render_chart(&spec, &options);
            assert_eq!(img.dimensions(), (1000, 875));
            assert!(img.pixels().any(|p| *p == Rgb([0, 0, 0])));
        }
    }

    #[test]
    fn every_style_marks_the_shot_area() {
        let options = RenderOptions::default();
        let points: Vec<CourtPoint> = (0..40)
            .map(|i| CourtPoint {
                x: 150.0 + (i % 4) as f64,
                y: 300.0 + (i / 4) as f64,
                made: i % 2 == 0,
            })
            .collect();
        for style in [PlotStyle::Simple, PlotStyle::Kde, PlotStyle::Hex] {
            let spec = ChartSpec {
                points: &points,
                style,
                split_outcome: false,
                title: String::new(),
                subtitle: String::new(),
            };
            let img = render_chart(&spec, &options);
            let canvas = CourtCanvas::new(options.pixels_per_unit, 0, Rgb([255, 255, 255]));
            let (px, py) = canvas.to_pixel(151.0, 304.0);
            assert_ne!(
                *img.get_pixel(px as u32, py as u32),
                Rgb([255, 255, 255]),
                "{} left the shot area blank",
                style
            );
        }
    }
}
