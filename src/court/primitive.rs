//! Court drawing primitives

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShotChartError};

/// RGB stroke/fill color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourtColor(pub [u8; 3]);

impl CourtColor {
    pub const BLACK: CourtColor = CourtColor([0, 0, 0]);
    pub const WHITE: CourtColor = CourtColor([255, 255, 255]);

    /// Parse `#rrggbb` or one of a few named colors
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if let Some(hex) = value.strip_prefix('#') {
            if hex.len() == 6 {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
                if let (Ok(r), Ok(g), Ok(b)) = (channel(0), channel(2), channel(4)) {
                    return Ok(CourtColor([r, g, b]));
                }
            }
            return Err(ShotChartError::Settings(format!("bad hex color {:?}", value)));
        }

        let rgb = match value.to_ascii_lowercase().as_str() {
            "black" => [0, 0, 0],
            "white" => [255, 255, 255],
            "gray" | "grey" => [128, 128, 128],
            "red" => [214, 39, 40],
            "green" => [44, 160, 44],
            "blue" => [31, 119, 180],
            "orange" => [255, 127, 14],
            _ => {
                return Err(ShotChartError::Settings(format!(
                    "unknown color {:?}",
                    value
                )));
            }
        };
        Ok(CourtColor(rgb))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashStyle {
    Dashed,
}

/// Stroke shared by every primitive kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub line_width: f64,
    pub color: CourtColor,
    pub fill: bool,
    pub dash: Option<DashStyle>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: (f64, f64),
    pub radius: f64,
}

impl Circle {
    /// Closed polyline around the circle
    pub fn sample(&self, segments: usize) -> Vec<(f64, f64)> {
        let segments = segments.max(8);
        (0..=segments)
            .map(|i| {
                let theta = std::f64::consts::TAU * i as f64 / segments as f64;
                (
                    self.center.0 + self.radius * theta.cos(),
                    self.center.1 + self.radius * theta.sin(),
                )
            })
            .collect()
    }
}

/// Axis-aligned rectangle; width/height may be zero or negative
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub origin: (f64, f64),
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    /// (min_x, min_y, max_x, max_y) with negative sizes folded in
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let (x0, y0) = self.origin;
        let (x1, y1) = (x0 + self.width, y0 + self.height);
        (x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1))
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (min_x, min_y, max_x, max_y) = self.bounds();
        x >= min_x && x <= max_x && y >= min_y && y <= max_y
    }
}

/// Elliptical arc. `width`/`height` are the full extents (diameters) of the
/// ellipse; the sweep runs counter-clockwise from `start_deg` to `end_deg`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub center: (f64, f64),
    pub width: f64,
    pub height: f64,
    pub start_deg: f64,
    pub end_deg: f64,
}

impl Arc {
    /// Sweep in degrees, always in (0, 360]
    pub fn sweep_deg(&self) -> f64 {
        let mut sweep = self.end_deg - self.start_deg;
        while sweep <= 0.0 {
            sweep += 360.0;
        }
        sweep.min(360.0)
    }

    pub fn point_at(&self, deg: f64) -> (f64, f64) {
        let theta = deg.to_radians();
        (
            self.center.0 + self.width / 2.0 * theta.cos(),
            self.center.1 + self.height / 2.0 * theta.sin(),
        )
    }

    /// Polyline along the arc, `segments + 1` points
    pub fn sample(&self, segments: usize) -> Vec<(f64, f64)> {
        let segments = segments.max(2);
        let sweep = self.sweep_deg();
        (0..=segments)
            .map(|i| self.point_at(self.start_deg + sweep * i as f64 / segments as f64))
            .collect()
    }
}

/// One fixed shape of the court diagram
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CourtPrimitive {
    Circle { shape: Circle, stroke: Stroke },
    Rectangle { shape: Rectangle, stroke: Stroke },
    Arc { shape: Arc, stroke: Stroke },
}

impl CourtPrimitive {
    pub fn stroke(&self) -> &Stroke {
        match self {
            CourtPrimitive::Circle { stroke, .. }
            | CourtPrimitive::Rectangle { stroke, .. }
            | CourtPrimitive::Arc { stroke, .. } => stroke,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            CourtPrimitive::Circle { .. } => "circle",
            CourtPrimitive::Rectangle { .. } => "rectangle",
            CourtPrimitive::Arc { .. } => "arc",
        }
    }
}
