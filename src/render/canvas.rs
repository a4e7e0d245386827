//! Raster court surface
//!
//! Maps court units onto an RGB image with fixed view bounds. The Y axis is
//! inverted: court Y = -15 is the top row and 422.5 the bottom row, so the
//! hoop sits near the top of the image.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

use crate::constants::{VIEW_X_MAX, VIEW_X_MIN, VIEW_Y_BOTTOM, VIEW_Y_TOP};
use crate::court::{CourtPrimitive, DashStyle, Stroke};

use super::style::to_rgb;

/// Dash on/off lengths as multiples of the stroke thickness
const DASH_ON: f32 = 3.7;
const DASH_OFF: f32 = 1.6;

pub struct CourtCanvas {
    pub image: RgbImage,
    pixels_per_unit: f64,
    /// Rows reserved above the court for the title
    header: u32,
}

impl CourtCanvas {
    pub fn new(pixels_per_unit: f64, header: u32, background: Rgb<u8>) -> Self {
        let width = ((VIEW_X_MAX - VIEW_X_MIN) * pixels_per_unit).round() as u32;
        let height = ((VIEW_Y_BOTTOM - VIEW_Y_TOP) * pixels_per_unit).round() as u32 + header;
        let image = RgbImage::from_pixel(width.max(1), height.max(1), background);
        Self {
            image,
            pixels_per_unit,
            header,
        }
    }

    pub fn pixels_per_unit(&self) -> f64 {
        self.pixels_per_unit
    }

    pub fn header(&self) -> u32 {
        self.header
    }

    /// Court units -> pixel coordinates (sub-pixel)
    pub fn to_pixel(&self, x: f64, y: f64) -> (f32, f32) {
        (
            ((x - VIEW_X_MIN) * self.pixels_per_unit) as f32,
            (self.header as f64 + (y - VIEW_Y_TOP) * self.pixels_per_unit) as f32,
        )
    }

    /// Pixel center -> court units; inverse of `to_pixel`
    pub fn to_court(&self, px: u32, py: u32) -> (f64, f64) {
        (
            (px as f64 + 0.5) / self.pixels_per_unit + VIEW_X_MIN,
            (py as f64 + 0.5 - self.header as f64) / self.pixels_per_unit + VIEW_Y_TOP,
        )
    }

    /// Whether a court-unit point falls inside the view bounds
    pub fn in_view(x: f64, y: f64) -> bool {
        (VIEW_X_MIN..=VIEW_X_MAX).contains(&x) && (VIEW_Y_TOP..=VIEW_Y_BOTTOM).contains(&y)
    }

    /// Stroke thickness in pixels for a court line width
    pub fn thickness(&self, line_width: f64) -> f32 {
        ((line_width * self.pixels_per_unit) / 1.5).max(1.0) as f32
    }

    pub fn put_court_pixel(&mut self, px: u32, py: u32, color: Rgb<u8>) {
        if px < self.image.width() && py >= self.header && py < self.image.height() {
            self.image.put_pixel(px, py, color);
        }
    }

    /// Draw one court primitive
    pub fn draw_primitive(&mut self, primitive: &CourtPrimitive) {
        match primitive {
            CourtPrimitive::Circle { shape, stroke } => {
                let segments = segments_for(shape.radius * self.pixels_per_unit);
                self.stroke_polyline(&shape.sample(segments), stroke);
            }
            CourtPrimitive::Rectangle { shape, stroke } => {
                let (min_x, min_y, max_x, max_y) = shape.bounds();
                if stroke.fill {
                    let (x0, y0) = self.to_pixel(min_x, min_y);
                    let (x1, y1) = self.to_pixel(max_x, max_y);
                    let w = (x1 - x0).round().max(1.0) as u32;
                    let h = (y1 - y0).round().max(1.0) as u32;
                    draw_filled_rect_mut(
                        &mut self.image,
                        Rect::at(x0.round() as i32, y0.round() as i32).of_size(w, h),
                        to_rgb(stroke.color),
                    );
                }
                let outline = [
                    (min_x, min_y),
                    (max_x, min_y),
                    (max_x, max_y),
                    (min_x, max_y),
                    (min_x, min_y),
                ];
                self.stroke_polyline(&outline, stroke);
            }
            CourtPrimitive::Arc { shape, stroke } => {
                let radius = shape.width.max(shape.height) / 2.0 * self.pixels_per_unit;
                let segments =
                    (segments_for(radius) as f64 * shape.sweep_deg() / 360.0).ceil() as usize;
                self.stroke_polyline(&shape.sample(segments), stroke);
            }
        }
    }

    fn stroke_polyline(&mut self, points: &[(f64, f64)], stroke: &Stroke) {
        let color = to_rgb(stroke.color);
        let thickness = self.thickness(stroke.line_width);
        let pixels: Vec<(f32, f32)> = points.iter().map(|&(x, y)| self.to_pixel(x, y)).collect();

        match stroke.dash {
            None => {
                for pair in pixels.windows(2) {
                    stroke_segment(&mut self.image, pair[0], pair[1], thickness, color);
                }
            }
            Some(DashStyle::Dashed) => {
                for (a, b) in dash_segments(&pixels, DASH_ON * thickness, DASH_OFF * thickness) {
                    stroke_segment(&mut self.image, a, b, thickness, color);
                }
            }
        }
    }
}

/// Polyline resolution for a circle of the given pixel radius
fn segments_for(radius_px: f64) -> usize {
    (radius_px * std::f64::consts::TAU / 3.0).ceil().clamp(16.0, 2048.0) as usize
}

/// Thick line as a run of filled discs; 1px lines go straight to imageproc
pub fn stroke_segment(image: &mut RgbImage, a: (f32, f32), b: (f32, f32), thickness: f32, color: Rgb<u8>) {
    if thickness < 1.5 {
        draw_line_segment_mut(image, a, b, color);
        return;
    }

    let radius = (thickness / 2.0).round().max(1.0) as i32;
    let length = ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt();
    let steps = length.ceil().max(1.0) as usize;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let x = a.0 + (b.0 - a.0) * t;
        let y = a.1 + (b.1 - a.1) * t;
        draw_filled_circle_mut(image, (x.round() as i32, y.round() as i32), radius, color);
    }
}

/// Split a polyline into visible dash pieces
fn dash_segments(points: &[(f32, f32)], on: f32, off: f32) -> Vec<((f32, f32), (f32, f32))> {
    let mut out = Vec::new();
    let period = on + off;
    if period <= 0.0 {
        return out;
    }

    // Distance travelled along the whole polyline
    let mut travelled = 0.0_f32;
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let length = ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt();
        if length <= f32::EPSILON {
            continue;
        }

        let mut pos = 0.0_f32;
        while pos < length {
            let phase = (travelled + pos) % period;
            let (visible, remaining) = if phase < on {
                (true, on - phase)
            } else {
                (false, period - phase)
            };
            let end = (pos + remaining).min(length);
            if visible {
                let lerp = |d: f32| (a.0 + (b.0 - a.0) * d / length, a.1 + (b.1 - a.1) * d / length);
                out.push((lerp(pos), lerp(end)));
            }
            pos = end;
        }
        travelled += length;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::court::{CourtColor, build_court};

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    #[test]
    fn view_corners_map_to_image_corners() {
        let canvas = CourtCanvas::new(2.0, 0, WHITE);
        assert_eq!(canvas.image.width(), 1000);
        assert_eq!(canvas.image.height(), 875);
        assert_eq!(canvas.to_pixel(-250.0, -15.0), (0.0, 0.0));
        assert_eq!(canvas.to_pixel(250.0, 422.5), (1000.0, 875.0));
        // Hoop is near the top, centered
        let (hx, hy) = canvas.to_pixel(0.0, 0.0);
        assert_eq!((hx, hy), (500.0, 30.0));
    }

    #[test]
    fn header_shifts_court_down() {
        let canvas = CourtCanvas::new(1.0, 40, WHITE);
        assert_eq!(canvas.image.height(), 438 + 40);
        assert_eq!(canvas.to_pixel(-250.0, -15.0), (0.0, 40.0));
        let (x, y) = canvas.to_court(0, 40);
        assert!((x + 249.5).abs() < 1e-9);
        assert!((y + 14.5).abs() < 1e-9);
    }

    #[test]
    fn court_lines_leave_ink() {
        let mut canvas = CourtCanvas::new(1.0, 0, WHITE);
        for p in build_court(true, 2.0, CourtColor::BLACK) {
            canvas.draw_primitive(&p);
        }
        // Paint edge at x=-80 halfway up the lane
        let (px, py) = canvas.to_pixel(-80.0, 50.0);
        let hit = (-2..=2).any(|dx| {
            *canvas.image.get_pixel((px as i32 + dx) as u32, py as u32) == Rgb([0, 0, 0])
        });
        assert!(hit);
        // Open floor stays blank
        let (px, py) = canvas.to_pixel(150.0, 300.0);
        assert_eq!(*canvas.image.get_pixel(px as u32, py as u32), WHITE);
    }

    #[test]
    fn dashes_alternate() {
        let pieces = dash_segments(&[(0.0, 0.0), (10.0, 0.0)], 2.0, 3.0);
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[0], ((0.0, 0.0), (2.0, 0.0)));
        assert_eq!(pieces[1], ((5.0, 0.0), (7.0, 0.0)));
    }

    #[test]
    fn in_view_bounds() {
        assert!(CourtCanvas::in_view(0.0, -15.0));
        assert!(CourtCanvas::in_view(250.0, 422.5));
        assert!(!CourtCanvas::in_view(0.0, -45.1));
        assert!(!CourtCanvas::in_view(251.0, 0.0));
    }
}
