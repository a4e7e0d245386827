//! Shot layers drawn under the court lines: scatter, density, hexbin

use std::collections::HashMap;

use image::Rgb;
use imageproc::drawing::{draw_filled_circle_mut, draw_polygon_mut};
use imageproc::point::Point;
use rayon::prelude::*;

use crate::constants::{VIEW_X_MAX, VIEW_X_MIN, VIEW_Y_BOTTOM, VIEW_Y_TOP};
use crate::shots::CourtPoint;

use super::canvas::CourtCanvas;
use super::style::{blend, intensity_to_color};

/// Density grid resolution in court units
const KDE_CELL: f64 = 2.5;
/// Kernel truncation in bandwidths
const KDE_CUTOFF: f64 = 3.0;
/// Bandwidth used when the sample spread is degenerate
const KDE_FALLBACK_BANDWIDTH: f64 = 10.0;
const KDE_ALPHA: f32 = 0.75;
const HEX_ALPHA: f32 = 0.9;

/// Single-color markers, or made/missed colors when `outcome` is given
pub fn draw_scatter(
    canvas: &mut CourtCanvas,
    points: &[CourtPoint],
    radius: u32,
    color: Rgb<u8>,
    outcome: Option<(Rgb<u8>, Rgb<u8>)>,
) {
    // Misses first so makes stay visible on top
    let mut ordered: Vec<&CourtPoint> = points.iter().collect();
    if outcome.is_some() {
        ordered.sort_by_key(|p| p.made);
    }

    for p in ordered {
        let fill = match outcome {
            Some((made, missed)) => {
                if p.made {
                    made
                } else {
                    missed
                }
            }
            None => color,
        };
        let (px, py) = canvas.to_pixel(p.x, p.y);
        if py < canvas.header() as f32 {
            continue;
        }
        draw_filled_circle_mut(
            &mut canvas.image,
            (px.round() as i32, py.round() as i32),
            radius as i32,
            fill,
        );
    }
}

/// Smoothed shot density over the view
#[derive(Debug, Clone)]
pub struct DensityGrid {
    cols: usize,
    rows: usize,
    values: Vec<f64>,
    pub bandwidth: (f64, f64),
}

impl DensityGrid {
    fn index(&self, col: usize, row: usize) -> usize {
        row * self.cols + col
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    /// Bilinear sample at a court position; 0 outside the grid
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let gx = (x - VIEW_X_MIN) / KDE_CELL - 0.5;
        let gy = (y - VIEW_Y_TOP) / KDE_CELL - 0.5;
        if gx < 0.0 || gy < 0.0 {
            return 0.0;
        }
        let (c0, r0) = (gx.floor() as usize, gy.floor() as usize);
        if c0 + 1 >= self.cols || r0 + 1 >= self.rows {
            return 0.0;
        }
        let (fx, fy) = (gx - c0 as f64, gy - r0 as f64);
        let v = |c, r| self.values[self.index(c, r)];
        let top = v(c0, r0) * (1.0 - fx) + v(c0 + 1, r0) * fx;
        let bottom = v(c0, r0 + 1) * (1.0 - fx) + v(c0 + 1, r0 + 1) * fx;
        top * (1.0 - fy) + bottom * fy
    }

    /// Court position of the densest cell center
    pub fn peak(&self) -> (f64, f64) {
        let (idx, _) = self
            .values
            .iter()
            .enumerate()
            .fold((0, f64::MIN), |best, (i, &v)| if v > best.1 { (i, v) } else { best });
        let (col, row) = (idx % self.cols, idx / self.cols);
        (
            VIEW_X_MIN + (col as f64 + 0.5) * KDE_CELL,
            VIEW_Y_TOP + (row as f64 + 0.5) * KDE_CELL,
        )
    }
}

/// Scott's rule bandwidth for one axis in two dimensions
fn scott_bandwidth(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if n < 2.0 {
        return KDE_FALLBACK_BANDWIDTH;
    }
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let bw = var.sqrt() * n.powf(-1.0 / 6.0);
    if bw.is_finite() && bw > f64::EPSILON {
        bw
    } else {
        KDE_FALLBACK_BANDWIDTH
    }
}

/// Truncated kernel; the radius never exceeds `max_radius` cells
fn gaussian_kernel(bandwidth: f64, max_radius: usize) -> Vec<f64> {
    let sigma_cells = bandwidth / KDE_CELL;
    let radius = (sigma_cells * KDE_CUTOFF).ceil().clamp(1.0, max_radius.max(1) as f64) as i64;
    (-radius..=radius)
        .map(|i| (-0.5 * (i as f64 / sigma_cells).powi(2)).exp())
        .collect()
}

/// Gaussian KDE on a fixed grid: histogram the in-view points, then apply a
/// separable Gaussian blur (one pass per axis, rows in parallel). Points
/// outside the view count toward neither the histogram nor the bandwidth.
pub fn compute_density(points: &[CourtPoint]) -> DensityGrid {
    let cols = ((VIEW_X_MAX - VIEW_X_MIN) / KDE_CELL).ceil() as usize;
    let rows = ((VIEW_Y_BOTTOM - VIEW_Y_TOP) / KDE_CELL).ceil() as usize;

    let visible: Vec<&CourtPoint> = points
        .iter()
        .filter(|p| CourtCanvas::in_view(p.x, p.y))
        .collect();
    let xs: Vec<f64> = visible.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = visible.iter().map(|p| p.y).collect();
    let bandwidth = (scott_bandwidth(&xs), scott_bandwidth(&ys));

    let mut hist = vec![0.0_f64; cols * rows];
    for p in &visible {
        let col = (((p.x - VIEW_X_MIN) / KDE_CELL) as usize).min(cols - 1);
        let row = (((p.y - VIEW_Y_TOP) / KDE_CELL) as usize).min(rows - 1);
        hist[row * cols + col] += 1.0;
    }

    let max_radius = cols.max(rows);
    let kx = gaussian_kernel(bandwidth.0, max_radius);
    let ky = gaussian_kernel(bandwidth.1, max_radius);
    let (rx, ry) = ((kx.len() / 2) as i64, (ky.len() / 2) as i64);

    // Horizontal pass
    let mut blurred = vec![0.0_f64; cols * rows];
    blurred
        .par_chunks_mut(cols)
        .enumerate()
        .for_each(|(row, out)| {
            let src = &hist[row * cols..(row + 1) * cols];
            for (col, cell) in out.iter_mut().enumerate() {
                *cell = kx
                    .iter()
                    .enumerate()
                    .filter_map(|(k, w)| {
                        let c = col as i64 + k as i64 - rx;
                        (0..cols as i64).contains(&c).then(|| src[c as usize] * w)
                    })
                    .sum();
            }
        });

    // Vertical pass
    let mut values = vec![0.0_f64; cols * rows];
    values
        .par_chunks_mut(cols)
        .enumerate()
        .for_each(|(row, out)| {
            for (k, w) in ky.iter().enumerate() {
                let r = row as i64 + k as i64 - ry;
                if !(0..rows as i64).contains(&r) {
                    continue;
                }
                let src = &blurred[r as usize * cols..(r as usize + 1) * cols];
                for (cell, v) in out.iter_mut().zip(src) {
                    *cell += v * w;
                }
            }
        });

    DensityGrid {
        cols,
        rows,
        values,
        bandwidth,
    }
}

/// Filled density bands; the lowest band stays transparent
pub fn draw_density(canvas: &mut CourtCanvas, points: &[CourtPoint], levels: u32) {
    if points.is_empty() {
        return;
    }
    let grid = compute_density(points);
    let max = grid.max();
    if max <= 0.0 {
        return;
    }

    let levels = levels.max(2) as f64;
    let (width, height) = canvas.image.dimensions();
    for py in canvas.header()..height {
        for px in 0..width {
            let (x, y) = canvas.to_court(px, py);
            let t = grid.sample(x, y) / max;
            let band = (t * levels).floor().min(levels - 1.0);
            if band < 1.0 {
                continue;
            }
            let color = intensity_to_color((band / (levels - 1.0)) as f32);
            let base = *canvas.image.get_pixel(px, py);
            canvas.put_court_pixel(px, py, blend(base, color, KDE_ALPHA));
        }
    }
}

/// Pointy-top hexagonal binning. `gridsize` hexagons span the view width.
#[derive(Debug, Clone)]
pub struct HexBins {
    /// Center-to-corner size in court units
    pub size: f64,
    pub counts: HashMap<(i32, i32), usize>,
}

impl HexBins {
    pub fn new(points: &[CourtPoint], gridsize: u32) -> Self {
        let hex_width = (VIEW_X_MAX - VIEW_X_MIN) / gridsize.max(1) as f64;
        let size = hex_width / 3.0_f64.sqrt();
        let mut counts = HashMap::new();
        for p in points.iter().filter(|p| CourtCanvas::in_view(p.x, p.y)) {
            *counts.entry(hex_for(p.x, p.y, size)).or_insert(0) += 1;
        }
        Self { size, counts }
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn max_count(&self) -> usize {
        self.counts.values().copied().max().unwrap_or(0)
    }

    /// Court position of an axial cell center; the hoop is the center of (0, 0)
    pub fn center(&self, q: i32, r: i32) -> (f64, f64) {
        (
            self.size * 3.0_f64.sqrt() * (q as f64 + r as f64 / 2.0),
            self.size * 1.5 * r as f64,
        )
    }

    pub fn corners(&self, q: i32, r: i32) -> [(f64, f64); 6] {
        let (cx, cy) = self.center(q, r);
        std::array::from_fn(|i| {
            let angle = (60.0 * i as f64 - 30.0).to_radians();
            (cx + self.size * angle.cos(), cy + self.size * angle.sin())
        })
    }
}

/// Axial coordinates of the hexagon containing a point (cube rounding)
fn hex_for(x: f64, y: f64, size: f64) -> (i32, i32) {
    let q = (3.0_f64.sqrt() / 3.0 * x - y / 3.0) / size;
    let r = (2.0 / 3.0 * y) / size;
    let s = -q - r;

    let (mut rq, mut rr, rs) = (q.round(), r.round(), s.round());
    let (dq, dr, ds) = ((rq - q).abs(), (rr - r).abs(), (rs - s).abs());
    if dq > dr && dq > ds {
        rq = -rr - rs;
    } else if dr > ds {
        rr = -rq - rs;
    }
    (rq as i32, rr as i32)
}

pub fn draw_hexbin(canvas: &mut CourtCanvas, points: &[CourtPoint], gridsize: u32) {
    let bins = HexBins::new(points, gridsize);
    let max = bins.max_count();
    if max == 0 {
        return;
    }

    let mut cells: Vec<(&(i32, i32), &usize)> = bins.counts.iter().collect();
    cells.sort();

    for (&(q, r), &count) in cells {
        let mut poly: Vec<Point<i32>> = bins
            .corners(q, r)
            .iter()
            .map(|&(x, y)| {
                let (px, py) = canvas.to_pixel(x, y);
                Point::new(px.round() as i32, py.round() as i32)
            })
            .collect();
        poly.dedup();
        if poly.len() < 3 || poly.first() == poly.last() {
            continue;
        }

        let t = count as f32 / max as f32;
        let (cx, cy) = bins.center(q, r);
        let (px, py) = canvas.to_pixel(cx, cy);
        let base = if px >= 0.0 && py >= 0.0 {
            canvas
                .image
                .get_pixel_checked(px as u32, py as u32)
                .copied()
                .unwrap_or(Rgb([255, 255, 255]))
        } else {
            Rgb([255, 255, 255])
        };
        draw_polygon_mut(&mut canvas.image, &poly, blend(base, intensity_to_color(t), HEX_ALPHA));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    fn pt(x: f64, y: f64) -> CourtPoint {
        CourtPoint { x, y, made: true }
    }

    #[test]
    fn density_peaks_at_cluster() {
        let mut points: Vec<CourtPoint> = (0..50)
            .map(|i| pt(100.0 + (i % 5) as f64, 200.0 + (i / 5) as f64 * 0.5))
            .collect();
        points.push(pt(-200.0, 20.0));
        let grid = compute_density(&points);
        let (x, y) = grid.peak();
        assert!((x - 102.0).abs() < 10.0, "peak x {}", x);
        assert!((y - 202.0).abs() < 10.0, "peak y {}", y);
        assert!(grid.sample(102.0, 202.0) > grid.sample(-200.0, 20.0));
    }

    #[test]
    fn single_point_uses_fallback_bandwidth() {
        let grid = compute_density(&[pt(0.0, 100.0)]);
        assert_eq!(grid.bandwidth, (KDE_FALLBACK_BANDWIDTH, KDE_FALLBACK_BANDWIDTH));
        assert!(grid.max() > 0.0);
    }

    #[test]
    fn far_outlier_does_not_widen_bandwidth() {
        let mut points: Vec<CourtPoint> = (0..20).map(|i| pt(i as f64, 100.0 + i as f64)).collect();
        let clustered = compute_density(&points);
        points.push(pt(1.0e6, 100.0));
        let grid = compute_density(&points);
        assert_eq!(grid.bandwidth, clustered.bandwidth);
        assert!(grid.bandwidth.0 < 50.0, "bandwidth {:?}", grid.bandwidth);

        let mut canvas = CourtCanvas::new(1.0, 0, WHITE);
        draw_density(&mut canvas, &points, 10);
        let (px, py) = canvas.to_pixel(10.0, 110.0);
        assert_ne!(*canvas.image.get_pixel(px as u32, py as u32), WHITE);
    }

    #[test]
    fn kernel_radius_is_capped() {
        let kernel = gaussian_kernel(1.0e9, 200);
        assert_eq!(kernel.len(), 401);
        assert_eq!(gaussian_kernel(0.1, 200).len(), 3);
    }

    #[test]
    fn hex_counts_cover_in_view_points() {
        let points = vec![
            pt(0.0, 0.0),
            pt(1.0, 1.0),
            pt(120.0, 300.0),
            pt(-240.0, 400.0),
            // Below the baseline view edge
            pt(0.0, -40.0),
        ];
        let bins = HexBins::new(&points, 25);
        assert_eq!(bins.total(), 4);
        assert_eq!(bins.counts.get(&(0, 0)), Some(&2));
        assert_eq!(bins.max_count(), 2);
    }

    #[test]
    fn hex_center_round_trips() {
        let bins = HexBins::new(&[], 25);
        for (q, r) in [(0, 0), (3, -2), (-4, 7), (10, 5)] {
            let (x, y) = bins.center(q, r);
            assert_eq!(hex_for(x, y, bins.size), (q, r));
        }
    }

    #[test]
    fn scatter_colors_by_outcome() {
        let mut canvas = CourtCanvas::new(1.0, 0, WHITE);
        let made = Rgb([0, 200, 0]);
        let missed = Rgb([200, 0, 0]);
        let points = vec![
            CourtPoint { x: 100.0, y: 100.0, made: true },
            CourtPoint { x: -100.0, y: 100.0, made: false },
        ];
        draw_scatter(&mut canvas, &points, 3, WHITE, Some((made, missed)));
        let (px, py) = canvas.to_pixel(100.0, 100.0);
        assert_eq!(*canvas.image.get_pixel(px as u32, py as u32), made);
        let (px, py) = canvas.to_pixel(-100.0, 100.0);
        assert_eq!(*canvas.image.get_pixel(px as u32, py as u32), missed);
    }

    #[test]
    fn density_paints_near_shots_only() {
        let mut canvas = CourtCanvas::new(1.0, 0, WHITE);
        let points: Vec<CourtPoint> = (0..30).map(|i| pt(0.0 + i as f64 * 0.2, 50.0)).collect();
        draw_density(&mut canvas, &points, 10);
        let (px, py) = canvas.to_pixel(3.0, 50.0);
        assert_ne!(*canvas.image.get_pixel(px as u32, py as u32), WHITE);
        let (px, py) = canvas.to_pixel(-200.0, 400.0);
        assert_eq!(*canvas.image.get_pixel(px as u32, py as u32), WHITE);
    }
}
