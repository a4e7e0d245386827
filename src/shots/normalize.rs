//! Raw shot locations -> court units

use serde::Serialize;

use crate::constants::{LOCATION_SCALE, LOCATION_Y_OFFSET};

use super::record::ShotRecord;

/// Shot location in court units (hoop at the origin)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CourtPoint {
    pub x: f64,
    pub y: f64,
    pub made: bool,
}

/// The fixed affine map from raw feet to court units: `(10x, 10y - 45)`
pub fn normalize_location(x: f64, y: f64) -> (f64, f64) {
    (x * LOCATION_SCALE, y * LOCATION_SCALE - LOCATION_Y_OFFSET)
}

/// Rescale a selection into court units.
///
/// Returns fresh points; the records are left untouched. Precondition: the
/// records hold raw feet. Feeding already-normalized values back in is a
/// caller bug and is not detected.
pub fn normalize<'a>(subset: impl IntoIterator<Item = &'a ShotRecord>) -> Vec<CourtPoint> {
    subset
        .into_iter()
        .map(|r| {
            let (x, y) = normalize_location(r.loc_x, r.loc_y);
            CourtPoint { x, y, made: r.made }
        })
        .collect()
}

/// Split into (made, missed), preserving order
pub fn partition_made(points: &[CourtPoint]) -> (Vec<CourtPoint>, Vec<CourtPoint>) {
    points.iter().partition(|p| p.made)
}
