//! Regulation half-court built from fixed primitives

use crate::constants::*;

use super::primitive::{Arc, Circle, CourtColor, CourtPrimitive, DashStyle, Rectangle, Stroke};

/// Build the ordered court primitive list.
///
/// Output depends only on the arguments: 12 primitives, plus the outer
/// court bounds as a 13th when `include_outer_bounds` is set.
pub fn build_court(
    include_outer_bounds: bool,
    line_width: f64,
    color: CourtColor,
) -> Vec<CourtPrimitive> {
    let solid = |fill: bool| Stroke {
        line_width,
        color,
        fill,
        dash: None,
    };
    let dashed = Stroke {
        dash: Some(DashStyle::Dashed),
        ..solid(false)
    };

    let rect = |origin: (f64, f64), width: f64, height: f64, fill: bool| {
        CourtPrimitive::Rectangle {
            shape: Rectangle {
                origin,
                width,
                height,
            },
            stroke: solid(fill),
        }
    };
    let arc = |center: (f64, f64), diameter: f64, start_deg: f64, end_deg: f64, stroke: Stroke| {
        CourtPrimitive::Arc {
            shape: Arc {
                center,
                width: diameter,
                height: diameter,
                start_deg,
                end_deg,
            },
            stroke,
        }
    };

    let mut court = vec![
        // Hoop
        CourtPrimitive::Circle {
            shape: Circle {
                center: (0.0, 0.0),
                radius: HOOP_RADIUS,
            },
            stroke: solid(false),
        },
        // Backboard
        rect(BACKBOARD_ORIGIN, BACKBOARD_WIDTH, BACKBOARD_HEIGHT, true),
        // Paint
        rect(OUTER_BOX_ORIGIN, OUTER_BOX_WIDTH, PAINT_HEIGHT, false),
        rect(INNER_BOX_ORIGIN, INNER_BOX_WIDTH, PAINT_HEIGHT, false),
        // Free throw circle
        arc(FREE_THROW_CENTER, FREE_THROW_DIAMETER, 0.0, 180.0, solid(false)),
        arc(FREE_THROW_CENTER, FREE_THROW_DIAMETER, 180.0, 0.0, dashed),
        // Restricted area
        arc((0.0, 0.0), RESTRICTED_DIAMETER, 0.0, 180.0, solid(false)),
        // Corner threes (zero width, drawn as lines)
        rect((-CORNER_THREE_X, BASELINE_Y), 0.0, CORNER_THREE_HEIGHT, true),
        rect((CORNER_THREE_X, BASELINE_Y), 0.0, CORNER_THREE_HEIGHT, true),
        // Three point arc
        arc(
            (0.0, 0.0),
            THREE_POINT_DIAMETER,
            THREE_POINT_START_DEG,
            THREE_POINT_END_DEG,
            solid(false),
        ),
        // Center court
        arc(CENTER_COURT, CENTER_OUTER_DIAMETER, 180.0, 0.0, solid(false)),
        arc(CENTER_COURT, CENTER_INNER_DIAMETER, 180.0, 0.0, solid(false)),
    ];

    if include_outer_bounds {
        court.push(rect(
            COURT_BOUNDS_ORIGIN,
            COURT_BOUNDS_WIDTH,
            COURT_BOUNDS_HEIGHT,
            false,
        ));
    }

    court
}
