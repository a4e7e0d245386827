//! Court geometry model

mod geometry;
mod primitive;

pub use geometry::build_court;
pub use primitive::{Arc, Circle, CourtColor, CourtPrimitive, DashStyle, Rectangle, Stroke};
