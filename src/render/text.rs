//! Optional chart titles

use std::fs;
use std::path::Path;

use ab_glyph::{FontVec, PxScale};
use image::Rgb;
use imageproc::drawing::draw_text_mut;
use tracing::warn;

use super::canvas::CourtCanvas;

const TITLE_SCALE: f32 = 22.0;
const SUBTITLE_SCALE: f32 = 14.0;

/// Load a TTF/OTF font. Failures are logged and yield `None`: a chart
/// without a title is still a chart.
pub fn load_font(path: &Path) -> Option<FontVec> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to read font {}: {}", path.display(), e);
            return None;
        }
    };
    match FontVec::try_from_vec(bytes) {
        Ok(font) => Some(font),
        Err(e) => {
            warn!("Failed to parse font {}: {}", path.display(), e);
            None
        }
    }
}

/// Title and subtitle in the band above the court
pub fn draw_title(canvas: &mut CourtCanvas, font: &FontVec, title: &str, subtitle: &str, color: Rgb<u8>) {
    if canvas.header() == 0 {
        return;
    }
    draw_text_mut(&mut canvas.image, color, 10, 4, PxScale::from(TITLE_SCALE), font, title);
    if !subtitle.is_empty() {
        let y = 4 + TITLE_SCALE as i32 + 2;
        draw_text_mut(&mut canvas.image, color, 10, y, PxScale::from(SUBTITLE_SCALE), font, subtitle);
    }
}
