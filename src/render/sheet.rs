//! Contact sheets: several charts tiled into one image

use image::{Rgb, RgbImage, imageops};

const SHEET_BACKGROUND: Rgb<u8> = Rgb([20, 20, 20]);

/// Tile images left-to-right, top-to-bottom, `cols` per row. Cells take the
/// size of the largest image; returns `None` for an empty input.
pub fn combine_images(images: &[RgbImage], cols: u32) -> Option<RgbImage> {
    if images.is_empty() {
        return None;
    }

    let cell_w = images.iter().map(|img| img.width()).max().unwrap_or(1);
    let cell_h = images.iter().map(|img| img.height()).max().unwrap_or(1);
    let cols = cols.clamp(1, images.len() as u32);
    let rows = (images.len() as u32).div_ceil(cols);

    let mut sheet = RgbImage::from_pixel(cell_w * cols, cell_h * rows, SHEET_BACKGROUND);
    for (idx, img) in images.iter().enumerate() {
        let col = (idx as u32) % cols;
        let row = (idx as u32) / cols;
        imageops::replace(&mut sheet, img, (col * cell_w) as i64, (row * cell_h) as i64);
    }
    Some(sheet)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiles_in_rows() {
        let red = RgbImage::from_pixel(4, 3, Rgb([255, 0, 0]));
        let blue = RgbImage::from_pixel(4, 3, Rgb([0, 0, 255]));
        let sheet = combine_images(&[red.clone(), blue, red], 2).unwrap();
        assert_eq!(sheet.dimensions(), (8, 6));
        assert_eq!(*sheet.get_pixel(0, 0), Rgb([255, 0, 0]));
        assert_eq!(*sheet.get_pixel(5, 0), Rgb([0, 0, 255]));
        assert_eq!(*sheet.get_pixel(1, 4), Rgb([255, 0, 0]));
        // Empty slot keeps the background
        assert_eq!(*sheet.get_pixel(6, 4), SHEET_BACKGROUND);
    }

    #[test]
    fn empty_input() {
        assert!(combine_images(&[], 4).is_none());
    }
}
