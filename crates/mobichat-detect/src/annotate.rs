use image::{Rgb, RgbImage};

use crate::client::Detection;

const BOX_COLOR: Rgb<u8> = Rgb([255, 56, 56]);
const THICKNESS: i64 = 3;

/// Draw the outline of a detection's bounding box onto the image.
///
/// Coordinates outside the image are clamped away rather than rejected; the
/// model is free to report boxes touching the border.
pub fn draw_detection(image: &mut RgbImage, detection: &Detection) {
    let x0 = detection.x as i64;
    let y0 = detection.y as i64;
    let x1 = x0 + detection.width as i64;
    let y1 = y0 + detection.height as i64;

    for t in 0..THICKNESS {
        for x in x0..=x1 {
            put_pixel_checked(image, x, y0 + t);
            put_pixel_checked(image, x, y1 - t);
        }
        for y in y0..=y1 {
            put_pixel_checked(image, x0 + t, y);
            put_pixel_checked(image, x1 - t, y);
        }
    }
}

fn put_pixel_checked(image: &mut RgbImage, x: i64, y: i64) {
    if x >= 0 && y >= 0 && (x as u32) < image.width() && (y as u32) < image.height() {
        image.put_pixel(x as u32, y as u32, BOX_COLOR);
    }
}
