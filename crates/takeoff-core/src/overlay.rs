use crate::error::TakeoffError;
use crate::model::DetectedMarker;
use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, Blend};
use imageproc::rect::Rect;
use std::path::Path;

const FILL: Rgba<u8> = Rgba([255, 0, 0, 100]);
const OUTLINE: Rgba<u8> = Rgba([255, 0, 0, 255]);
const OUTLINE_WIDTH: u32 = 2;

/// Overlay a translucent red box with a solid outline on every marker.
pub fn draw_markers(page: &DynamicImage, markers: &[DetectedMarker]) -> RgbaImage {
    let mut canvas = page.to_rgba8();

    for marker in markers {
        let [x1, y1, _, _] = marker.bbox;
        let (mut w, mut h) = (marker.width(), marker.height());
        if w == 0 || h == 0 {
            continue;
        }

        let mut blended = Blend(canvas);
        draw_filled_rect_mut(&mut blended, Rect::at(x1 as i32, y1 as i32).of_size(w, h), FILL);
        canvas = blended.0;

        for inset in 0..OUTLINE_WIDTH {
            if w == 0 || h == 0 {
                break;
            }
            let rect = Rect::at((x1 + inset) as i32, (y1 + inset) as i32).of_size(w, h);
            draw_hollow_rect_mut(&mut canvas, rect, OUTLINE);
            w = w.saturating_sub(2);
            h = h.saturating_sub(2);
        }
    }

    canvas
}

/// Draw the markers and write the result as PNG.
pub fn save_overlay(
    page: &DynamicImage,
    markers: &[DetectedMarker],
    path: &Path,
) -> Result<(), TakeoffError> {
    draw_markers(page, markers).save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}
