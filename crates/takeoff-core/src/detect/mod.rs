use crate::config::DetectorConfig;
use crate::model::DetectedMarker;
use image::{DynamicImage, GrayImage};
use imageproc::contours::{find_contours, BorderType, Contour};
use imageproc::contrast::{threshold, ThresholdType};
use imageproc::geometry::contour_area;

/// Find filled dark rectangles on a page image.
///
/// Markers are returned in contour discovery order. Overlapping boxes are
/// neither merged nor deduplicated.
pub fn detect_shaded_markers(image: &DynamicImage, config: &DetectorConfig) -> Vec<DetectedMarker> {
    detect_in_gray(&image.to_luma8(), config)
}

/// Same as [`detect_shaded_markers`] for an image that is already grayscale.
pub fn detect_in_gray(gray: &GrayImage, config: &DetectorConfig) -> Vec<DetectedMarker> {
    // Pixels at or below the threshold become foreground.
    let mask = threshold(gray, config.intensity_threshold, ThresholdType::BinaryInverted);
    let contours = find_contours::<u32>(&mask);

    let markers: Vec<DetectedMarker> = contours
        .iter()
        .filter(|c| is_external(c))
        .filter_map(measure)
        .filter(|m| passes_filter(m, config))
        .collect();

    tracing::debug!(
        contours = contours.len(),
        markers = markers.len(),
        "shaded marker detection"
    );
    markers
}

/// Outer borders not nested inside another region's hole.
fn is_external(contour: &Contour<u32>) -> bool {
    contour.border_type == BorderType::Outer && contour.parent.is_none()
}

fn measure(contour: &Contour<u32>) -> Option<DetectedMarker> {
    let first = contour.points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &contour.points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    Some(DetectedMarker {
        bbox: [min_x, min_y, max_x + 1, max_y + 1],
        area: contour_area(&contour.points).abs(),
    })
}

fn passes_filter(marker: &DetectedMarker, config: &DetectorConfig) -> bool {
    let ratio = marker.aspect_ratio();
    marker.area > config.min_area
        && marker.width() > config.min_side
        && marker.height() > config.min_side
        && ratio > config.aspect_low
        && ratio < config.aspect_high
}
