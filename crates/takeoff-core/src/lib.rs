pub mod classify;
pub mod config;
pub mod detect;
pub mod error;
pub mod extraction;
pub mod model;
pub mod overlay;
pub mod parsing;

use classify::count_emergency_fixtures;
use config::TakeoffConfig;
use detect::detect_shaded_markers;
use error::TakeoffError;
use extraction::{PageContent, Rasterizer, TextRecognizer};
use model::{
    EmergencyCount, EmergencyLightingSummary, ExtractedContent, LayoutDetections,
    LightingSchedule, Report,
};
use parsing::{extract_general_notes, extract_lighting_schedule};

/// Main API entry point: rasterize, OCR and analyze a PDF drawing set.
///
/// Any rasterization or OCR failure aborts the whole document; no partial
/// report is produced.
pub fn process_pdf(
    file_name: &str,
    pdf_bytes: &[u8],
    rasterizer: &dyn Rasterizer,
    recognizer: &dyn TextRecognizer,
    config: &TakeoffConfig,
) -> Result<ProcessedDocument, TakeoffError> {
    tracing::info!(file = file_name, "processing file");
    let pages = extraction::extract_pages(pdf_bytes, rasterizer, recognizer)?;
    let report = process_pages(file_name, &pages, config);
    Ok(ProcessedDocument { report, pages })
}

/// A report together with the pages it was built from, so callers can
/// render overlays without rasterizing again.
#[derive(Debug, Clone)]
pub struct ProcessedDocument {
    pub report: Report,
    pub pages: Vec<PageContent>,
}

/// Analyze already rasterized and recognized pages.
///
/// Marker detection only runs on pages whose text contains the floor-plan
/// marker; pages without detections get no entry in the layout map.
pub fn process_pages(file_name: &str, pages: &[PageContent], config: &TakeoffConfig) -> Report {
    // Newline keeps a page's last line apart from the next page's first.
    let all_text = pages
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    let general_notes = extract_general_notes(&all_text, &config.notes);
    let schedule = extract_lighting_schedule(&all_text, &config.schedule);
    let counts = count_emergency_fixtures(&schedule, &config.schedule, &config.classifier);

    let floor_plan_marker = config.floor_plan_marker.to_lowercase();
    let mut detections = LayoutDetections::new();
    for page in pages {
        if !page.text.to_lowercase().contains(&floor_plan_marker) {
            tracing::debug!(page = page.page_number, "not a floor plan, skipping detection");
            continue;
        }
        let markers = detect_shaded_markers(&page.image, &config.detector);
        tracing::info!(page = page.page_number, markers = markers.len(), "floor plan scanned");
        if !markers.is_empty() {
            detections.insert(page.page_number, markers);
        }
    }

    assemble_report(file_name, general_notes, schedule, counts, detections)
}

/// Merge the outputs of every stage into one report.
pub fn assemble_report(
    file_name: &str,
    general_notes: String,
    lighting_schedule: LightingSchedule,
    counts: EmergencyCount,
    detections: LayoutDetections,
) -> Report {
    Report {
        file_name: file_name.to_string(),
        emergency_lighting_summary: EmergencyLightingSummary {
            from_schedule_count: counts,
            detected_lights_on_layouts: detections,
        },
        extracted_content: ExtractedContent {
            file_name: file_name.to_string(),
            general_notes,
            lighting_schedule,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage};

    fn page_with_square(page_number: usize, text: &str) -> PageContent {
        let mut img = RgbImage::from_pixel(120, 120, Rgb([255, 255, 255]));
        for y in 30..70 {
            for x in 30..70 {
                img.put_pixel(x, y, Rgb([0, 0, 0]));
            }
        }
        PageContent {
            page_number,
            image: DynamicImage::ImageRgb8(img),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_detection_only_on_floor_plan_pages() {
        let pages = vec![
            page_with_square(1, "COVER SHEET"),
            page_with_square(2, "FIRST FLOOR PLAN - LIGHTING"),
        ];
        let report = process_pages("set.pdf", &pages, &TakeoffConfig::default());

        assert_eq!(report.detections().len(), 1);
        assert!(report.detections().get(1).is_none());
        assert_eq!(report.detections().get(2).map(|m| m.len()), Some(1));
    }

    #[test]
    fn test_floor_plan_page_without_markers_has_no_entry() {
        let blank = PageContent {
            page_number: 1,
            image: DynamicImage::ImageRgb8(RgbImage::from_pixel(50, 50, Rgb([255, 255, 255]))),
            text: "floor plan".into(),
        };
        let report = process_pages("set.pdf", &[blank], &TakeoffConfig::default());
        assert!(report.detections().is_empty());
    }

    #[test]
    fn test_page_texts_are_joined_with_newlines() {
        // A space join would fold the second page's row into the header line.
        let pages = vec![
            page_with_square(1, "TYPE MARK, DESCRIPTION"),
            page_with_square(2, "W, wallpack with photocell"),
        ];
        let report = process_pages("set.pdf", &pages, &TakeoffConfig::default());
        assert_eq!(report.lighting_schedule().len(), 1);
        assert_eq!(report.emergency_count().wallpack_with_photocell, 1);
    }

    #[test]
    fn test_empty_document_gives_empty_report() {
        let report = process_pages("empty.pdf", &[], &TakeoffConfig::default());
        assert_eq!(report.file_name, "empty.pdf");
        assert_eq!(report.general_notes(), "");
        assert!(report.lighting_schedule().is_empty());
        assert_eq!(*report.emergency_count(), EmergencyCount::default());
        assert!(report.detections().is_empty());
    }
}
