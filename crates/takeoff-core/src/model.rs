use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// One schedule row: column header -> cell text, in header order.
pub type ScheduleRow = IndexMap<String, String>;

/// Schedule rows in document order. Duplicate type marks are kept.
pub type LightingSchedule = Vec<ScheduleRow>;

/// Emergency fixture counts derived from a lighting schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyCount {
    pub total_emergency_lights: usize,
    #[serde(rename = "2x4_recessed_led_luminaire")]
    pub recessed_2x4_led_luminaire: usize,
    pub wallpack_with_photocell: usize,
    /// Emergency type marks that matched no specific category.
    pub other_emergency_fixtures: Vec<String>,
}

/// A shaded shape found on a page image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedMarker {
    /// `[x1, y1, x2, y2]` in pixels; `x2`/`y2` are exclusive.
    pub bbox: [u32; 4],
    /// Contour polygon area in px².
    pub area: f64,
}

impl DetectedMarker {
    pub fn width(&self) -> u32 {
        self.bbox[2] - self.bbox[0]
    }

    pub fn height(&self) -> u32 {
        self.bbox[3] - self.bbox[1]
    }

    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width()) / f64::from(self.height())
    }
}

/// Detected markers per page, keyed by 1-based page number.
///
/// Serialized as a JSON object with `page_<n>` keys in ascending page order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutDetections(BTreeMap<usize, Vec<DetectedMarker>>);

impl LayoutDetections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, page_number: usize, markers: Vec<DetectedMarker>) {
        self.0.insert(page_number, markers);
    }

    pub fn get(&self, page_number: usize) -> Option<&[DetectedMarker]> {
        self.0.get(&page_number).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &[DetectedMarker])> {
        self.0.iter().map(|(page, markers)| (*page, markers.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total_markers(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}

impl Serialize for LayoutDetections {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (page, markers) in &self.0 {
            map.serialize_entry(&format!("page_{page}"), markers)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EmergencyLightingSummary {
    pub from_schedule_count: EmergencyCount,
    pub detected_lights_on_layouts: LayoutDetections,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractedContent {
    pub file_name: String,
    pub general_notes: String,
    pub lighting_schedule: LightingSchedule,
}

/// Everything extracted from one drawing set.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub file_name: String,
    pub emergency_lighting_summary: EmergencyLightingSummary,
    pub extracted_content: ExtractedContent,
}

impl Report {
    pub fn general_notes(&self) -> &str {
        &self.extracted_content.general_notes
    }

    pub fn lighting_schedule(&self) -> &[ScheduleRow] {
        &self.extracted_content.lighting_schedule
    }

    pub fn emergency_count(&self) -> &EmergencyCount {
        &self.emergency_lighting_summary.from_schedule_count
    }

    pub fn detections(&self) -> &LayoutDetections {
        &self.emergency_lighting_summary.detected_lights_on_layouts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_detections_serialize_in_page_order() {
        let mut detections = LayoutDetections::new();
        let marker = DetectedMarker {
            bbox: [1, 2, 21, 22],
            area: 361.0,
        };
        detections.insert(10, vec![marker.clone()]);
        detections.insert(2, vec![marker]);

        let json = serde_json::to_string(&detections).unwrap();
        assert_eq!(
            json,
            r#"{"page_2":[{"bbox":[1,2,21,22],"area":361.0}],"page_10":[{"bbox":[1,2,21,22],"area":361.0}]}"#
        );
    }

    #[test]
    fn test_emergency_count_field_names() {
        let value = serde_json::to_value(EmergencyCount::default()).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("total_emergency_lights"));
        assert!(obj.contains_key("2x4_recessed_led_luminaire"));
        assert!(obj.contains_key("wallpack_with_photocell"));
        assert!(obj.contains_key("other_emergency_fixtures"));
    }

    #[test]
    fn test_marker_geometry() {
        let marker = DetectedMarker {
            bbox: [100, 100, 160, 130],
            area: 1711.0,
        };
        assert_eq!(marker.width(), 60);
        assert_eq!(marker.height(), 30);
        assert_eq!(marker.aspect_ratio(), 2.0);
    }
}
