use crate::error::TakeoffError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// All heuristic constants used by the pipeline.
///
/// Every section is `#[serde(default)]`, so a config file only needs to
/// name the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TakeoffConfig {
    pub notes: NotesConfig,
    pub schedule: ScheduleConfig,
    pub classifier: ClassifierConfig,
    pub detector: DetectorConfig,
    /// Pages whose OCR text contains this phrase (case-insensitive) are
    /// scanned for shaded markers.
    pub floor_plan_marker: String,
    /// Resolution used when rasterizing PDF pages.
    pub raster_dpi: u32,
    /// Tesseract language code, e.g. "eng". `None` uses tesseract's default.
    pub ocr_language: Option<String>,
}

impl Default for TakeoffConfig {
    fn default() -> Self {
        TakeoffConfig {
            notes: NotesConfig::default(),
            schedule: ScheduleConfig::default(),
            classifier: ClassifierConfig::default(),
            detector: DetectorConfig::default(),
            floor_plan_marker: "floor plan".into(),
            raster_dpi: 72,
            ocr_language: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotesConfig {
    /// A line containing any of these (case-insensitive) starts a section.
    pub title_markers: Vec<String>,
    /// The first of these found after a section start ends it.
    pub terminator_markers: Vec<String>,
}

impl Default for NotesConfig {
    fn default() -> Self {
        NotesConfig {
            title_markers: vec!["GENERAL SHEET NOTES".into()],
            terminator_markers: vec!["KEYNOTES".into()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Accepted spellings of the type-identifier header, including OCR misreadings.
    pub header_markers: Vec<String>,
    pub delimiter: char,
    /// Canonical name of the type-identifier column in parsed rows.
    pub type_mark_column: String,
    pub description_column: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        ScheduleConfig {
            header_markers: vec!["TYPE MARK".into(), "TYPE MARR".into()],
            delimiter: ',',
            type_mark_column: "TYPE MARK".into(),
            description_column: "DESCRIPTION".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Type marks ending with this suffix are emergency fixtures.
    pub emergency_suffix: String,
    /// Lower-case phrase identifying a 2x4 recessed luminaire description.
    pub recessed_phrase: String,
    /// Exact type mark of the wall-pack with photocell.
    pub wallpack_mark: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            emergency_suffix: "E".into(),
            recessed_phrase: "2' x 4' recessed".into(),
            wallpack_mark: "W".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Grayscale pixels at or below this value are foreground.
    pub intensity_threshold: u8,
    /// Contour area (px²) must be strictly greater than this.
    pub min_area: f64,
    /// Bounding box width and height must be strictly greater than this.
    pub min_side: u32,
    /// Exclusive lower bound of width / height.
    pub aspect_low: f64,
    /// Exclusive upper bound of width / height.
    pub aspect_high: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            intensity_threshold: 150,
            min_area: 100.0,
            min_side: 10,
            aspect_low: 0.5,
            aspect_high: 2.0,
        }
    }
}

/// Load a config from a JSON file.
pub fn load_config(path: &Path) -> Result<TakeoffConfig, TakeoffError> {
    let content = std::fs::read_to_string(path).map_err(|e| TakeoffError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let config: TakeoffConfig =
        serde_json::from_str(&content).map_err(|e| TakeoffError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse a config from a JSON string (no file path context).
pub fn parse_config_str(json: &str) -> Result<TakeoffConfig, TakeoffError> {
    let config: TakeoffConfig = serde_json::from_str(json)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate that a config is usable.
pub fn validate_config(config: &TakeoffConfig) -> Result<(), TakeoffError> {
    require_markers("notes.title_markers", &config.notes.title_markers)?;
    require_markers("notes.terminator_markers", &config.notes.terminator_markers)?;
    require_markers("schedule.header_markers", &config.schedule.header_markers)?;

    if config.schedule.type_mark_column.trim().is_empty() {
        return Err(TakeoffError::ConfigInvalid(
            "schedule.type_mark_column must not be empty".into(),
        ));
    }

    if matches!(config.schedule.delimiter, '\n' | '\r') {
        return Err(TakeoffError::ConfigInvalid(
            "schedule.delimiter must not be a line break".into(),
        ));
    }

    if config.classifier.emergency_suffix.is_empty() {
        return Err(TakeoffError::ConfigInvalid(
            "classifier.emergency_suffix must not be empty".into(),
        ));
    }

    let d = &config.detector;
    if !(d.aspect_low.is_finite() && d.aspect_high.is_finite()) || d.aspect_low <= 0.0 {
        return Err(TakeoffError::ConfigInvalid(format!(
            "detector aspect band ({}, {}) must be positive and finite",
            d.aspect_low, d.aspect_high
        )));
    }
    if d.aspect_low >= d.aspect_high {
        return Err(TakeoffError::ConfigInvalid(format!(
            "detector.aspect_low ({}) must be below detector.aspect_high ({})",
            d.aspect_low, d.aspect_high
        )));
    }
    if !d.min_area.is_finite() || d.min_area < 0.0 {
        return Err(TakeoffError::ConfigInvalid(format!(
            "detector.min_area ({}) must be a non-negative number",
            d.min_area
        )));
    }

    if config.raster_dpi == 0 {
        return Err(TakeoffError::ConfigInvalid("raster_dpi must be positive".into()));
    }

    Ok(())
}

fn require_markers(field: &str, markers: &[String]) -> Result<(), TakeoffError> {
    if markers.is_empty() || markers.iter().any(|m| m.trim().is_empty()) {
        return Err(TakeoffError::ConfigInvalid(format!(
            "{field} must list at least one non-empty marker"
        )));
    }
    Ok(())
}
