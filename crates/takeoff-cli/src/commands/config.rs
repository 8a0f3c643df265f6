use std::path::Path;
use takeoff_core::config::{load_config, TakeoffConfig};
use takeoff_core::error::TakeoffError;

pub fn show() -> Result<(), TakeoffError> {
    let json = serde_json::to_string_pretty(&TakeoffConfig::default())?;
    println!("{json}");
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), TakeoffError> {
    let config = load_config(file)?;

    println!("Config '{}' is valid.", file.display());
    println!("  Notes titles:    {}", config.notes.title_markers.join(", "));
    println!("  Notes end:       {}", config.notes.terminator_markers.join(", "));
    println!("  Schedule header: {}", config.schedule.header_markers.join(", "));
    println!(
        "  Detector:        threshold {}, min area {}, min side {}, aspect ({}, {})",
        config.detector.intensity_threshold,
        config.detector.min_area,
        config.detector.min_side,
        config.detector.aspect_low,
        config.detector.aspect_high
    );

    // Settings that parse but tend to produce nothing useful.
    let mut warnings = Vec::new();
    if config.detector.intensity_threshold == u8::MAX {
        warnings.push("intensity_threshold 255 marks every pixel as foreground".to_string());
    }
    if config.floor_plan_marker.trim().is_empty() {
        warnings.push("empty floor_plan_marker runs detection on every page".to_string());
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
