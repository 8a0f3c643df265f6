use std::path::{Path, PathBuf};
use takeoff_core::config::{self, TakeoffConfig};
use takeoff_core::error::TakeoffError;
use takeoff_core::extraction::pdftoppm::PdftoppmRasterizer;
use takeoff_core::extraction::tesseract::TesseractRecognizer;
use takeoff_core::overlay::save_overlay;
use takeoff_core::ProcessedDocument;

use crate::output;
use crate::ProcessArgs;

pub fn run(input_file: PathBuf, args: &ProcessArgs) -> Result<(), TakeoffError> {
    let config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => TakeoffConfig::default(),
    };

    std::fs::create_dir_all(&args.out_dir)?;

    eprintln!("Processing file: {}", input_file.display());
    let pdf_bytes = std::fs::read(&input_file)?;
    let file_name = input_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input_file.display().to_string());

    ensure_backends()?;
    let rasterizer = PdftoppmRasterizer::new(config.raster_dpi);
    let recognizer = TesseractRecognizer::new(config.ocr_language.clone());
    let doc = takeoff_core::process_pdf(&file_name, &pdf_bytes, &rasterizer, &recognizer, &config)?;

    if !args.no_overlays {
        write_overlays(&doc, &args.out_dir)?;
    }

    let report_path = args.out_dir.join(report_file_name(&input_file));
    output::json::write(&doc.report, &report_path)?;

    match args.format.as_str() {
        "json" => output::json::print(&doc.report)?,
        _ => output::summary::print(&doc.report),
    }

    eprintln!("Processing complete. Report saved to {}", report_path.display());
    Ok(())
}

/// Fail before any work if an external tool is missing.
fn ensure_backends() -> Result<(), TakeoffError> {
    if !PdftoppmRasterizer::is_available() {
        return Err(TakeoffError::PdftoppmNotFound);
    }
    if !TesseractRecognizer::is_available() {
        return Err(TakeoffError::TesseractNotFound);
    }
    Ok(())
}

fn write_overlays(doc: &ProcessedDocument, out_dir: &Path) -> Result<(), TakeoffError> {
    for (page_number, markers) in doc.report.detections().iter() {
        let Some(page) = doc.pages.iter().find(|p| p.page_number == page_number) else {
            continue;
        };
        let path = out_dir.join(format!("detected_lights_page_{page_number}.png"));
        save_overlay(&page.image, markers, &path)?;
        tracing::info!(page = page_number, path = %path.display(), "saved visualization");
    }
    Ok(())
}

/// `drawings/E-set.pdf` -> `report_E-set.json`
fn report_file_name(input_file: &Path) -> String {
    let stem = input_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".into());
    format!("report_{stem}.json")
}
