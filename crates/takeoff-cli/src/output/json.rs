use std::path::Path;
use takeoff_core::error::TakeoffError;
use takeoff_core::model::Report;

pub fn print(report: &Report) -> Result<(), TakeoffError> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

pub fn write(report: &Report, path: &Path) -> Result<(), TakeoffError> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    Ok(())
}
