use crate::error::TakeoffError;
use crate::extraction::{command_available, Rasterizer};
use image::DynamicImage;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

const OUTPUT_PREFIX: &str = "page";

/// PDF rasterization backend using pdftoppm (from poppler-utils).
///
/// Renders every page to PNG in a temporary directory and loads them back
/// in page order.
pub struct PdftoppmRasterizer {
    dpi: u32,
}

impl PdftoppmRasterizer {
    pub fn new(dpi: u32) -> Self {
        PdftoppmRasterizer { dpi }
    }

    /// Check if pdftoppm is available on the system.
    pub fn is_available() -> bool {
        command_available("pdftoppm", "-v")
    }
}

impl Default for PdftoppmRasterizer {
    fn default() -> Self {
        Self::new(72)
    }
}

impl Rasterizer for PdftoppmRasterizer {
    fn rasterize(&self, pdf_bytes: &[u8]) -> Result<Vec<DynamicImage>, TakeoffError> {
        let workdir = tempfile::tempdir().map_err(|e| TakeoffError::Rasterize(e.to_string()))?;

        let pdf_path = workdir.path().join("input.pdf");
        let mut pdf_file = std::fs::File::create(&pdf_path)
            .map_err(|e| TakeoffError::Rasterize(e.to_string()))?;
        pdf_file
            .write_all(pdf_bytes)
            .map_err(|e| TakeoffError::Rasterize(e.to_string()))?;
        drop(pdf_file);

        let output = Command::new("pdftoppm")
            .arg("-png")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg(&pdf_path)
            .arg(workdir.path().join(OUTPUT_PREFIX))
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    TakeoffError::PdftoppmNotFound
                } else {
                    TakeoffError::Rasterize(format!("pdftoppm failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(TakeoffError::PdftoppmFailed { code, stderr });
        }

        let page_files = collect_page_files(workdir.path())?;
        if page_files.is_empty() {
            return Err(TakeoffError::Rasterize(
                "pdftoppm produced no pages".into(),
            ));
        }

        page_files
            .iter()
            .map(|path| image::open(path).map_err(TakeoffError::from))
            .collect()
    }

    fn backend_name(&self) -> &str {
        "pdftoppm"
    }
}

/// List `page-<n>.png` files in page order.
///
/// pdftoppm zero-pads the page number to the width of the page count, but
/// sorting on the parsed number keeps this independent of that.
fn collect_page_files(dir: &Path) -> Result<Vec<PathBuf>, TakeoffError> {
    let mut pages: Vec<(usize, PathBuf)> = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(number) = page_number_from_file_name(name) {
            pages.push((number, path));
        }
    }
    pages.sort_by_key(|(number, _)| *number);
    Ok(pages.into_iter().map(|(_, path)| path).collect())
}

fn page_number_from_file_name(name: &str) -> Option<usize> {
    name.strip_prefix(OUTPUT_PREFIX)?
        .strip_prefix('-')?
        .strip_suffix(".png")?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_number_from_file_name() {
        assert_eq!(page_number_from_file_name("page-1.png"), Some(1));
        assert_eq!(page_number_from_file_name("page-012.png"), Some(12));
        assert_eq!(page_number_from_file_name("input.pdf"), None);
        assert_eq!(page_number_from_file_name("page-x.png"), None);
    }

    #[test]
    fn test_collect_page_files_sorts_numerically() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["page-10.png", "page-2.png", "page-1.png", "input.pdf"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }

        let files = collect_page_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["page-1.png", "page-2.png", "page-10.png"]);
    }
}
