pub mod pdftoppm;
pub mod tesseract;

use crate::error::TakeoffError;
use image::DynamicImage;
use std::process::Command;

/// One rasterized page together with its recognized text.
#[derive(Debug, Clone)]
pub struct PageContent {
    /// 1-based position in the source document.
    pub page_number: usize,
    pub image: DynamicImage,
    pub text: String,
}

/// Trait for PDF rasterization backends.
pub trait Rasterizer: Send + Sync {
    /// Render every page of the PDF, in page order.
    fn rasterize(&self, pdf_bytes: &[u8]) -> Result<Vec<DynamicImage>, TakeoffError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Trait for OCR backends.
pub trait TextRecognizer: Send + Sync {
    /// Recognize the text on one page image.
    fn recognize(&self, image: &DynamicImage) -> Result<String, TakeoffError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Whether `program` can be spawned from `PATH`.
///
/// Only a failed spawn counts as missing; some tools exit non-zero on their
/// version flag.
pub fn command_available(program: &str, version_arg: &str) -> bool {
    Command::new(program).arg(version_arg).output().is_ok()
}

/// Rasterize a PDF and OCR every page, preserving page order.
pub fn extract_pages(
    pdf_bytes: &[u8],
    rasterizer: &dyn Rasterizer,
    recognizer: &dyn TextRecognizer,
) -> Result<Vec<PageContent>, TakeoffError> {
    let images = rasterizer.rasterize(pdf_bytes)?;
    tracing::info!(
        pages = images.len(),
        rasterizer = rasterizer.backend_name(),
        "rasterized document"
    );

    let mut pages = Vec::with_capacity(images.len());
    for (i, image) in images.into_iter().enumerate() {
        let text = recognizer.recognize(&image)?;
        tracing::debug!(
            page = i + 1,
            chars = text.len(),
            recognizer = recognizer.backend_name(),
            "recognized page text"
        );
        pages.push(PageContent {
            page_number: i + 1,
            image,
            text,
        });
    }

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_command_is_unavailable() {
        assert!(!command_available("takeoff-no-such-tool", "--version"));
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_is_available() {
        assert!(command_available("sh", "-c"));
    }
}
