use crate::error::TakeoffError;
use crate::extraction::{command_available, TextRecognizer};
use image::{DynamicImage, ImageFormat};
use std::process::Command;

/// OCR backend using the tesseract command-line tool.
pub struct TesseractRecognizer {
    language: Option<String>,
}

impl TesseractRecognizer {
    pub fn new(language: Option<String>) -> Self {
        TesseractRecognizer { language }
    }

    /// Check if tesseract is available on the system.
    pub fn is_available() -> bool {
        command_available("tesseract", "--version")
    }
}

impl Default for TesseractRecognizer {
    fn default() -> Self {
        Self::new(None)
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, image: &DynamicImage) -> Result<String, TakeoffError> {
        let tmpfile = tempfile::Builder::new()
            .suffix(".png")
            .tempfile()
            .map_err(|e| TakeoffError::Ocr(e.to_string()))?;
        image.save_with_format(tmpfile.path(), ImageFormat::Png)?;

        let mut command = Command::new("tesseract");
        command.arg(tmpfile.path()).arg("stdout");
        if let Some(lang) = &self.language {
            command.arg("-l").arg(lang);
        }

        let output = command.output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TakeoffError::TesseractNotFound
            } else {
                TakeoffError::Ocr(format!("tesseract failed: {}", e))
            }
        })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(TakeoffError::TesseractFailed { code, stderr });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn backend_name(&self) -> &str {
        "tesseract"
    }
}
