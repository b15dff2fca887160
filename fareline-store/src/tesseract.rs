use std::path::{Path, PathBuf};
use std::process::Command;

use fareline_core::fare_reader::{extract_fares, FareQuote, FareReadError, FareReader};

/// Reads fare screenshots with the `tesseract` command-line engine
#[derive(Debug, Clone)]
pub struct TesseractReader {
    binary: PathBuf,
}

impl TesseractReader {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self { binary: binary.into() }
    }

    /// Run the engine and return the recognised text
    pub fn image_to_text(&self, image: &Path) -> Result<String, FareReadError> {
        if !image.is_file() {
            return Err(FareReadError::Engine(format!(
                "image not found: {}",
                image.display()
            )));
        }

        let output = Command::new(&self.binary)
            .arg(image)
            .arg("stdout")
            .output()
            .map_err(|e| {
                FareReadError::Engine(format!("failed to run {}: {}", self.binary.display(), e))
            })?;

        if !output.status.success() {
            return Err(FareReadError::Engine(format!(
                "{} exited with {}: {}",
                self.binary.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl FareReader for TesseractReader {
    fn read_fares(&self, image: &Path) -> Result<FareQuote, FareReadError> {
        let text = self.image_to_text(image)?;
        tracing::debug!("OCR produced {} lines", text.lines().count());
        extract_fares(&text)
    }
}
