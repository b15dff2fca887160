use std::fs;
use std::path::{Path, PathBuf};

use fareline_core::GeneratedScripts;

use crate::StoreError;

/// Delivers booking summaries to a directory on disk.
///
/// Files are named after the PNR and replaced on every write, so the
/// last submission for a PNR is the one on disk.
pub struct SummaryWriter {
    output_dir: PathBuf,
}

impl SummaryWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self { output_dir: output_dir.into() }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn write(&self, generated: &GeneratedScripts) -> Result<PathBuf, StoreError> {
        self.write_bytes(&generated.summary_file_name, &generated.summary_csv)
    }

    pub fn write_bytes(&self, file_name: &str, contents: &[u8]) -> Result<PathBuf, StoreError> {
        let export_error = |e: std::io::Error, path: &Path| StoreError::Export {
            path: path.display().to_string(),
            source: e,
        };

        fs::create_dir_all(&self.output_dir).map_err(|e| export_error(e, &self.output_dir))?;
        let path = self.output_dir.join(file_name);
        fs::write(&path, contents).map_err(|e| export_error(e, &path))?;

        tracing::info!("Wrote booking summary to {}", path.display());
        Ok(path)
    }
}
