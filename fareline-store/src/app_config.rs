use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

use fareline_core::itinerary::DEFAULT_SCHEDULE_YEAR;
use fareline_core::script::DEFAULT_AGENCY_LINE;
use fareline_core::RenderOptions;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub lookup: LookupConfig,
    #[serde(default)]
    pub ocr: OcrConfig,
    #[serde(default)]
    pub itinerary: ItineraryConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub agency: AgencyConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LookupConfig {
    #[serde(default = "default_commission_table")]
    pub commission_table: PathBuf,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self { commission_table: default_commission_table() }
    }
}

fn default_commission_table() -> PathBuf {
    PathBuf::from("data/flight_commissions.csv")
}

#[derive(Debug, Deserialize, Clone)]
pub struct OcrConfig {
    /// Tesseract binary, resolved through PATH when not absolute
    #[serde(default = "default_tesseract")]
    pub tesseract_path: PathBuf,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self { tesseract_path: default_tesseract() }
    }
}

fn default_tesseract() -> PathBuf {
    PathBuf::from("tesseract")
}

#[derive(Debug, Deserialize, Clone)]
pub struct ItineraryConfig {
    #[serde(default = "default_schedule_year")]
    pub schedule_year: u8,
}

impl Default for ItineraryConfig {
    fn default() -> Self {
        Self { schedule_year: default_schedule_year() }
    }
}

fn default_schedule_year() -> u8 { DEFAULT_SCHEDULE_YEAR }

#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { output_dir: default_output_dir() }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Deserialize, Clone)]
pub struct AgencyConfig {
    #[serde(default = "default_agency_line")]
    pub reference_line: String,
}

impl Default for AgencyConfig {
    fn default() -> Self {
        Self { reference_line: default_agency_line() }
    }
}

fn default_agency_line() -> String {
    DEFAULT_AGENCY_LINE.to_string()
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new("config"))
    }

    pub fn load_from(dir: &Path) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Every key has a default, so even the base file is optional
            .add_source(config::File::from(dir.join("default")).required(false))
            .add_source(config::File::from(dir.join(&run_mode)).required(false))
            // Machine-local overrides, not checked in
            .add_source(config::File::from(dir.join("local")).required(false))
            // Eg.. `FARELINE_OCR__TESSERACT_PATH=/opt/homebrew/bin/tesseract`
            .add_source(
                config::Environment::with_prefix("FARELINE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        s.try_deserialize()
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            schedule_year: self.itinerary.schedule_year,
            agency_line: self.agency.reference_line.clone(),
        }
    }
}
