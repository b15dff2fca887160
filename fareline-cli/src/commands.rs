use anyhow::Context;
use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use fareline_core::carrier::MANUAL_CARRIER_LABEL;
use fareline_core::{
    generate, resolve_fares, CommissionLookup, FareReader, GeneratedScripts, RenderOptions,
};
use fareline_store::app_config::Config;
use fareline_store::{CommissionTable, SummaryWriter, TesseractReader};

use crate::cli::GenerateArgs;
use crate::request::SubmissionRequest;

/// Result of `generate` as printed with `--json`
#[derive(Debug, Serialize)]
pub struct GenerateReport<'a> {
    #[serde(flatten)]
    pub generated: &'a GeneratedScripts,
    pub summary_path: Option<&'a Path>,
}

/// Load the commission table. Without it no carrier can be selected,
/// so failure ends the run.
pub fn load_commission_table(config: &Config) -> anyhow::Result<CommissionTable> {
    CommissionTable::load(&config.lookup.commission_table)
        .context("Failed to load flight commission table")
}

/// Turn a request into generated scripts: resolve the carrier, read fares
/// from the screenshot if there is one, then run the core.
pub fn prepare(
    request: SubmissionRequest,
    lookup: &dyn CommissionLookup,
    reader: &dyn FareReader,
    screenshot: Option<&Path>,
    options: &RenderOptions,
    issued_at: NaiveDateTime,
) -> anyhow::Result<GeneratedScripts> {
    let carrier = request.carrier_selection().resolve(lookup)?;
    let fares = resolve_fares(request.manual_fares(), reader, screenshot);
    let submission = request.into_submission(carrier, fares);
    Ok(generate(&submission, options, issued_at)?)
}

pub fn generate_scripts(args: &GenerateArgs, config: &Config) -> anyhow::Result<String> {
    let table = load_commission_table(config)?;
    let request = SubmissionRequest::from_path(&args.submission)?;

    let screenshot: Option<PathBuf> = args
        .screenshot
        .clone()
        .or_else(|| request.fare_screenshot.clone());
    let reader = TesseractReader::new(&config.ocr.tesseract_path);

    let generated = prepare(
        request,
        &table,
        &reader,
        screenshot.as_deref(),
        &config.render_options(),
        Local::now().naive_local(),
    )?;

    let summary_path = if args.no_export {
        None
    } else {
        let out_dir = args
            .out_dir
            .clone()
            .unwrap_or_else(|| config.export.output_dir.clone());
        Some(SummaryWriter::new(out_dir).write(&generated)?)
    };

    if args.json {
        let report = GenerateReport {
            generated: &generated,
            summary_path: summary_path.as_deref(),
        };
        Ok(serde_json::to_string_pretty(&report)?)
    } else {
        Ok(render_text(&generated, summary_path.as_deref()))
    }
}

/// Console layout: both scripts under their titles, then the summary location
pub fn render_text(generated: &GeneratedScripts, summary_path: Option<&Path>) -> String {
    let mut out = String::new();
    for script in [&generated.blocking, &generated.emd] {
        let _ = writeln!(out, "== {} ==", script.kind.title());
        let _ = writeln!(out, "{}", script);
        out.push('\n');
    }
    if generated.adjustment.is_calculated() {
        let _ = writeln!(out, "Auto-calculated EMD: INR {}", generated.adjustment.amount());
    }
    match summary_path {
        Some(path) => {
            let _ = writeln!(out, "Booking summary: {}", path.display());
        }
        None => {
            let _ = writeln!(out, "Booking summary: not written ({})", generated.summary_file_name);
        }
    }
    out
}

pub fn list_carriers(config: &Config) -> anyhow::Result<String> {
    let table = load_commission_table(config)?;
    let mut out = String::new();
    for airline in table.airlines() {
        if let Some(c) = table.commission_for(&airline) {
            let _ = writeln!(
                out,
                "{:<28} {:<4} basic {:>5} overall {:>5}",
                airline, c.flight_code, c.basic_rate, c.overall_rate
            );
        }
    }
    let _ = writeln!(out, "{}", MANUAL_CARRIER_LABEL);
    Ok(out)
}

pub fn read_fares(image: &Path, config: &Config) -> anyhow::Result<String> {
    let reader = TesseractReader::new(&config.ocr.tesseract_path);
    let quote = reader
        .read_fares(image)
        .with_context(|| format!("OCR failed for {}", image.display()))?;
    Ok(format!(
        "Basic Fare = INR {}\nTotal Fare = INR {}\n",
        quote.basic_fare, quote.total_fare
    ))
}
