use serde::Serialize;

use crate::itinerary::FlightLine;
use crate::{CoreError, CoreResult};

pub const SUMMARY_HEADER: [&str; 10] = [
    "No of Pax",
    "Origin",
    "Route",
    "Dept. Date",
    "Dept. Time",
    "Flight No",
    "Arr. Date",
    "Arr. Time",
    "PNR",
    "EMD Status",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EmdStatus {
    Issued,
}

/// One row of the booking summary. Passenger count, PNR and status are
/// declared on the first row only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub passenger_count: Option<u32>,
    pub origin: String,
    pub route: String,
    pub departure_date: String,
    pub departure_time: String,
    pub flight_number: String,
    pub arrival_date: String,
    pub arrival_time: String,
    pub pnr: Option<String>,
    pub status: Option<EmdStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryTable {
    pub rows: Vec<SummaryRow>,
}

/// Build one summary row per flight line, in input order
pub fn export_rows(flights: &[FlightLine], passenger_count: u32, pnr: &str) -> SummaryTable {
    let rows = flights
        .iter()
        .enumerate()
        .map(|(i, flight)| {
            let first = i == 0;
            SummaryRow {
                passenger_count: first.then_some(passenger_count),
                origin: flight.origin().to_string(),
                route: flight.route_display(),
                departure_date: flight.departure_date_display(),
                departure_time: flight.departure_time_display(),
                flight_number: flight.flight_number_display(),
                arrival_date: flight.arrival_date_display(),
                arrival_time: flight.arrival_time_display(),
                pnr: first.then(|| pnr.to_string()),
                status: first.then_some(EmdStatus::Issued),
            }
        })
        .collect();

    SummaryTable { rows }
}

impl SummaryTable {
    /// Serialize as comma-separated text with the fixed header row.
    /// Empty cells are written as empty fields.
    pub fn to_csv(&self) -> CoreResult<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(SUMMARY_HEADER).map_err(export_error)?;
        for row in &self.rows {
            writer.serialize(row).map_err(export_error)?;
        }

        writer
            .into_inner()
            .map_err(|e| CoreError::Export(e.to_string()))
    }
}

/// File name the summary is delivered under, `<PNR>_booking_summary.csv`.
/// Characters that are not ASCII alphanumeric are replaced with `_` so a
/// PNR can never address another directory.
pub fn summary_file_name(pnr: &str) -> String {
    let safe: String = pnr
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{}_booking_summary.csv", safe)
}

fn export_error(e: csv::Error) -> CoreError {
    CoreError::Export(e.to_string())
}
