use anyhow::{ensure, Context};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use fareline_core::{
    BaggageAllowance, BookingContext, CarrierCommission, CarrierSelection, Company, FareInputs,
    Submission,
};

const SAMPLE_FLIGHT_TEXT: &str =
    "EK 543 21JAN MAADXB AK1 0345 0635 TU\nEK 201 22JAN DXBMAA AK1 0325 0835 TU";

/// Airline picked on the form
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CarrierChoice {
    Listed {
        airline: String,
    },
    Manual {
        flight_code: String,
        #[serde(default)]
        basic_commission: f64,
        #[serde(default)]
        overall_commission: f64,
    },
}

/// The form as submitted in a JSON file. Omitted fields take the
/// form's defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubmissionRequest {
    pub carrier: CarrierChoice,
    #[serde(default = "default_flight_text")]
    pub flight_text: String,
    #[serde(default)]
    pub basic_fare: i64,
    #[serde(default)]
    pub total_fare: i64,
    #[serde(default)]
    pub fare_screenshot: Option<PathBuf>,
    /// Falls back to the total fare when absent
    #[serde(default)]
    pub price_per_pax: Option<i64>,
    #[serde(default = "default_passenger_count")]
    pub passenger_count: u32,
    #[serde(default = "default_baggage_pieces")]
    pub baggage_pieces: u32,
    #[serde(default = "default_checkin_weight")]
    pub checkin_weight_kg: u32,
    #[serde(default = "default_handcarry_weight")]
    pub handcarry_weight_kg: u32,
    #[serde(default = "default_pnr")]
    pub pnr: String,
    #[serde(default)]
    pub company: Company,
    #[serde(default)]
    pub auto_calculate: bool,
}

fn default_flight_text() -> String { SAMPLE_FLIGHT_TEXT.to_string() }
fn default_passenger_count() -> u32 { 158 }
fn default_baggage_pieces() -> u32 { BaggageAllowance::default().pieces }
fn default_checkin_weight() -> u32 { BaggageAllowance::default().checkin_weight_kg }
fn default_handcarry_weight() -> u32 { BaggageAllowance::default().handcarry_weight_kg }
fn default_pnr() -> String { "ABCD123".to_string() }

impl SubmissionRequest {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read submission {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Invalid submission {}", path.display()))
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let request: Self = serde_json::from_str(raw)?;
        request.validate()?;
        Ok(request)
    }

    /// Bounds the form widgets enforce before a submission reaches the core
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.passenger_count >= 1, "Number of passengers must be at least 1");
        ensure!(self.baggage_pieces >= 1, "Check-in bags must be at least 1 piece");
        Ok(())
    }

    pub fn carrier_selection(&self) -> CarrierSelection {
        match &self.carrier {
            CarrierChoice::Listed { airline } => CarrierSelection::Listed(airline.clone()),
            CarrierChoice::Manual {
                flight_code,
                basic_commission,
                overall_commission,
            } => CarrierSelection::Manual(CarrierCommission {
                flight_code: flight_code.trim().to_string(),
                basic_rate: *basic_commission,
                overall_rate: *overall_commission,
            }),
        }
    }

    pub fn manual_fares(&self) -> FareInputs {
        FareInputs {
            basic_fare: self.basic_fare,
            total_fare: self.total_fare,
            auto_calculate: self.auto_calculate,
        }
    }

    /// Assemble the core submission from resolved carrier and fares
    pub fn into_submission(self, carrier: CarrierCommission, fares: FareInputs) -> Submission {
        let price_per_pax = self
            .price_per_pax
            .unwrap_or(if fares.total_fare > 0 { fares.total_fare } else { 0 });

        Submission {
            context: BookingContext {
                passenger_count: self.passenger_count,
                baggage: BaggageAllowance {
                    pieces: self.baggage_pieces,
                    checkin_weight_kg: self.checkin_weight_kg,
                    handcarry_weight_kg: self.handcarry_weight_kg,
                },
                pnr: self.pnr.trim().to_string(),
                company: self.company,
                price_per_pax,
                carrier,
            },
            flight_text: self.flight_text,
            fares,
        }
    }
}
