pub mod booking;
pub mod carrier;
pub mod fare;
pub mod fare_reader;
pub mod itinerary;
pub mod script;
pub mod submission;
pub mod summary;

pub use booking::{BaggageAllowance, BookingContext, Company};
pub use carrier::{CarrierCommission, CarrierSelection, CommissionLookup};
pub use fare::{compute_adjustment, AdjustmentValue, FareInputs};
pub use fare_reader::{extract_fares, resolve_fares, FareQuote, FareReadError, FareReader};
pub use itinerary::{FlightLine, DEFAULT_SCHEDULE_YEAR};
pub use script::{render_blocking, render_emd, Script, ScriptKind};
pub use submission::{generate, GeneratedScripts, RenderOptions, Submission};
pub use summary::{export_rows, summary_file_name, SummaryRow, SummaryTable};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Please enter exactly 2 or 4 flight lines (got {0})")]
    FlightLineCount(usize),
    #[error("Flight line {index} is malformed: '{line}'")]
    MalformedFlightLine { index: usize, line: String },
    #[error("Flight line {index} has an unreadable date '{token}'")]
    InvalidDate { index: usize, token: String },
    #[error("Flight line {index} has an unreadable time '{token}'")]
    InvalidTime { index: usize, token: String },
    #[error("Unknown airline: {0}")]
    UnknownCarrier(String),
    #[error("Summary export failed: {0}")]
    Export(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
