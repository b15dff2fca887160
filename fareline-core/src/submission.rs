use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

use crate::booking::BookingContext;
use crate::fare::{AdjustmentValue, FareInputs};
use crate::itinerary::{self, FlightLine, DEFAULT_SCHEDULE_YEAR};
use crate::script::{self, EmdDetails, Script, DEFAULT_AGENCY_LINE};
use crate::summary::{self, SummaryTable};
use crate::{CoreError, CoreResult};

/// A submission is either one way out and back (2 lines) or two round trips (4 lines)
const ALLOWED_FLIGHT_LINE_COUNTS: [usize; 2] = [2, 4];

/// One filled-in form
#[derive(Debug, Clone)]
pub struct Submission {
    pub context: BookingContext,
    /// Flight lines as typed, one per line
    pub flight_text: String,
    pub fares: FareInputs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub schedule_year: u8,
    pub agency_line: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            schedule_year: DEFAULT_SCHEDULE_YEAR,
            agency_line: DEFAULT_AGENCY_LINE.to_string(),
        }
    }
}

/// Everything produced for one submission. Either all of it exists or
/// `generate` returned an error.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedScripts {
    pub submission_id: Uuid,
    pub pnr: String,
    pub flights: Vec<FlightLine>,
    pub adjustment: AdjustmentValue,
    pub blocking: Script,
    pub emd: Script,
    pub summary: SummaryTable,
    pub summary_file_name: String,
    #[serde(skip)]
    pub summary_csv: Vec<u8>,
}

/// Validate a submission and produce both scripts and the summary table.
///
/// The line count is checked first, then every line is parsed, stopping at
/// the first bad one. Nothing is rendered until all lines parse.
/// `issued_at` stamps the EMD timestamp identifier.
pub fn generate(
    submission: &Submission,
    options: &RenderOptions,
    issued_at: NaiveDateTime,
) -> CoreResult<GeneratedScripts> {
    let submission_id = Uuid::new_v4();
    let context = &submission.context;

    let lines = itinerary::split_flight_text(&submission.flight_text);
    if !ALLOWED_FLIGHT_LINE_COUNTS.contains(&lines.len()) {
        tracing::debug!(%submission_id, count = lines.len(), "Rejected flight line count");
        return Err(CoreError::FlightLineCount(lines.len()));
    }

    let flights = itinerary::parse_all(&lines, options.schedule_year)?;
    tracing::debug!(%submission_id, flights = flights.len(), "Parsed flight lines");

    let adjustment = AdjustmentValue::for_submission(
        &submission.fares,
        &context.carrier,
        context.passenger_count,
    );

    let blocked_lines: Vec<String> = flights
        .iter()
        .map(|f| f.with_passenger_count(context.passenger_count))
        .collect();
    let blocking = script::render_blocking(
        &blocked_lines,
        &context.baggage,
        context.price_per_pax,
        &context.carrier,
        &context.pnr,
        &options.agency_line,
    );

    let first = &flights[0];
    let last = &flights[flights.len() - 1];
    let emd = script::render_emd(
        &EmdDetails {
            pnr: &context.pnr,
            start_date_token: &first.date_token,
            return_date_token: &last.date_token,
            flight_code: &context.carrier.flight_code,
            adjustment,
            company: context.company,
        },
        &options.agency_line,
        issued_at,
    );

    let summary = summary::export_rows(&flights, context.passenger_count, &context.pnr);
    let summary_csv = summary.to_csv()?;

    tracing::info!(
        %submission_id,
        pnr = %context.pnr,
        flights = flights.len(),
        adjustment_calculated = adjustment.is_calculated(),
        "Generated scripts"
    );

    Ok(GeneratedScripts {
        submission_id,
        pnr: context.pnr.clone(),
        flights,
        adjustment,
        blocking,
        emd,
        summary,
        summary_file_name: summary::summary_file_name(&context.pnr),
        summary_csv,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{BaggageAllowance, Company};
    use crate::carrier::CarrierCommission;
    use chrono::{Local, NaiveDate};

    const ROUND_TRIP: &str =
        "EK 543 21JAN MAADXB AK1 0345 0635 TU\nEK 201 22JAN DXBMAA AK1 0325 0835 TU";

    fn submission(flight_text: &str) -> Submission {
        Submission {
            context: BookingContext {
                passenger_count: 158,
                baggage: BaggageAllowance::default(),
                pnr: "ABCD123".to_string(),
                company: Company::Wipro,
                price_per_pax: 45000,
                carrier: CarrierCommission {
                    flight_code: "EK".to_string(),
                    basic_rate: 5.0,
                    overall_rate: 2.0,
                },
            },
            flight_text: flight_text.to_string(),
            fares: FareInputs {
                basic_fare: 30000,
                total_fare: 45000,
                auto_calculate: true,
            },
        }
    }

    fn issued_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 2)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap()
    }

    #[test]
    fn test_round_trip_submission() {
        let out = generate(&submission(ROUND_TRIP), &RenderOptions::default(), issued_at()).unwrap();

        assert_eq!(out.blocking.len(), 7);
        assert_eq!(out.blocking.lines[0], "EK 543 21JAN MAADXB 158 0345 0635 TU");
        assert_eq!(out.blocking.lines[1], "EK 201 22JAN DXBMAA 158 0325 0835 TU");
        assert_eq!(out.blocking.lines[5], "NP.TKPZ5/Z2/DTDAD/EB PNR *****ABCD123*****");

        assert_eq!(out.emd.len(), 8);
        assert_eq!(
            out.emd.lines[0],
            "NP.//ABCD123//21JAN//22JAN//EK02JAN0905//INR 1682700.00"
        );
        assert_eq!(out.emd.lines[2], "NP.ABCD123//WIPRO LTD");

        assert_eq!(out.adjustment, AdjustmentValue::Calculated(1_682_700));
        assert_eq!(out.summary.rows.len(), 2);
        assert_eq!(out.summary_file_name, "ABCD123_booking_summary.csv");
        assert!(out.summary_csv.starts_with(b"No of Pax,"));
    }

    #[test]
    fn test_four_line_submission() {
        let text = format!(
            "{}\nEK 544 28JAN MAADXB AK1 1015 1305 TU\nEK 202 30JAN DXBMAA AK1 2150 0300 TU",
            ROUND_TRIP
        );
        let out = generate(&submission(&text), &RenderOptions::default(), issued_at()).unwrap();
        assert_eq!(out.blocking.len(), 9);
        assert_eq!(out.emd.len(), 8);
        assert!(out.emd.lines[0].starts_with("NP.//ABCD123//21JAN//30JAN//"));
        assert_eq!(out.summary.rows.len(), 4);
    }

    #[test]
    fn test_rejects_odd_line_counts() {
        let one = "EK 543 21JAN MAADXB AK1 0345 0635 TU";
        let three = format!("{}\n{}", ROUND_TRIP, one);
        for text in [one.to_string(), three, String::new()] {
            let err = generate(&submission(&text), &RenderOptions::default(), issued_at()).unwrap_err();
            assert!(matches!(err, CoreError::FlightLineCount(_)));
        }
    }

    #[test]
    fn test_count_checked_before_parsing() {
        // Three malformed lines still fail on the count
        let err = generate(&submission("a\nb\nc"), &RenderOptions::default(), issued_at()).unwrap_err();
        assert!(matches!(err, CoreError::FlightLineCount(3)));
    }

    #[test]
    fn test_reports_first_malformed_line() {
        let text = "EK 543 21JAN MAADXB AK1 0345 0635 TU\nEK 201 22JAN DXBMAA";
        let err = generate(&submission(text), &RenderOptions::default(), issued_at()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Flight line 2 is malformed: 'EK 201 22JAN DXBMAA'"
        );
    }

    #[test]
    fn test_adjustment_zero_without_opt_in() {
        let mut sub = submission(ROUND_TRIP);
        sub.fares.auto_calculate = false;
        let out = generate(&sub, &RenderOptions::default(), issued_at()).unwrap();
        assert_eq!(out.adjustment, AdjustmentValue::NotCalculated);
        assert!(out.emd.lines[0].ends_with("//INR 0.00"));
    }

    #[test]
    fn test_custom_render_options() {
        let options = RenderOptions {
            schedule_year: 26,
            agency_line: "P.DELT*AGENCY".to_string(),
        };
        let out = generate(&submission(ROUND_TRIP), &options, issued_at()).unwrap();
        assert_eq!(out.summary.rows[0].departure_date, "21-Jan-26");
        assert_eq!(out.blocking.lines.last().unwrap(), "P.DELT*AGENCY");
        assert_eq!(out.emd.lines[4], "P.DELT*AGENCY");
    }

    #[test]
    fn test_live_clock_timestamp_within_window() {
        let before = Local::now().naive_local();
        let out = generate(&submission(ROUND_TRIP), &RenderOptions::default(), Local::now().naive_local()).unwrap();
        let after = Local::now().naive_local();

        let stamp = out.emd.lines[0].split("//").nth(4).unwrap().to_string();
        let candidates = [
            script::timestamp_id("EK", before),
            script::timestamp_id("EK", after),
        ];
        assert!(candidates.contains(&stamp), "{stamp} not in {candidates:?}");
    }

    #[test]
    fn test_submission_ids_are_unique() {
        let a = generate(&submission(ROUND_TRIP), &RenderOptions::default(), issued_at()).unwrap();
        let b = generate(&submission(ROUND_TRIP), &RenderOptions::default(), issued_at()).unwrap();
        assert_ne!(a.submission_id, b.submission_id);
        assert_eq!(a.blocking, b.blocking);
        assert_eq!(a.emd, b.emd);
    }
}
