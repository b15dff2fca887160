use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

use crate::booking::{BaggageAllowance, Company};
use crate::carrier::{CarrierCommission, Rate};
use crate::fare::AdjustmentValue;

/// Agency reference that closes both scripts
pub const DEFAULT_AGENCY_LINE: &str = "P.MAAT* MYXCEL TOURS AND TRAVELS 8122586619 REF RESERVATION";

/// Closing entries of an EMD script
const EMD_CLOSING: [&str; 3] = ["T.T*", "R.K", "*R"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScriptKind {
    Blocking,
    EmdIssuance,
}

impl ScriptKind {
    pub fn title(&self) -> &'static str {
        match self {
            ScriptKind::Blocking => "BLOCKING SCRIPT",
            ScriptKind::EmdIssuance => "EMD ISSUING SCRIPT",
        }
    }
}

/// Ordered GDS entries, pasted into the terminal one per line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Script {
    pub kind: ScriptKind,
    pub lines: Vec<String>,
}

impl Script {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

/// Render the seat-blocking script.
///
/// `flight_lines` are the raw lines with the passenger count already
/// substituted. The result always has `flight_lines.len() + 5` entries.
pub fn render_blocking(
    flight_lines: &[String],
    baggage: &BaggageAllowance,
    price_per_pax: i64,
    carrier: &CarrierCommission,
    pnr: &str,
    agency_line: &str,
) -> Script {
    let mut lines = flight_lines.to_vec();
    lines.push(format!(
        "NP.Baggage Allowance//{}piece {}KG each//{}KG for Handcarry",
        baggage.pieces, baggage.checkin_weight_kg, baggage.handcarry_weight_kg
    ));
    lines.push(format!("NP.Price per adult display// INR {}.00", price_per_pax));
    lines.push(format!("NP.PNR CONTROL OWN  *****{}*****", pnr));
    lines.push(format!(
        "NP.TKPZ{}/Z{}/DTDAD/EB PNR *****{}*****",
        Rate(carrier.basic_rate),
        Rate(carrier.overall_rate),
        pnr
    ));
    lines.push(agency_line.to_string());

    Script {
        kind: ScriptKind::Blocking,
        lines,
    }
}

/// Booking details carried into the EMD script
#[derive(Debug, Clone)]
pub struct EmdDetails<'a> {
    pub pnr: &'a str,
    /// Date token of the first flight line, as typed (`21JAN`)
    pub start_date_token: &'a str,
    /// Date token of the last flight line
    pub return_date_token: &'a str,
    pub flight_code: &'a str,
    pub adjustment: AdjustmentValue,
    pub company: Company,
}

/// Render the EMD issuance script. Always eight entries.
///
/// The timestamp identifier comes from `issued_at`, so two renders of the
/// same booking at different minutes differ on the first line.
pub fn render_emd(details: &EmdDetails<'_>, agency_line: &str, issued_at: NaiveDateTime) -> Script {
    let pnr = details.pnr;
    let mut lines = vec![
        format!(
            "NP.//{}//{}//{}//{}//INR {}.00",
            pnr,
            details.start_date_token,
            details.return_date_token,
            timestamp_id(details.flight_code, issued_at),
            details.adjustment.amount()
        ),
        format!("NP.{}//EMD STATUS ACTIVE", pnr),
        format!("NP.{}//{}", pnr, details.company),
        "NP.VIEWPRINTNET".to_string(),
        agency_line.to_string(),
    ];
    lines.extend(EMD_CLOSING.iter().map(|entry| entry.to_string()));

    Script {
        kind: ScriptKind::EmdIssuance,
        lines,
    }
}

/// Flight code followed by `DDMON` and `HHMM` of the issue instant,
/// e.g. `EK19OCT1430`.
pub fn timestamp_id(flight_code: &str, issued_at: NaiveDateTime) -> String {
    format!(
        "{}{}{}",
        flight_code,
        issued_at.format("%d%b").to_string().to_uppercase(),
        issued_at.format("%H%M")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn carrier() -> CarrierCommission {
        CarrierCommission {
            flight_code: "EK".to_string(),
            basic_rate: 5.0,
            overall_rate: 2.5,
        }
    }

    fn issued_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 19)
            .unwrap()
            .and_hms_opt(14, 30, 59)
            .unwrap()
    }

    fn details(adjustment: AdjustmentValue) -> EmdDetails<'static> {
        EmdDetails {
            pnr: "ABCD123",
            start_date_token: "21JAN",
            return_date_token: "22JAN",
            flight_code: "EK",
            adjustment,
            company: Company::TataConsultancyServices,
        }
    }

    #[test]
    fn test_blocking_script_layout() {
        let flights = vec![
            "EK 543 21JAN MAADXB 158 0345 0635 TU".to_string(),
            "EK 201 22JAN DXBMAA 158 0325 0835 TU".to_string(),
        ];
        let script = render_blocking(
            &flights,
            &BaggageAllowance::default(),
            45000,
            &carrier(),
            "ABCD123",
            DEFAULT_AGENCY_LINE,
        );

        assert_eq!(script.kind, ScriptKind::Blocking);
        assert_eq!(
            script.lines,
            vec![
                "EK 543 21JAN MAADXB 158 0345 0635 TU",
                "EK 201 22JAN DXBMAA 158 0325 0835 TU",
                "NP.Baggage Allowance//2piece 23KG each//7KG for Handcarry",
                "NP.Price per adult display// INR 45000.00",
                "NP.PNR CONTROL OWN  *****ABCD123*****",
                "NP.TKPZ5/Z2.5/DTDAD/EB PNR *****ABCD123*****",
                "P.MAAT* MYXCEL TOURS AND TRAVELS 8122586619 REF RESERVATION",
            ]
        );
    }

    #[test]
    fn test_blocking_script_length_tracks_flight_lines() {
        for count in [2usize, 4] {
            let flights: Vec<String> = (0..count).map(|i| format!("line {i}")).collect();
            let script = render_blocking(
                &flights,
                &BaggageAllowance::default(),
                0,
                &carrier(),
                "PNR1",
                DEFAULT_AGENCY_LINE,
            );
            assert_eq!(script.len(), count + 5);
        }
    }

    #[test]
    fn test_emd_script_layout() {
        let script = render_emd(
            &details(AdjustmentValue::Calculated(1_682_700)),
            DEFAULT_AGENCY_LINE,
            issued_at(),
        );

        assert_eq!(script.kind, ScriptKind::EmdIssuance);
        assert_eq!(
            script.lines,
            vec![
                "NP.//ABCD123//21JAN//22JAN//EK19OCT1430//INR 1682700.00",
                "NP.ABCD123//EMD STATUS ACTIVE",
                "NP.ABCD123//TATA CONSULTANCY SERVICES",
                "NP.VIEWPRINTNET",
                "P.MAAT* MYXCEL TOURS AND TRAVELS 8122586619 REF RESERVATION",
                "T.T*",
                "R.K",
                "*R",
            ]
        );
    }

    #[test]
    fn test_emd_script_without_calculation_shows_zero() {
        let script = render_emd(&details(AdjustmentValue::NotCalculated), DEFAULT_AGENCY_LINE, issued_at());
        assert_eq!(script.len(), 8);
        assert!(script.lines[0].ends_with("//INR 0.00"));
    }

    #[test]
    fn test_scripts_share_agency_line() {
        let blocking = render_blocking(&[], &BaggageAllowance::default(), 0, &carrier(), "X", "P.TEST*LINE");
        let emd = render_emd(&details(AdjustmentValue::NotCalculated), "P.TEST*LINE", issued_at());
        assert_eq!(blocking.lines.last(), Some(&"P.TEST*LINE".to_string()));
        assert_eq!(emd.lines[4], "P.TEST*LINE");
    }

    #[test]
    fn test_timestamp_id() {
        let morning = NaiveDate::from_ymd_opt(2025, 3, 5)
            .unwrap()
            .and_hms_opt(7, 4, 0)
            .unwrap();
        assert_eq!(timestamp_id("6E", morning), "6E05MAR0704");
    }

    #[test]
    fn test_script_display_joins_lines() {
        let script = Script {
            kind: ScriptKind::Blocking,
            lines: vec!["A".to_string(), "B".to_string()],
        };
        assert_eq!(script.to_string(), "A\nB");
    }
}
