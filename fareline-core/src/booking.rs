use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::carrier::CarrierCommission;

/// Corporate accounts an EMD can be billed to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Company {
    #[serde(rename = "WIPRO LTD")]
    Wipro,
    #[default]
    #[serde(rename = "TATA CONSULTANCY SERVICES")]
    TataConsultancyServices,
    #[serde(rename = "INFOSYS LTD")]
    Infosys,
    #[serde(rename = "CAPGEMINI LTD")]
    Capgemini,
    #[serde(rename = "CTS LTD")]
    Cts,
}

impl Company {
    pub const ALL: [Company; 5] = [
        Company::Wipro,
        Company::TataConsultancyServices,
        Company::Infosys,
        Company::Capgemini,
        Company::Cts,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Company::Wipro => "WIPRO LTD",
            Company::TataConsultancyServices => "TATA CONSULTANCY SERVICES",
            Company::Infosys => "INFOSYS LTD",
            Company::Capgemini => "CAPGEMINI LTD",
            Company::Cts => "CTS LTD",
        }
    }
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Company {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Company::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown company '{}'", wanted))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BaggageAllowance {
    pub pieces: u32,
    pub checkin_weight_kg: u32,
    pub handcarry_weight_kg: u32,
}

impl Default for BaggageAllowance {
    fn default() -> Self {
        Self {
            pieces: 2,
            checkin_weight_kg: 23,
            handcarry_weight_kg: 7,
        }
    }
}

/// Everything a single form submission knows about the booking.
/// Built fresh per submission and only read while rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingContext {
    pub passenger_count: u32,
    pub baggage: BaggageAllowance,
    pub pnr: String,
    pub company: Company,
    /// Whole rupees, rendered with a `.00` suffix
    pub price_per_pax: i64,
    pub carrier: CarrierCommission,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_round_trips_display_name() {
        for company in Company::ALL {
            assert_eq!(company.name().parse::<Company>().unwrap(), company);
        }
        assert_eq!("infosys ltd".parse::<Company>().unwrap(), Company::Infosys);
        assert!("ACME CORP".parse::<Company>().is_err());
    }

    #[test]
    fn test_company_deserializes_from_display_name() {
        let company: Company = serde_json::from_str("\"CTS LTD\"").expect("Failed to deserialize");
        assert_eq!(company, Company::Cts);
        assert_eq!(Company::default(), Company::TataConsultancyServices);
    }
}
