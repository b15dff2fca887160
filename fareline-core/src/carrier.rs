use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{CoreError, CoreResult};

/// Label of the selection that takes code and rates from the user
pub const MANUAL_CARRIER_LABEL: &str = "Other (Manual Entry)";

/// Flight code and commission percentages for one airline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CarrierCommission {
    pub flight_code: String,
    pub basic_rate: f64,
    pub overall_rate: f64,
}

/// A commission percentage as it appears in a TKP directive.
/// Integral rates print without a fractional part (`5`, not `5.0`).
pub struct Rate(pub f64);

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 && self.0.is_finite() {
            write!(f, "{}", self.0 as i64)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Source of carrier commission rates
pub trait CommissionLookup {
    /// Selectable airline names, in table order
    fn airlines(&self) -> Vec<String>;

    fn commission_for(&self, airline: &str) -> Option<CarrierCommission>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum CarrierSelection {
    Listed(String),
    Manual(CarrierCommission),
}

impl CarrierSelection {
    pub fn resolve(&self, lookup: &dyn CommissionLookup) -> CoreResult<CarrierCommission> {
        match self {
            CarrierSelection::Listed(airline) => lookup
                .commission_for(airline)
                .ok_or_else(|| CoreError::UnknownCarrier(airline.clone())),
            CarrierSelection::Manual(commission) => Ok(commission.clone()),
        }
    }
}
