use serde::{Deserialize, Serialize};

use crate::carrier::CarrierCommission;

/// Share of the net fare charged back through the EMD
const ADJUSTMENT_SHARE: f64 = 0.25;

/// Compute the EMD adjustment for a group booking.
///
/// The commission on the basic and overall fares is deducted from the
/// overall fare, and a quarter of the net amount for the whole group is
/// rounded to whole rupees. Ties round half to even (`2.5` becomes `2`).
///
/// No input is rejected; callers gate on positive fares themselves.
pub fn compute_adjustment(
    basic_fare: f64,
    overall_fare: f64,
    basic_rate: f64,
    overall_rate: f64,
    passenger_count: u32,
) -> i64 {
    let commission = basic_fare * basic_rate / 100.0 + overall_fare * overall_rate / 100.0;
    let adjusted_fare = overall_fare - commission;
    (adjusted_fare * passenger_count as f64 * ADJUSTMENT_SHARE).round_ties_even() as i64
}

/// Fare figures for a submission, entered by hand or read from a screenshot
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FareInputs {
    pub basic_fare: i64,
    pub total_fare: i64,
    /// Explicit opt-in; fares alone never trigger a calculation
    pub auto_calculate: bool,
}

impl FareInputs {
    pub fn can_calculate(&self) -> bool {
        self.auto_calculate && self.basic_fare > 0 && self.total_fare > 0
    }
}

/// Outcome of the adjustment step.
///
/// `NotCalculated` renders as zero but is not a business value; check
/// `is_calculated` rather than comparing the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdjustmentValue {
    Calculated(i64),
    NotCalculated,
}

impl AdjustmentValue {
    pub fn for_submission(
        fares: &FareInputs,
        carrier: &CarrierCommission,
        passenger_count: u32,
    ) -> Self {
        if !fares.can_calculate() {
            return AdjustmentValue::NotCalculated;
        }
        AdjustmentValue::Calculated(compute_adjustment(
            fares.basic_fare as f64,
            fares.total_fare as f64,
            carrier.basic_rate,
            carrier.overall_rate,
            passenger_count,
        ))
    }

    pub fn amount(&self) -> i64 {
        match self {
            AdjustmentValue::Calculated(amount) => *amount,
            AdjustmentValue::NotCalculated => 0,
        }
    }

    pub fn is_calculated(&self) -> bool {
        matches!(self, AdjustmentValue::Calculated(_))
    }
}
