//! Bill Predictor Implementation

use serde::{Deserialize, Serialize};
use storage::ConsumptionRecord;
use tracing::debug;

/// Number of most recent readings averaged for prediction
pub const PREDICTION_WINDOW: usize = 3;

/// Fixed price per consumption unit (₹/kWh)
pub const TARIFF_PER_UNIT: f64 = 7.5;

/// Days in the projected billing cycle. Each reading is assumed to cover one
/// day, so the window average is scaled onto a 30-day cycle.
pub const BILLING_CYCLE_DAYS: f64 = 30.0;

/// Sentinel text rendered when too few readings exist to predict
const INSUFFICIENT_DATA_TEXT: &str = "Not enough data to predict.";

/// Outcome of a bill prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BillPrediction {
    /// Fewer than [`PREDICTION_WINDOW`] readings stored. Not an error.
    InsufficientData,
    /// Projected bill amount for the next cycle
    Predicted { amount: f64 },
}

impl BillPrediction {
    /// Render for display: the sentinel text, or the amount as currency.
    pub fn display_text(&self) -> String {
        match self {
            BillPrediction::InsufficientData => INSUFFICIENT_DATA_TEXT.to_string(),
            BillPrediction::Predicted { amount } => format_currency(*amount),
        }
    }
}

/// Format an amount as currency: rupee symbol, two decimal places.
pub fn format_currency(amount: f64) -> String {
    format!("₹{amount:.2}")
}

/// Predict the next bill from the most recent readings.
///
/// `recent` must be ordered most recent first. Only the first
/// [`PREDICTION_WINDOW`] entries participate; older entries are ignored.
/// Duplicate dates are not deduplicated, each row counts independently.
pub fn predict_bill(recent: &[ConsumptionRecord]) -> BillPrediction {
    if recent.len() < PREDICTION_WINDOW {
        debug!(
            "Only {} of {} readings available, prediction withheld",
            recent.len(),
            PREDICTION_WINDOW
        );
        return BillPrediction::InsufficientData;
    }

    let total: f64 = recent
        .iter()
        .take(PREDICTION_WINDOW)
        .map(|r| r.consumption)
        .sum();
    let average = total / PREDICTION_WINDOW as f64;
    let amount = average * TARIFF_PER_UNIT * BILLING_CYCLE_DAYS;

    BillPrediction::Predicted { amount }
}
