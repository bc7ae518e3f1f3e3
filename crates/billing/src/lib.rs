//! Billing Engine
//!
//! Derives a predicted bill from recent consumption readings and renders the
//! printable bill statement.

mod predictor;
mod statement;

pub use predictor::{
    format_currency, predict_bill, BillPrediction, BILLING_CYCLE_DAYS, PREDICTION_WINDOW,
    TARIFF_PER_UNIT,
};
pub use statement::{render_statement, AccountProfile, DUE_DATE_OFFSET_DAYS, STATEMENT_PERIOD_DAYS};
