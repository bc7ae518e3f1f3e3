//! Bill Statement Generator

use crate::predictor::{format_currency, TARIFF_PER_UNIT};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use storage::ConsumptionRecord;

/// Days after the latest reading until payment is due
pub const DUE_DATE_OFFSET_DAYS: u64 = 15;

/// Length of the statement period ending on the latest reading's date
pub const STATEMENT_PERIOD_DAYS: u64 = 30;

/// Format for dates shown in the statement header and summary
const LONG_DATE_FORMAT: &str = "%B %d, %Y";

/// Format for dates shown in the meter table
const TABLE_DATE_FORMAT: &str = "%m/%d/%Y";

/// Fixed account fields printed on every statement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountProfile {
    pub account_no: String,
    pub account_name: String,
    pub address: String,
    /// Outstanding balance carried into this statement
    pub previous_charges: f64,
}

impl Default for AccountProfile {
    fn default() -> Self {
        Self {
            account_no: "12345678910".to_string(),
            account_name: "Priya Sharma".to_string(),
            address: "123, Gandhi Road, Bandra West, Mumbai, Maharashtra, 400050".to_string(),
            previous_charges: 1.0,
        }
    }
}

/// Dates derived from the latest reading. Every field falls back to "N/A"
/// when no reading exists or its date does not parse.
struct StatementDates {
    statement_date: String,
    period_from: String,
    period_until: String,
    due_date: String,
}

impl StatementDates {
    fn from_latest(latest: Option<&ConsumptionRecord>) -> Self {
        let parsed = latest.and_then(|r| NaiveDate::parse_from_str(&r.date, "%Y-%m-%d").ok());

        match parsed {
            Some(date) => Self {
                statement_date: date.format(LONG_DATE_FORMAT).to_string(),
                period_from: format_offset(date.checked_sub_days(Days::new(STATEMENT_PERIOD_DAYS))),
                period_until: date.format(LONG_DATE_FORMAT).to_string(),
                due_date: format_offset(date.checked_add_days(Days::new(DUE_DATE_OFFSET_DAYS))),
            },
            None => Self {
                statement_date: "N/A".to_string(),
                period_from: "N/A".to_string(),
                period_until: "N/A".to_string(),
                due_date: "N/A".to_string(),
            },
        }
    }
}

fn format_offset(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(LONG_DATE_FORMAT).to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

fn table_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|d| d.format(TABLE_DATE_FORMAT).to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// Render the self-contained HTML bill statement.
///
/// Inputs are explicit: the latest prediction display string, the full
/// record list in ascending date order, and the fixed account profile.
/// Every reading contributes one meter row; current charges are the sum of
/// usage times tariff over the whole list.
pub fn render_statement(
    prediction_text: &str,
    records: &[ConsumptionRecord],
    account: &AccountProfile,
) -> String {
    let dates = StatementDates::from_latest(records.last());

    let mut meter_rows = String::new();
    let mut current_charges = 0.0;
    for record in records {
        let amount = record.consumption * TARIFF_PER_UNIT;
        current_charges += amount;
        meter_rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            table_date(&record.date),
            record.consumption,
            TARIFF_PER_UNIT,
            format_currency(amount),
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Utility Bill</title>
    <style>
        body {{ font-family: sans-serif; margin: 20px; }}
        .bill-container {{ max-width: 800px; margin: auto; padding: 20px; border: 1px solid #ccc; }}
        .header {{ text-align: center; font-size: 24px; font-weight: bold; margin-bottom: 20px; }}
        .info-section {{ display: flex; justify-content: space-between; margin-bottom: 20px; }}
        .info-left, .info-right {{ width: 48%; }}
        .info-right {{ background-color: #f5e6d3; padding: 15px; }}
        .meter-info, .bill-summary {{ margin-bottom: 20px; }}
        table {{ width: 100%; border-collapse: collapse; }}
        th, td {{ border: 1px solid #ddd; padding: 8px; text-align: left; }}
        .summary-table {{ background-color: #e0f7fa; }}
    </style>
</head>
<body>
    <div class="bill-container">
        <div class="header">UTILITY BILL</div>
        <div class="info-section">
            <div class="info-left">
                <strong>Account No.</strong> {account_no}<br>
                <strong>Account Name</strong> {account_name}<br>
                <strong>Address</strong> {address}
            </div>
            <div class="info-right">
                <strong>Statement Date</strong> {statement_date}<br>
                <strong>Period Statement From</strong> {period_from}<br>
                <strong>Period Statement until</strong> {period_until}
            </div>
        </div>
        <div class="meter-info">
            <strong>Meter Information</strong>
            <table>
                <tr><th>Date</th><th>Usage (kWh)</th><th>Cost (per kWh)</th><th>Amount (₹)</th></tr>
                {meter_rows}
            </table>
        </div>
        <div class="bill-summary">
            <strong>Bill Summary</strong>
            <table class="summary-table">
                <tr><td>Previous Charges (₹)</td><td>{previous_charges}</td></tr>
                <tr><td>Current Charges (₹)</td><td>{current_charges}</td></tr>
                <tr><td>Total Amount (₹)</td><td>{total_amount}</td></tr>
                <tr><td>Due Date</td><td>{due_date}</td></tr>
            </table>
        </div>
    </div>
</body>
</html>
"#,
        account_no = account.account_no,
        account_name = account.account_name,
        address = account.address,
        statement_date = dates.statement_date,
        period_from = dates.period_from,
        period_until = dates.period_until,
        meter_rows = meter_rows,
        previous_charges = format_currency(account.previous_charges),
        current_charges = format_currency(current_charges),
        total_amount = prediction_text,
        due_date = dates.due_date,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, date: &str, consumption: f64) -> ConsumptionRecord {
        ConsumptionRecord {
            id,
            date: date.to_string(),
            consumption,
        }
    }

    #[test]
    fn test_statement_sums_charges_over_all_readings() {
        let records = vec![
            record(1, "2024-03-01", 10.0),
            record(2, "2024-03-02", 20.0),
            record(3, "2024-03-03", 30.0),
        ];

        let html = render_statement("₹4500.00", &records, &AccountProfile::default());

        // One meter row per reading, each usage times the tariff
        assert!(html.contains("<tr><td>03/01/2024</td><td>10</td><td>7.5</td><td>₹75.00</td></tr>"));
        assert!(html.contains("<tr><td>03/02/2024</td><td>20</td><td>7.5</td><td>₹150.00</td></tr>"));
        assert!(html.contains("<tr><td>03/03/2024</td><td>30</td><td>7.5</td><td>₹225.00</td></tr>"));

        // Current charges sum the whole table; the prediction fills the total
        assert!(html.contains("<tr><td>Current Charges (₹)</td><td>₹450.00</td></tr>"));
        assert!(html.contains("<tr><td>Total Amount (₹)</td><td>₹4500.00</td></tr>"));
        assert!(html.contains("<tr><td>Previous Charges (₹)</td><td>₹1.00</td></tr>"));
    }

    #[test]
    fn test_statement_dates_derive_from_latest_reading() {
        let records = vec![
            record(1, "2024-02-01", 10.0),
            record(2, "2024-03-15", 20.0),
        ];

        let html = render_statement("₹100.00", &records, &AccountProfile::default());

        assert!(html.contains("<strong>Statement Date</strong> March 15, 2024"));
        assert!(html.contains("<strong>Period Statement From</strong> February 14, 2024"));
        assert!(html.contains("<strong>Period Statement until</strong> March 15, 2024"));
        assert!(html.contains("<tr><td>Due Date</td><td>March 30, 2024</td></tr>"));
    }

    #[test]
    fn test_statement_without_readings_renders_na_dates() {
        let html = render_statement(
            "Not enough data to predict.",
            &[],
            &AccountProfile::default(),
        );

        assert!(html.contains("<strong>Statement Date</strong> N/A"));
        assert!(html.contains("<tr><td>Due Date</td><td>N/A</td></tr>"));
        assert!(html.contains("<tr><td>Current Charges (₹)</td><td>₹0.00</td></tr>"));
        assert!(html.contains("Not enough data to predict."));
    }

    #[test]
    fn test_unparsable_date_falls_back_to_raw_text() {
        let records = vec![record(1, "sometime", 10.0)];

        let html = render_statement("₹1.00", &records, &AccountProfile::default());

        assert!(html.contains("<tr><td>sometime</td><td>10</td><td>7.5</td><td>₹75.00</td></tr>"));
        assert!(html.contains("<strong>Statement Date</strong> N/A"));
    }

    #[test]
    fn test_account_fields_appear() {
        let account = AccountProfile {
            account_no: "42".to_string(),
            account_name: "A. Tester".to_string(),
            address: "1 Test Lane".to_string(),
            previous_charges: 2.5,
        };

        let html = render_statement("₹1.00", &[], &account);

        assert!(html.contains("<strong>Account No.</strong> 42"));
        assert!(html.contains("<strong>Account Name</strong> A. Tester"));
        assert!(html.contains("<strong>Address</strong> 1 Test Lane"));
        assert!(html.contains("<tr><td>Previous Charges (₹)</td><td>₹2.50</td></tr>"));
    }
}
