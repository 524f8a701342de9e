#![allow(dead_code)]

use std::io::Write;

use balance_projector::config::ProjectionSpec;
use chrono::NaiveDate;
use tempfile::NamedTempFile;

/// Household fixture: biweekly paycheck and brokerage transfer, monthly rent
/// and utilities, and a credit card paid off from checking.
pub const HOUSEHOLD_SPEC: &str = r#"{
    "accounts": {
        "checking": {
            "name": "Checking",
            "balance": 5000,
            "scheduled_transactions": {
                "paycheck": {
                    "name": "Paycheck",
                    "amount": 2500.00,
                    "type": "income",
                    "date_spec": {
                        "start_date": "2021-11-05",
                        "end_date": null,
                        "frequency": "weekly",
                        "interval": 2,
                        "day_of_week": "fri",
                        "day_of_month": null
                    },
                    "transfer": null
                },
                "freedom_fund": {
                    "name": "Freedom Fund",
                    "amount": 100.00,
                    "type": "transfer",
                    "date_spec": {
                        "start_date": "2021-11-05",
                        "frequency": "weekly",
                        "interval": 2,
                        "day_of_week": "fri"
                    },
                    "transfer": {"direction": "to", "account_id": "taxable_brokerage"}
                },
                "rent": {
                    "name": "Rent",
                    "amount": 1500.00,
                    "type": "expense",
                    "date_spec": {
                        "start_date": "2021-11-01",
                        "frequency": "monthly",
                        "interval": 1,
                        "day_of_month": 1
                    }
                },
                "utilities": {
                    "name": "Utilities",
                    "amount": 120.00,
                    "type": "expense",
                    "date_spec": {
                        "start_date": "2021-11-30",
                        "frequency": "monthly",
                        "interval": 1,
                        "day_of_month": 31
                    }
                },
                "visa_payoff": {
                    "name": "Visa Payoff",
                    "amount": {"cc_balance": {"account_id": "visa"}},
                    "type": "expense",
                    "date_spec": {
                        "start_date": "2022-01-01",
                        "frequency": "monthly",
                        "day_of_month": 20
                    }
                }
            }
        },
        "taxable_brokerage": {
            "name": "Taxable Brokerage",
            "balance": 10000,
            "scheduled_transactions": null
        },
        "visa": {
            "name": "Visa",
            "balance": -300,
            "scheduled_transactions": {
                "streaming": {
                    "name": "Streaming",
                    "amount": 15.00,
                    "type": "expense",
                    "date_spec": {
                        "start_date": "2021-12-05",
                        "frequency": "monthly",
                        "day_of_month": 5
                    }
                }
            }
        }
    },
    "charts": [
        {"name": "Balances", "type": "line", "accounts": ["checking", "taxable_brokerage"]},
        {"name": "Checking Table", "type": "table", "accounts": ["checking"]}
    ]
}"#;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn household_spec() -> ProjectionSpec {
    ProjectionSpec::from_json(HOUSEHOLD_SPEC).expect("fixture parses")
}

/// Writes `contents` to a temporary spec file that lives as long as the guard.
pub fn spec_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp spec");
    file.write_all(contents.as_bytes()).expect("write temp spec");
    file.flush().expect("flush temp spec");
    file
}
