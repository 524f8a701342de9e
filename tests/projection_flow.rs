mod common;

use balance_projector::config::{ChartKind, ProjectionSpec};
use balance_projector::ledger::{
    Account, AccountRegistry, EntryKind, Frequency, LedgerEntry, Money, PendingSettlement,
    RecurrenceSpec, RecurringTransactionDef, Transfer, TransferDirection,
};
use balance_projector::projector::SettlementResolver;
use balance_projector::{ProjectionError, ProjectionWindow, Projector, Result};
use chrono::{NaiveDate, Weekday};
use common::{date, household_spec, HOUSEHOLD_SPEC};

fn february_rows(entries: &[LedgerEntry]) -> Vec<(NaiveDate, Money, &str)> {
    entries
        .iter()
        .filter(|e| e.date > date(2022, 2, 1) && e.date < date(2022, 2, 28))
        .map(|e| (e.date, e.amount, e.name.as_str()))
        .collect()
}

#[test]
fn household_projection_spot_check() {
    balance_projector::init();
    let projection = Projector::project(&household_spec(), date(2022, 1, 1), date(2022, 12, 31)).unwrap();

    let checking = projection.account("checking").unwrap();
    assert_eq!(
        february_rows(checking.entries()),
        vec![
            (date(2022, 2, 11), Money::from_units(-100), "Freedom Fund"),
            (date(2022, 2, 11), Money::from_units(2500), "Paycheck"),
            (date(2022, 2, 25), Money::from_units(-100), "Freedom Fund"),
            (date(2022, 2, 25), Money::from_units(2500), "Paycheck"),
        ]
    );

    let brokerage = projection.account("taxable_brokerage").unwrap();
    assert_eq!(
        february_rows(brokerage.entries()),
        vec![
            (date(2022, 2, 11), Money::from_units(100), "Freedom Fund"),
            (date(2022, 2, 25), Money::from_units(100), "Freedom Fund"),
        ]
    );
}

#[test]
fn accounts_default_to_window_start() {
    let projection = Projector::project(&household_spec(), date(2022, 1, 1), date(2022, 3, 31)).unwrap();
    let checking = projection.account("checking").unwrap();
    assert_eq!(checking.start_date, date(2022, 1, 1));
    assert!(matches!(
        projection.balance_as_of("checking", date(2021, 12, 31)),
        Err(ProjectionError::OutOfBoundsBalanceQuery { .. })
    ));
    // Jan 1 rent, then Jan 14 paycheck and brokerage transfer.
    assert_eq!(
        projection.balance_as_of("checking", date(2022, 1, 14)).unwrap(),
        Money::from_units(5900)
    );
}

#[test]
fn deferred_definitions_only_produce_pending_settlements() {
    let projection = Projector::project(&household_spec(), date(2022, 1, 1), date(2022, 3, 31)).unwrap();
    let checking = projection.account("checking").unwrap();
    assert!(checking.entries().iter().all(|e| e.source_definition_id != "visa_payoff"));

    let pending = projection.pending_settlements();
    let dates: Vec<NaiveDate> = pending.iter().map(|p| p.date).collect();
    assert_eq!(dates, vec![date(2022, 1, 20), date(2022, 2, 20), date(2022, 3, 20)]);
    assert!(pending.iter().all(|p| p.settling_account_id == "visa" && p.account_id == "checking"));
    assert_eq!(pending[2].occurrence_index, 2);
}

#[test]
fn transfer_pairs_are_symmetric() {
    let accounts = vec![
        Account::new("checking", "Checking", Money::from_units(1000), date(2022, 1, 1)),
        Account::new("savings", "Savings", Money::ZERO, date(2022, 1, 1)),
    ];
    let transfer = RecurringTransactionDef::transfer(
        "bi_weekly_transfer",
        "checking",
        "Savings",
        Money::from_units(250),
        Transfer {
            direction: TransferDirection::To,
            counterparty_account_id: "savings".into(),
        },
        RecurrenceSpec::new(date(2021, 11, 5), Frequency::Weekly)
            .every(2)
            .on_weekday(Weekday::Fri),
    );
    let window = ProjectionWindow::new(date(2022, 1, 1), date(2022, 12, 31)).unwrap();
    let projection = Projector::project_definitions(accounts, &[transfer], window).unwrap();

    let debits = projection.account("checking").unwrap().entries();
    let credits = projection.account("savings").unwrap().entries();
    assert_eq!(debits.len(), 26);
    assert_eq!(debits.len(), credits.len());
    for (debit, credit) in debits.iter().zip(credits) {
        assert_eq!(debit.date, credit.date);
        assert_eq!(debit.name, credit.name);
        assert_eq!(debit.source_definition_id, credit.source_definition_id);
        assert_eq!(debit.amount, Money::from_units(-250));
        assert_eq!(credit.amount, Money::from_units(250));
        assert_eq!(debit.kind, EntryKind::Transfer);
    }
    assert_eq!(
        projection.balance_as_of("savings", date(2022, 12, 31)).unwrap(),
        Money::from_units(26 * 250)
    );
}

#[test]
fn unknown_account_routing_leaves_registry_untouched() {
    let mut registry = AccountRegistry::new();
    registry
        .insert(Account::new("checking", "Checking", Money::from_units(1000), date(2022, 1, 1)))
        .unwrap();
    let before = registry.clone();

    let err = registry
        .route(vec![
            LedgerEntry::new("t", "checking", date(2022, 1, 7), Money::from_units(-50), "Move", EntryKind::Transfer),
            LedgerEntry::new("t", "brokerage", date(2022, 1, 7), Money::from_units(50), "Move", EntryKind::Transfer),
        ])
        .unwrap_err();

    assert!(matches!(err, ProjectionError::UnknownAccount(ref id) if id == "brokerage"));
    assert_eq!(registry, before);
}

#[test]
fn transfer_to_undeclared_account_fails_projection() {
    let spec_json = HOUSEHOLD_SPEC.replace(
        r#""account_id": "taxable_brokerage""#,
        r#""account_id": "roth_ira""#,
    );
    let spec = ProjectionSpec::from_json(&spec_json).unwrap();
    let err = Projector::project(&spec, date(2022, 1, 1), date(2022, 12, 31)).unwrap_err();
    assert!(matches!(err, ProjectionError::UnknownAccount(ref id) if id == "roth_ira"));
}

#[test]
fn undeclared_account_fails_even_when_rule_starts_after_window() {
    let spec_json = HOUSEHOLD_SPEC
        .replace(r#""account_id": "taxable_brokerage""#, r#""account_id": "roth_ira""#)
        .replace(
            r#""start_date": "2021-11-05",
                        "frequency": "weekly",
                        "interval": 2,
                        "day_of_week": "fri"
                    },
                    "transfer""#,
            r#""start_date": "2023-01-06",
                        "frequency": "weekly",
                        "interval": 2,
                        "day_of_week": "fri"
                    },
                    "transfer""#,
        );
    assert!(spec_json.contains("2023-01-06"));
    let spec = ProjectionSpec::from_json(&spec_json).unwrap();
    for (start, end) in [(date(2022, 1, 1), date(2022, 12, 31)), (date(2023, 1, 1), date(2023, 12, 31))] {
        let err = Projector::project(&spec, start, end).unwrap_err();
        assert!(matches!(err, ProjectionError::UnknownAccount(ref id) if id == "roth_ira"));
    }
}

#[test]
fn huge_monthly_interval_from_spec_does_not_overflow() {
    let spec_json = HOUSEHOLD_SPEC.replace(r#""interval": 1,
                        "day_of_month": 1"#, r#""interval": 3000000000,
                        "day_of_month": 1"#);
    assert!(spec_json.contains("3000000000"));
    let spec = ProjectionSpec::from_json(&spec_json).unwrap();
    let projection = Projector::project(&spec, date(2022, 1, 1), date(2022, 12, 31)).unwrap();
    let rent: Vec<NaiveDate> = projection
        .account("checking")
        .unwrap()
        .entries()
        .iter()
        .filter(|e| e.source_definition_id == "rent")
        .map(|e| e.date)
        .collect();
    assert!(rent.is_empty());
}

#[test]
fn huge_daily_interval_projects_without_overflow() {
    let accounts = vec![Account::new("checking", "Checking", Money::from_units(100), date(2022, 1, 1))];
    let fee = RecurringTransactionDef::expense(
        "fee",
        "checking",
        "Fee",
        Money::from_units(5),
        RecurrenceSpec::new(date(2022, 1, 1), Frequency::Daily).every(1_000_000_000),
    );
    let window = ProjectionWindow::new(date(2022, 1, 1), date(2022, 12, 31)).unwrap();
    let projection = Projector::project_definitions(accounts, &[fee], window).unwrap();
    assert_eq!(
        projection.balance_as_of("checking", date(2022, 12, 31)).unwrap(),
        Money::from_units(95)
    );
}

#[test]
fn invalid_transfer_direction_fails_projection() {
    let spec_json = HOUSEHOLD_SPEC.replace(r#""direction": "to""#, r#""direction": "sideways""#);
    let spec = ProjectionSpec::from_json(&spec_json).unwrap();
    let err = Projector::project(&spec, date(2022, 1, 1), date(2022, 12, 31)).unwrap_err();
    assert!(matches!(
        err,
        ProjectionError::InvalidTransferDirection { ref direction, .. } if direction == "sideways"
    ));
}

#[test]
fn inverted_window_is_rejected() {
    let err = Projector::project(&household_spec(), date(2022, 12, 31), date(2022, 1, 1)).unwrap_err();
    assert!(matches!(err, ProjectionError::InvalidWindow { .. }));
}

#[test]
fn rows_carry_account_and_running_balance() {
    let projection = Projector::project(&household_spec(), date(2022, 1, 1), date(2022, 1, 31)).unwrap();
    let rows = projection.rows("checking").unwrap();
    let summary: Vec<(NaiveDate, &str, Money)> = rows
        .iter()
        .map(|row| (row.date, row.name.as_str(), row.balance))
        .collect();
    assert_eq!(
        summary,
        vec![
            (date(2022, 1, 1), "Rent", Money::from_units(3500)),
            (date(2022, 1, 14), "Freedom Fund", Money::from_units(3400)),
            (date(2022, 1, 14), "Paycheck", Money::from_units(5900)),
            (date(2022, 1, 28), "Freedom Fund", Money::from_units(5800)),
            (date(2022, 1, 28), "Paycheck", Money::from_units(8300)),
            (date(2022, 1, 31), "Utilities", Money::from_units(8180)),
        ]
    );
    assert!(rows.iter().all(|row| row.account_id == "checking"));
}

#[test]
fn reports_resolve_chart_descriptors() {
    let spec = household_spec();
    let projection = Projector::project(&spec, date(2022, 1, 1), date(2022, 1, 31)).unwrap();
    let reports = projection.reports(&spec.charts).unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].kind, ChartKind::Line);
    let names: Vec<&str> = reports[0].series.iter().map(|s| s.display_name.as_str()).collect();
    assert_eq!(names, vec!["Checking", "Taxable Brokerage"]);
    let checking_points = &reports[1].series[0].points;
    assert_eq!(checking_points.len(), 4);
    assert_eq!(checking_points[1].description, "-100.00: Freedom Fund; 2500.00: Paycheck");
}

#[test]
fn reports_with_unknown_accounts_fail() {
    let mut spec = household_spec();
    spec.charts[0].accounts.push("mortgage".into());
    let projection = Projector::project(&spec, date(2022, 1, 1), date(2022, 1, 31)).unwrap();
    assert!(matches!(
        projection.reports(&spec.charts),
        Err(ProjectionError::UnknownAccount(ref id)) if id == "mortgage"
    ));
}

/// Pays the settling account's balance on the settlement date back to zero.
struct PayOffBalance;

impl SettlementResolver for PayOffBalance {
    fn resolve(&self, pending: &PendingSettlement, registry: &AccountRegistry) -> Result<Vec<LedgerEntry>> {
        let owed = registry
            .get(&pending.settling_account_id)?
            .balance_as_of(pending.date)?
            .abs();
        Ok(vec![
            LedgerEntry::new(
                &pending.source_definition_id,
                &pending.account_id,
                pending.date,
                -owed,
                &pending.name,
                EntryKind::Transfer,
            ),
            LedgerEntry::new(
                &pending.source_definition_id,
                &pending.settling_account_id,
                pending.date,
                owed,
                &pending.name,
                EntryKind::Transfer,
            ),
        ])
    }
}

struct Refuses;

impl SettlementResolver for Refuses {
    fn resolve(&self, pending: &PendingSettlement, _registry: &AccountRegistry) -> Result<Vec<LedgerEntry>> {
        Err(ProjectionError::Settlement(format!("cannot settle {}", pending.source_definition_id)))
    }
}

#[test]
fn settlement_resolver_applies_deferred_amounts_in_date_order() {
    let mut projection = Projector::project(&household_spec(), date(2022, 1, 1), date(2022, 2, 28)).unwrap();
    let added = projection.settle(&PayOffBalance).unwrap();

    assert_eq!(added, 4);
    assert!(projection.pending_settlements().is_empty());
    // Opening -300, streaming -15 on Jan 5, paid off on Jan 20.
    assert_eq!(projection.balance_as_of("visa", date(2022, 1, 19)).unwrap(), Money::from_units(-315));
    assert_eq!(projection.balance_as_of("visa", date(2022, 1, 20)).unwrap(), Money::ZERO);
    assert_eq!(projection.balance_as_of("visa", date(2022, 2, 20)).unwrap(), Money::ZERO);
    let payoffs: Vec<Money> = projection
        .account("checking")
        .unwrap()
        .entries()
        .iter()
        .filter(|e| e.source_definition_id == "visa_payoff")
        .map(|e| e.amount)
        .collect();
    assert_eq!(payoffs, vec![Money::from_units(-315), Money::from_units(-15)]);
}

#[test]
fn failed_settlement_leaves_projection_unchanged() {
    let mut projection = Projector::project(&household_spec(), date(2022, 1, 1), date(2022, 2, 28)).unwrap();
    let before = projection.clone();
    let err = projection.settle(&Refuses).unwrap_err();
    assert!(matches!(err, ProjectionError::Settlement(_)));
    assert_eq!(projection, before);
}
