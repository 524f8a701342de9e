use chrono::NaiveDate;
use serde::Serialize;

use super::money::Money;
use super::transaction::LedgerEntry;
use crate::errors::{ProjectionError, Result};

/// One entry together with the balance after applying it.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RunningBalancePoint {
    pub entry: LedgerEntry,
    pub balance: Money,
}

/// All entries of a single day merged into one row.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GroupedBalancePoint {
    pub date: NaiveDate,
    pub amount: Money,
    /// `"<amount>: <name>"` parts joined with `"; "` in canonical order.
    pub description: String,
    pub names: Vec<String>,
    pub balance: Money,
}

/// Flat output row consumed by table renderers.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BalanceRow {
    pub account_id: String,
    pub date: NaiveDate,
    pub amount: Money,
    pub name: String,
    pub balance: Money,
}

/// A projected account and the entries routed to it.
///
/// Entries are kept in canonical `(date, name)` order at insertion time, so
/// balance views are folded straight from storage on every read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub account_id: String,
    pub display_name: String,
    pub opening_balance: Money,
    pub start_date: NaiveDate,
    entries: Vec<LedgerEntry>,
}

impl Account {
    pub fn new(
        account_id: impl Into<String>,
        display_name: impl Into<String>,
        opening_balance: Money,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            display_name: display_name.into(),
            opening_balance,
            start_date,
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Appends a batch of entries. The whole batch is rejected if any entry
    /// belongs to another account.
    pub fn add_entries(&mut self, entries: impl IntoIterator<Item = LedgerEntry>) -> Result<()> {
        let batch: Vec<LedgerEntry> = entries.into_iter().collect();
        if let Some(stray) = batch.iter().find(|e| e.account_id != self.account_id) {
            return Err(ProjectionError::MismatchedAccountOnAppend {
                expected: self.account_id.clone(),
                received: stray.account_id.clone(),
            });
        }
        for entry in batch {
            self.insert_sorted(entry);
        }
        Ok(())
    }

    pub fn add_entry(&mut self, entry: LedgerEntry) -> Result<()> {
        self.add_entries([entry])
    }

    // Equal keys keep insertion order.
    fn insert_sorted(&mut self, entry: LedgerEntry) {
        let position = self
            .entries
            .partition_point(|existing| (existing.date, existing.name.as_str()) <= (entry.date, entry.name.as_str()));
        self.entries.insert(position, entry);
    }

    pub fn running_balance(&self) -> Vec<RunningBalancePoint> {
        let mut balance = self.opening_balance;
        self.entries
            .iter()
            .map(|entry| {
                balance += entry.amount;
                RunningBalancePoint {
                    entry: entry.clone(),
                    balance,
                }
            })
            .collect()
    }

    pub fn running_balance_grouped(&self) -> Vec<GroupedBalancePoint> {
        let mut points: Vec<GroupedBalancePoint> = Vec::new();
        for entry in &self.entries {
            let part = format!("{}: {}", entry.amount, entry.name);
            match points.last_mut() {
                Some(point) if point.date == entry.date => {
                    point.amount += entry.amount;
                    point.description.push_str("; ");
                    point.description.push_str(&part);
                    point.names.push(entry.name.clone());
                }
                _ => points.push(GroupedBalancePoint {
                    date: entry.date,
                    amount: entry.amount,
                    description: part,
                    names: vec![entry.name.clone()],
                    balance: Money::ZERO,
                }),
            }
        }

        let mut balance = self.opening_balance;
        for point in &mut points {
            balance += point.amount;
            point.balance = balance;
        }
        points
    }

    /// Balance at the end of `date`.
    pub fn balance_as_of(&self, date: NaiveDate) -> Result<Money> {
        if date < self.start_date {
            return Err(ProjectionError::OutOfBoundsBalanceQuery {
                account: self.account_id.clone(),
                date,
                start_date: self.start_date,
            });
        }
        Ok(self
            .running_balance_grouped()
            .iter()
            .take_while(|point| point.date <= date)
            .last()
            .map(|point| point.balance)
            .unwrap_or(self.opening_balance))
    }

    pub fn closing_balance(&self) -> Money {
        self.opening_balance + self.entries.iter().map(|e| e.amount).sum::<Money>()
    }

    pub fn rows(&self) -> Vec<BalanceRow> {
        self.running_balance()
            .into_iter()
            .map(|point| BalanceRow {
                account_id: self.account_id.clone(),
                date: point.entry.date,
                amount: point.entry.amount,
                name: point.entry.name,
                balance: point.balance,
            })
            .collect()
    }
}
