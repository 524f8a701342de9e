//! Turns recurring definitions into concrete ledger entries for a window.
//!
//! Expansion is the first phase of a two-phase pipeline: definitions with a
//! literal amount become [`LedgerEntry`] values, while definitions whose
//! amount is a deferred reference become [`PendingSettlement`] records that a
//! [`crate::projector::SettlementResolver`] may later turn into entries.

use chrono::NaiveDate;
use serde::Serialize;

use super::money::Money;
use super::transaction::{Amount, EntryKind, LedgerEntry, RecurringTransactionDef, TransactionKind};

/// A deferred-settlement occurrence waiting for its amount to be known.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PendingSettlement {
    pub source_definition_id: String,
    pub account_id: String,
    pub name: String,
    pub date: NaiveDate,
    pub occurrence_index: usize,
    pub settling_account_id: String,
}

/// Output of expanding one definition over a window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    pub entries: Vec<LedgerEntry>,
    pub settlements: Vec<PendingSettlement>,
}

impl Expansion {
    pub fn extend(&mut self, other: Expansion) {
        self.entries.extend(other.entries);
        self.settlements.extend(other.settlements);
    }
}

pub struct TransactionExpander;

impl TransactionExpander {
    /// Expands `def` over `[query_start, query_end]`. Pure: calling it twice
    /// yields the same result.
    pub fn expand(
        def: &RecurringTransactionDef,
        query_start: NaiveDate,
        query_end: NaiveDate,
    ) -> Expansion {
        let dates = def.recurrence.generate_dates(query_start, query_end);
        let mut expansion = Expansion::default();

        for (index, date) in dates.into_iter().enumerate() {
            match &def.amount {
                Amount::Deferred(reference) => expansion.settlements.push(PendingSettlement {
                    source_definition_id: def.id.clone(),
                    account_id: def.account_id.clone(),
                    name: def.name.clone(),
                    date,
                    occurrence_index: index,
                    settling_account_id: reference.account_id.clone(),
                }),
                Amount::Fixed(amount) => {
                    expansion
                        .entries
                        .extend(Self::entries_for(def, date, *amount));
                }
            }
        }

        tracing::debug!(
            definition = %def.id,
            rule = %def.recurrence.label(),
            entries = expansion.entries.len(),
            settlements = expansion.settlements.len(),
            "expanded recurring definition"
        );
        expansion
    }

    /// Concrete entries for one occurrence of a fixed-amount definition.
    pub fn entries_for(def: &RecurringTransactionDef, date: NaiveDate, amount: Money) -> Vec<LedgerEntry> {
        let magnitude = amount.abs();
        let kind = def.kind.entry_kind();
        match &def.kind {
            TransactionKind::Transfer(transfer) => {
                let (sending, receiving) = transfer.parties(&def.account_id);
                vec![
                    LedgerEntry::new(&def.id, sending, date, -magnitude, &def.name, EntryKind::Transfer),
                    LedgerEntry::new(&def.id, receiving, date, magnitude, &def.name, EntryKind::Transfer),
                ]
            }
            TransactionKind::Income => {
                vec![LedgerEntry::new(&def.id, &def.account_id, date, magnitude, &def.name, kind)]
            }
            TransactionKind::Expense => {
                vec![LedgerEntry::new(&def.id, &def.account_id, date, -magnitude, &def.name, kind)]
            }
        }
    }
}
