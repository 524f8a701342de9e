//! Ledger primitives: recurrence rules, entries, accounts, and the registry.

pub mod account;
pub mod expander;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod money;
pub mod recurrence;
pub mod transaction;

pub use account::{Account, BalanceRow, GroupedBalancePoint, RunningBalancePoint};
pub use expander::{Expansion, PendingSettlement, TransactionExpander};
pub use ledger::AccountRegistry;
pub use money::Money;
pub use recurrence::{Frequency, MonthDay, RecurrenceSpec};
pub use transaction::{
    Amount, DeferredAmountRef, EntryKind, LedgerEntry, RecurringTransactionDef, TransactionKind,
    Transfer, TransferDirection,
};
