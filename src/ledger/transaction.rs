use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Money;
use super::recurrence::RecurrenceSpec;
use crate::errors::{ProjectionError, Result};

/// A single signed, dated amount attributed to one account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerEntry {
    pub source_definition_id: String,
    pub account_id: String,
    pub date: NaiveDate,
    pub amount: Money,
    pub name: String,
    pub kind: EntryKind,
}

impl LedgerEntry {
    pub fn new(
        source_definition_id: impl Into<String>,
        account_id: impl Into<String>,
        date: NaiveDate,
        amount: Money,
        name: impl Into<String>,
        kind: EntryKind,
    ) -> Self {
        Self {
            source_definition_id: source_definition_id.into(),
            account_id: account_id.into(),
            date,
            amount,
            name: name.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
    Transfer,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransferDirection {
    /// The declaring account sends, the counterparty receives.
    To,
    /// The counterparty sends, the declaring account receives.
    From,
}

impl TransferDirection {
    pub fn parse(raw: &str, definition_id: &str) -> Result<Self> {
        match raw {
            "to" => Ok(TransferDirection::To),
            "from" => Ok(TransferDirection::From),
            other => Err(ProjectionError::InvalidTransferDirection {
                definition: definition_id.to_string(),
                direction: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub direction: TransferDirection,
    pub counterparty_account_id: String,
}

impl Transfer {
    /// Returns `(sending, receiving)` account ids for a transfer declared under
    /// `declaring_account`.
    pub fn parties<'a>(&'a self, declaring_account: &'a str) -> (&'a str, &'a str) {
        match self.direction {
            TransferDirection::To => (declaring_account, self.counterparty_account_id.as_str()),
            TransferDirection::From => (self.counterparty_account_id.as_str(), declaring_account),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
    Transfer(Transfer),
}

impl TransactionKind {
    pub fn entry_kind(&self) -> EntryKind {
        match self {
            TransactionKind::Income => EntryKind::Income,
            TransactionKind::Expense => EntryKind::Expense,
            TransactionKind::Transfer(_) => EntryKind::Transfer,
        }
    }
}

/// Reference to the account whose balance settles a deferred amount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeferredAmountRef {
    pub account_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Amount {
    Fixed(Money),
    Deferred(DeferredAmountRef),
}

/// A recurring cash-flow rule declared under one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurringTransactionDef {
    pub id: String,
    pub account_id: String,
    pub name: String,
    pub amount: Amount,
    pub kind: TransactionKind,
    pub recurrence: RecurrenceSpec,
}

impl RecurringTransactionDef {
    pub fn new(
        id: impl Into<String>,
        account_id: impl Into<String>,
        name: impl Into<String>,
        amount: Amount,
        kind: TransactionKind,
        recurrence: RecurrenceSpec,
    ) -> Self {
        Self {
            id: id.into(),
            account_id: account_id.into(),
            name: name.into(),
            amount,
            kind,
            recurrence,
        }
    }

    pub fn income(
        id: impl Into<String>,
        account_id: impl Into<String>,
        name: impl Into<String>,
        amount: Money,
        recurrence: RecurrenceSpec,
    ) -> Self {
        Self::new(id, account_id, name, Amount::Fixed(amount), TransactionKind::Income, recurrence)
    }

    pub fn expense(
        id: impl Into<String>,
        account_id: impl Into<String>,
        name: impl Into<String>,
        amount: Money,
        recurrence: RecurrenceSpec,
    ) -> Self {
        Self::new(id, account_id, name, Amount::Fixed(amount), TransactionKind::Expense, recurrence)
    }

    pub fn transfer(
        id: impl Into<String>,
        account_id: impl Into<String>,
        name: impl Into<String>,
        amount: Money,
        transfer: Transfer,
        recurrence: RecurrenceSpec,
    ) -> Self {
        Self::new(
            id,
            account_id,
            name,
            Amount::Fixed(amount),
            TransactionKind::Transfer(transfer),
            recurrence,
        )
    }

    /// Every account id this definition can emit entries for or reference.
    pub fn referenced_accounts(&self) -> Vec<&str> {
        let mut accounts = vec![self.account_id.as_str()];
        if let TransactionKind::Transfer(transfer) = &self.kind {
            accounts.push(transfer.counterparty_account_id.as_str());
        }
        if let Amount::Deferred(reference) = &self.amount {
            accounts.push(reference.account_id.as_str());
        }
        accounts
    }
}
