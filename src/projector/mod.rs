//! Projection orchestration: builds the registry from a specification,
//! expands every recurring definition over a window, and answers balance
//! queries against the result.

pub mod report;
pub mod settlement;

use chrono::NaiveDate;
use serde::Serialize;

pub use report::{Report, ReportSeries};
pub use settlement::SettlementResolver;

use crate::config::ProjectionSpec;
use crate::errors::{ProjectionError, Result};
use crate::ledger::{
    Account, AccountRegistry, BalanceRow, Expansion, GroupedBalancePoint, Money,
    PendingSettlement, RecurringTransactionDef, RunningBalancePoint, TransactionExpander,
};

/// Inclusive date range a projection covers.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ProjectionWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ProjectionWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(ProjectionError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }
}

pub struct Projector;

impl Projector {
    /// Projects every account in `spec` over `[start, end]`.
    ///
    /// Accounts without an explicit start date start at `start`. Any failure
    /// aborts the whole projection.
    pub fn project(spec: &ProjectionSpec, start: NaiveDate, end: NaiveDate) -> Result<Projection> {
        let window = ProjectionWindow::new(start, end)?;
        let accounts = spec
            .accounts
            .iter()
            .map(|(account_id, account)| {
                Account::new(
                    account_id,
                    &account.name,
                    account.balance,
                    account.start_date.unwrap_or(window.start),
                )
            })
            .collect();
        let definitions = spec.definitions()?;
        Self::project_definitions(accounts, &definitions, window)
    }

    /// Projects pre-built accounts and definitions over `window`.
    pub fn project_definitions(
        accounts: Vec<Account>,
        definitions: &[RecurringTransactionDef],
        window: ProjectionWindow,
    ) -> Result<Projection> {
        let mut registry = AccountRegistry::new();
        for account in accounts {
            registry.insert(account)?;
        }

        // Every referenced account must exist, whether or not its rule fires
        // inside the window.
        for definition in definitions {
            for account_id in definition.referenced_accounts() {
                registry.get(account_id)?;
            }
        }

        let mut expansion = Expansion::default();
        for definition in definitions {
            expansion.extend(TransactionExpander::expand(definition, window.start, window.end));
        }

        let entry_count = expansion.entries.len();
        registry.route(expansion.entries)?;

        let mut pending = expansion.settlements;
        pending.sort_by(|a, b| {
            (a.date, &a.source_definition_id, a.occurrence_index)
                .cmp(&(b.date, &b.source_definition_id, b.occurrence_index))
        });
        if !pending.is_empty() {
            tracing::warn!(
                pending = pending.len(),
                "deferred settlements left unresolved"
            );
        }
        tracing::info!(
            start = %window.start,
            end = %window.end,
            accounts = registry.len(),
            definitions = definitions.len(),
            entries = entry_count,
            "projection complete"
        );

        Ok(Projection {
            window,
            registry,
            pending,
        })
    }
}

/// Result of a projection: the populated registry plus the deferred
/// settlements that still need a resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    window: ProjectionWindow,
    registry: AccountRegistry,
    pending: Vec<PendingSettlement>,
}

impl Projection {
    pub fn window(&self) -> ProjectionWindow {
        self.window
    }

    pub fn registry(&self) -> &AccountRegistry {
        &self.registry
    }

    pub fn account(&self, account_id: &str) -> Result<&Account> {
        self.registry.get(account_id)
    }

    pub fn running_balance(&self, account_id: &str) -> Result<Vec<RunningBalancePoint>> {
        Ok(self.account(account_id)?.running_balance())
    }

    pub fn running_balance_grouped(&self, account_id: &str) -> Result<Vec<GroupedBalancePoint>> {
        Ok(self.account(account_id)?.running_balance_grouped())
    }

    pub fn balance_as_of(&self, account_id: &str, date: NaiveDate) -> Result<Money> {
        self.account(account_id)?.balance_as_of(date)
    }

    pub fn rows(&self, account_id: &str) -> Result<Vec<BalanceRow>> {
        Ok(self.account(account_id)?.rows())
    }

    /// Deferred settlements ordered by date, then definition id.
    pub fn pending_settlements(&self) -> &[PendingSettlement] {
        &self.pending
    }

    /// Runs the second phase of the pipeline: every pending settlement is
    /// handed to `resolver` in date order and the returned entries are routed.
    ///
    /// Either every settlement resolves and is applied, or the projection is
    /// left as it was. Returns the number of entries added.
    pub fn settle(&mut self, resolver: &dyn SettlementResolver) -> Result<usize> {
        let mut staged = self.registry.clone();
        let mut added = 0;
        for pending in &self.pending {
            let entries = resolver.resolve(pending, &staged)?;
            added += entries.len();
            staged.route(entries)?;
        }
        tracing::info!(
            settlements = self.pending.len(),
            entries = added,
            "deferred settlements resolved"
        );
        self.registry = staged;
        self.pending.clear();
        Ok(added)
    }
}
