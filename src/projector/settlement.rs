use crate::errors::Result;
use crate::ledger::{AccountRegistry, LedgerEntry, PendingSettlement};

/// Second phase of the projection pipeline.
///
/// Implementations turn a [`PendingSettlement`] into concrete entries once the
/// referenced account's state is known. `registry` reflects every entry routed
/// so far, including those produced for earlier settlements.
pub trait SettlementResolver {
    fn resolve(
        &self,
        pending: &PendingSettlement,
        registry: &AccountRegistry,
    ) -> Result<Vec<LedgerEntry>>;
}

impl<F> SettlementResolver for F
where
    F: Fn(&PendingSettlement, &AccountRegistry) -> Result<Vec<LedgerEntry>>,
{
    fn resolve(
        &self,
        pending: &PendingSettlement,
        registry: &AccountRegistry,
    ) -> Result<Vec<LedgerEntry>> {
        self(pending, registry)
    }
}
