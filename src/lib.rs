#![doc(test(attr(deny(warnings))))]

//! Balance Projector expands declarative recurring cash-flow rules into dated
//! ledger entries and projects running balances for a set of accounts.

pub mod cli;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod projector;
pub mod utils;

pub use errors::{ProjectionError, Result};
pub use projector::{Projection, ProjectionWindow, Projector};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Balance Projector tracing initialized.");
    });
}
