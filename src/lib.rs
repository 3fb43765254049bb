#![doc(test(attr(deny(warnings))))]

//! Tally answers "net income over a date range" for a stream of earn, spend
//! and tax commands, backed by a lazily propagated range tree.
//!
//! The engine and ledger live in `tally-core`; this crate is the request layer
//! and command-line shell around them.

pub mod cli;
pub mod errors;
pub mod utils;

pub use tally_core::{BudgetManager, CoreError, DateDomain};
pub use tally_domain::{LinearUpdate, MoneyTotals};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Tally tracing initialized.");
    });
}
