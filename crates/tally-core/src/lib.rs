//! tally-core
//!
//! Lazy range-aggregation engine and the income ledger built on top of it.
//! Depends on tally-domain. No CLI, no terminal I/O, no text parsing.

pub mod budget;
pub mod date_domain;
pub mod error;
mod traversal;
pub mod tree;

pub use budget::BudgetManager;
pub use date_domain::DateDomain;
pub use error::CoreError;
pub use tree::SegmentTree;
