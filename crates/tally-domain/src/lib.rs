//! tally-domain
//!
//! Pure value types for range aggregation: index segments, the aggregate and
//! bulk-operation contracts, and the money algebra used by the ledger.
//! No I/O, no dates, no storage.

pub mod algebra;
pub mod money;
pub mod segment;

pub use algebra::{Aggregate, BulkOperation};
pub use money::{LinearUpdate, MoneyTotals};
pub use segment::IndexSegment;
