//! Contracts a value type must meet to be aggregated and bulk-updated by a
//! range tree.

use crate::segment::IndexSegment;

/// Summary value carried by a range of indices.
///
/// `combine` must be associative and commutative for adjacent, disjoint
/// ranges, and `neutral` is the summary of an empty range.
pub trait Aggregate: Clone {
    fn neutral() -> Self;

    fn combine(&self, other: &Self) -> Self;
}

/// Deferred transformation applied to every unit index of a range.
///
/// Composition is not assumed to be commutative: `combine_with` folds a
/// chronologically later operation into `self`, so that collapsing the result
/// once equals collapsing `self` and then `later`.
pub trait BulkOperation<A: Aggregate>: Clone {
    /// The identity transform.
    fn neutral() -> Self;

    fn is_neutral(&self) -> bool;

    /// Returns `aggregate` after this operation hits every index of `segment`.
    fn collapse(&self, aggregate: &A, segment: IndexSegment) -> A;

    fn combine_with(&self, later: &Self) -> Self;
}
