//! Half-open index ranges over the aggregation domain.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
/// A half-open range `[left, right)` of unit indices.
pub struct IndexSegment {
    pub left: usize,
    pub right: usize,
}

impl IndexSegment {
    pub fn new(left: usize, right: usize) -> Self {
        debug_assert!(left <= right, "segment [{left}, {right}) is inverted");
        Self { left, right }
    }

    /// Segment covering exactly one index.
    pub fn unit(index: usize) -> Self {
        Self::new(index, index + 1)
    }

    pub fn len(&self) -> usize {
        self.right - self.left
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` when `other` lies entirely inside this segment.
    pub fn contains(&self, other: &IndexSegment) -> bool {
        self.left <= other.left && other.right <= self.right
    }

    pub fn contains_index(&self, index: usize) -> bool {
        self.left <= index && index < self.right
    }

    /// Returns `true` when the two segments share at least one index.
    pub fn intersects(&self, other: &IndexSegment) -> bool {
        !self.is_empty() && !other.is_empty() && self.left < other.right && other.left < self.right
    }

    pub fn intersection(&self, other: &IndexSegment) -> Option<IndexSegment> {
        if !self.intersects(other) {
            return None;
        }
        Some(IndexSegment::new(
            self.left.max(other.left),
            self.right.min(other.right),
        ))
    }

    /// Bisects the segment at `left + len / 2`.
    ///
    /// For segments of length one the left half is empty, so callers only
    /// split segments that still have room for two children.
    pub fn split(&self) -> (IndexSegment, IndexSegment) {
        let mid = self.left + self.len() / 2;
        (
            IndexSegment::new(self.left, mid),
            IndexSegment::new(mid, self.right),
        )
    }
}

impl fmt::Display for IndexSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.left, self.right)
    }
}
