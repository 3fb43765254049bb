//! `SegmentTree`: a pointer-based range tree with lazy bulk updates.
//!
//! The tree is shaped once at construction by bisecting `[0, N)` down to unit
//! leaves. Every node stores the aggregate of its subtree together with the
//! bulk operation it has absorbed but not yet handed to its children. Both
//! public operations share one traversal (the private `traversal` module).

use tally_domain::{Aggregate, BulkOperation, IndexSegment};

use crate::{
    error::CoreError,
    traversal::{walk, ApplyVisitor, SumVisitor},
};

/// A node exclusively owns its two children; leaves own none.
pub(crate) struct Node<A, O> {
    pub(crate) segment: IndexSegment,
    /// Aggregate of the subtree, `pending` included.
    pub(crate) aggregate: A,
    /// Operation folded into `aggregate` but not yet into the children.
    pub(crate) pending: O,
    pub(crate) left: Option<Box<Node<A, O>>>,
    pub(crate) right: Option<Box<Node<A, O>>>,
}

impl<A, O> Node<A, O>
where
    A: Aggregate,
    O: BulkOperation<A>,
{
    pub(crate) fn build(segment: IndexSegment) -> Self {
        let (left, right) = if segment.len() > 1 {
            let (left, right) = segment.split();
            (
                Some(Box::new(Node::build(left))),
                Some(Box::new(Node::build(right))),
            )
        } else {
            (None, None)
        };

        Self {
            segment,
            aggregate: A::neutral(),
            pending: O::neutral(),
            left,
            right,
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Applies `op` to the whole subtree, deferring the children's share.
    pub(crate) fn absorb(&mut self, op: &O) {
        self.aggregate = op.collapse(&self.aggregate, self.segment);
        if !self.is_leaf() {
            self.pending = self.pending.combine_with(op);
        }
    }

    /// Hands the pending operation to both children and resets it.
    pub(crate) fn push_down(&mut self) {
        if self.pending.is_neutral() {
            return;
        }
        let pending = std::mem::replace(&mut self.pending, O::neutral());
        for child in [self.left.as_deref_mut(), self.right.as_deref_mut()]
            .into_iter()
            .flatten()
        {
            child.absorb(&pending);
        }
    }

    /// Recomputes the aggregate from the children. Only valid right after a
    /// push-down, while `pending` is neutral.
    pub(crate) fn pull_up(&mut self) {
        debug_assert!(self.pending.is_neutral());
        if let (Some(left), Some(right)) = (self.left.as_deref(), self.right.as_deref()) {
            self.aggregate = left.aggregate.combine(&right.aggregate);
        }
    }

    fn check_invariants<F>(&self, approx_eq: &F)
    where
        F: Fn(&A, &A) -> bool,
    {
        match (self.left.as_deref(), self.right.as_deref()) {
            (Some(left), Some(right)) => {
                assert_eq!(left.segment.left, self.segment.left);
                assert_eq!(left.segment.right, right.segment.left);
                assert_eq!(right.segment.right, self.segment.right);

                let children = left.aggregate.combine(&right.aggregate);
                let expected = self.pending.collapse(&children, self.segment);
                assert!(
                    approx_eq(&self.aggregate, &expected),
                    "aggregate of {} disagrees with its children",
                    self.segment
                );

                left.check_invariants(approx_eq);
                right.check_invariants(approx_eq);
            }
            (None, None) => {
                assert_eq!(self.segment.len(), 1, "leaf {} is not a unit", self.segment);
                assert!(
                    self.pending.is_neutral(),
                    "leaf {} holds a pending operation",
                    self.segment
                );
            }
            _ => panic!("node {} has a single child", self.segment),
        }
    }
}

/// Range tree over `[0, N)` answering range aggregates and applying range
/// bulk operations in `O(log N)`.
pub struct SegmentTree<A, O> {
    root: Option<Box<Node<A, O>>>,
    domain_size: usize,
}

impl<A, O> SegmentTree<A, O>
where
    A: Aggregate,
    O: BulkOperation<A>,
{
    /// Builds the tree for `domain_size` unit indices. A zero-sized domain
    /// produces a tree with no root that only accepts empty segments.
    pub fn new(domain_size: usize) -> Self {
        let root = if domain_size == 0 {
            None
        } else {
            Some(Box::new(Node::build(IndexSegment::new(0, domain_size))))
        };
        Self { root, domain_size }
    }

    pub fn domain_size(&self) -> usize {
        self.domain_size
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn domain(&self) -> IndexSegment {
        IndexSegment::new(0, self.domain_size)
    }

    /// Aggregate over the whole domain.
    pub fn total(&self) -> A {
        self.root
            .as_ref()
            .map(|root| root.aggregate.clone())
            .unwrap_or_else(A::neutral)
    }

    /// Returns the combined aggregate of every index in `segment`.
    ///
    /// Reading pushes pending operations down along the visited path, hence
    /// `&mut self`.
    pub fn compute_sum(&mut self, segment: IndexSegment) -> Result<A, CoreError> {
        self.check_segment(segment)?;
        match self.root.as_deref_mut() {
            Some(root) if !segment.is_empty() => Ok(walk(root, segment, &mut SumVisitor)),
            _ => Ok(A::neutral()),
        }
    }

    /// Applies `op` to every index in `segment`, after everything applied so far.
    pub fn apply_bulk_operation(&mut self, segment: IndexSegment, op: O) -> Result<(), CoreError> {
        self.check_segment(segment)?;
        if let Some(root) = self.root.as_deref_mut() {
            if !segment.is_empty() {
                walk(root, segment, &mut ApplyVisitor::new(&op));
            }
        }
        Ok(())
    }

    /// Walks the whole tree and panics on the first node whose state
    /// contradicts its children. Intended for tests.
    pub fn check_invariants<F>(&self, approx_eq: F)
    where
        F: Fn(&A, &A) -> bool,
    {
        if let Some(root) = self.root.as_deref() {
            assert_eq!(root.segment, self.domain());
            root.check_invariants(&approx_eq);
        }
    }

    fn check_segment(&self, segment: IndexSegment) -> Result<(), CoreError> {
        if segment.left > segment.right || segment.right > self.domain_size {
            return Err(CoreError::DomainViolation {
                segment,
                domain_size: self.domain_size,
            });
        }
        Ok(())
    }
}
