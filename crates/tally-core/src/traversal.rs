//! The single tree walk shared by range queries and range updates.
//!
//! `walk` owns the shape of the descent: skip disjoint nodes, push pending
//! work down before looking inside a node, stop at fully covered nodes and
//! recurse into both children otherwise. What happens at each of those three
//! points is decided by a [`Visitor`].

use tally_domain::{Aggregate, BulkOperation, IndexSegment};

use crate::tree::Node;

pub(crate) trait Visitor<A, O> {
    type Output;

    /// The node shares no index with the range; it is left untouched.
    fn on_disjoint(&mut self, node: &Node<A, O>) -> Self::Output;

    /// The range covers the whole node, whose pending work was just pushed.
    fn on_fully_covered(&mut self, node: &mut Node<A, O>) -> Self::Output;

    /// Called after both children were walked.
    fn on_partial(
        &mut self,
        node: &mut Node<A, O>,
        left: Self::Output,
        right: Self::Output,
    ) -> Self::Output;
}

pub(crate) fn walk<A, O, V>(node: &mut Node<A, O>, range: IndexSegment, visitor: &mut V) -> V::Output
where
    A: Aggregate,
    O: BulkOperation<A>,
    V: Visitor<A, O>,
{
    if !node.segment.intersects(&range) {
        return visitor.on_disjoint(node);
    }

    node.push_down();

    if range.contains(&node.segment) {
        return visitor.on_fully_covered(node);
    }

    // A unit leaf that intersects the range is always fully covered, so a
    // partially covered node has both children.
    let (left, right) = match (node.left.as_deref_mut(), node.right.as_deref_mut()) {
        (Some(left), Some(right)) => (walk(left, range, visitor), walk(right, range, visitor)),
        _ => unreachable!("partially covered node {} has no children", node.segment),
    };
    visitor.on_partial(node, left, right)
}

/// Read-only visitor folding the covered aggregates together.
pub(crate) struct SumVisitor;

impl<A, O> Visitor<A, O> for SumVisitor
where
    A: Aggregate,
{
    type Output = A;

    fn on_disjoint(&mut self, _node: &Node<A, O>) -> A {
        A::neutral()
    }

    fn on_fully_covered(&mut self, node: &mut Node<A, O>) -> A {
        node.aggregate.clone()
    }

    fn on_partial(&mut self, _node: &mut Node<A, O>, left: A, right: A) -> A {
        left.combine(&right)
    }
}

/// Mutating visitor that folds one bulk operation into the covered nodes and
/// refreshes every ancestor on the way back up.
pub(crate) struct ApplyVisitor<'a, O> {
    op: &'a O,
}

impl<'a, O> ApplyVisitor<'a, O> {
    pub(crate) fn new(op: &'a O) -> Self {
        Self { op }
    }
}

impl<A, O> Visitor<A, O> for ApplyVisitor<'_, O>
where
    A: Aggregate,
    O: BulkOperation<A>,
{
    type Output = ();

    fn on_disjoint(&mut self, _node: &Node<A, O>) {}

    fn on_fully_covered(&mut self, node: &mut Node<A, O>) {
        node.absorb(self.op);
    }

    fn on_partial(&mut self, node: &mut Node<A, O>, _left: (), _right: ()) {
        node.pull_up();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SegmentTree;
    use tally_domain::{LinearUpdate, MoneyTotals};

    /// Records which hooks fired, in order, without touching the nodes.
    #[derive(Default)]
    struct TraceVisitor {
        events: Vec<String>,
    }

    impl<A, O> Visitor<A, O> for TraceVisitor {
        type Output = ();

        fn on_disjoint(&mut self, node: &Node<A, O>) {
            self.events.push(format!("disjoint {}", node.segment));
        }

        fn on_fully_covered(&mut self, node: &mut Node<A, O>) {
            self.events.push(format!("covered {}", node.segment));
        }

        fn on_partial(&mut self, node: &mut Node<A, O>, _left: (), _right: ()) {
            self.events.push(format!("partial {}", node.segment));
        }
    }

    #[test]
    fn walk_visits_the_canonical_decomposition() {
        let mut root: Node<MoneyTotals, LinearUpdate> = Node::build(IndexSegment::new(0, 4));
        let mut trace = TraceVisitor::default();
        walk(&mut root, IndexSegment::new(1, 4), &mut trace);

        assert_eq!(
            trace.events,
            vec![
                "disjoint [0, 1)",
                "covered [1, 2)",
                "partial [0, 2)",
                "covered [2, 4)",
                "partial [0, 4)",
            ]
        );
    }

    #[test]
    fn disjoint_nodes_keep_their_pending_work() {
        let mut tree = SegmentTree::<MoneyTotals, LinearUpdate>::new(4);
        tree.apply_bulk_operation(IndexSegment::new(2, 4), LinearUpdate::earn(1.0))
            .expect("apply");
        tree.compute_sum(IndexSegment::new(0, 2)).expect("query");
        tree.check_invariants(|a, b| a == b);
        assert_eq!(
            tree.compute_sum(IndexSegment::new(2, 4)),
            Ok(MoneyTotals::new(2.0, 0.0))
        );
    }
}
