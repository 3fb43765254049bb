use proptest::prelude::*;
use tally_core::SegmentTree;
use tally_domain::{Aggregate, BulkOperation, IndexSegment, LinearUpdate, MoneyTotals};

type MoneyTree = SegmentTree<MoneyTotals, LinearUpdate>;

#[derive(Debug, Clone)]
enum Step {
    Apply(IndexSegment, LinearUpdate),
    Query(IndexSegment),
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * a.abs().max(b.abs()).max(1.0)
}

fn totals_close(a: &MoneyTotals, b: &MoneyTotals) -> bool {
    close(a.added, b.added) && close(a.spent, b.spent)
}

fn segment_in(size: usize) -> impl Strategy<Value = IndexSegment> {
    (0..=size, 0..=size).prop_map(|(a, b)| IndexSegment::new(a.min(b), a.max(b)))
}

fn update() -> impl Strategy<Value = LinearUpdate> {
    prop_oneof![
        (-50.0f64..50.0).prop_map(LinearUpdate::earn),
        (0.0f64..50.0).prop_map(LinearUpdate::spend),
        (0.0f64..60.0).prop_map(LinearUpdate::tax),
        (0.0f64..60.0, -50.0f64..50.0, 0.0f64..50.0).prop_map(|(tax, add, spend)| {
            LinearUpdate {
                tax_percentage: tax,
                add_delta_per_unit: add,
                spend_delta_per_unit: spend,
            }
        }),
    ]
}

fn scenario() -> impl Strategy<Value = (usize, Vec<Step>)> {
    (1usize..48).prop_flat_map(|size| {
        let step = prop_oneof![
            (segment_in(size), update()).prop_map(|(segment, op)| Step::Apply(segment, op)),
            segment_in(size).prop_map(Step::Query),
        ];
        (Just(size), proptest::collection::vec(step, 1..60))
    })
}

/// Reference ledger that applies every operation to each day individually.
struct PerDayModel {
    days: Vec<MoneyTotals>,
}

impl PerDayModel {
    fn new(size: usize) -> Self {
        Self {
            days: vec![MoneyTotals::neutral(); size],
        }
    }

    fn apply(&mut self, segment: IndexSegment, op: &LinearUpdate) {
        for index in segment.left..segment.right {
            self.days[index] = op.collapse(&self.days[index], IndexSegment::unit(index));
        }
    }

    fn sum(&self, segment: IndexSegment) -> MoneyTotals {
        self.days[segment.left..segment.right].iter().copied().sum()
    }
}

fn replay(size: usize, steps: &[Step]) -> (MoneyTree, PerDayModel) {
    let mut tree = MoneyTree::new(size);
    let mut model = PerDayModel::new(size);
    for step in steps {
        if let Step::Apply(segment, op) = step {
            tree.apply_bulk_operation(*segment, *op).expect("in-domain update");
            model.apply(*segment, op);
        }
    }
    (tree, model)
}

proptest! {
    #[test]
    fn tree_matches_per_day_model((size, steps) in scenario()) {
        let mut tree = MoneyTree::new(size);
        let mut model = PerDayModel::new(size);

        for step in &steps {
            match step {
                Step::Apply(segment, op) => {
                    tree.apply_bulk_operation(*segment, *op).expect("in-domain update");
                    model.apply(*segment, op);
                }
                Step::Query(segment) => {
                    let actual = tree.compute_sum(*segment).expect("in-domain query");
                    let expected = model.sum(*segment);
                    prop_assert!(
                        totals_close(&actual, &expected),
                        "query {} returned {:?}, expected {:?}", segment, actual, expected
                    );
                }
            }
            tree.check_invariants(totals_close);
        }
    }

    #[test]
    fn adjacent_segments_add_up((size, steps) in scenario(), split in any::<prop::sample::Index>()) {
        let (mut tree, _) = replay(size, &steps);
        let whole = tree.domain();
        let mid = split.index(size + 1);

        let left = tree.compute_sum(IndexSegment::new(0, mid)).unwrap();
        let right = tree.compute_sum(IndexSegment::new(mid, size)).unwrap();
        let full = tree.compute_sum(whole).unwrap();

        prop_assert!(totals_close(&left.combine(&right), &full));
    }

    #[test]
    fn any_partition_sums_to_the_domain_total(
        (size, steps) in scenario(),
        cuts in proptest::collection::vec(any::<prop::sample::Index>(), 0..8),
    ) {
        let (mut tree, _) = replay(size, &steps);
        let mut bounds: Vec<usize> = cuts.iter().map(|cut| cut.index(size + 1)).collect();
        bounds.push(0);
        bounds.push(size);
        bounds.sort_unstable();
        bounds.dedup();

        let mut parts = MoneyTotals::neutral();
        for pair in bounds.windows(2) {
            let part = tree.compute_sum(IndexSegment::new(pair[0], pair[1])).unwrap();
            parts = parts.combine(&part);
        }

        let full = tree.compute_sum(tree.domain()).unwrap();
        prop_assert!(totals_close(&parts, &full));
        prop_assert!(totals_close(&full, &tree.total()));
    }

    #[test]
    fn neutral_update_changes_nothing((size, steps) in scenario(), target in segment_in(47)) {
        let (mut tree, model) = replay(size, &steps);
        let target = IndexSegment::new(target.left.min(size), target.right.min(size));

        tree.apply_bulk_operation(target, LinearUpdate::neutral()).unwrap();

        for index in 0..size {
            let unit = IndexSegment::unit(index);
            let actual = tree.compute_sum(unit).unwrap();
            prop_assert!(totals_close(&actual, &model.sum(unit)));
        }
    }

    #[test]
    fn repeated_queries_are_bit_identical((size, steps) in scenario(), target in segment_in(47)) {
        let (mut tree, _) = replay(size, &steps);
        let target = IndexSegment::new(target.left.min(size), target.right.min(size));

        let first = tree.compute_sum(target).unwrap();
        let second = tree.compute_sum(target).unwrap();

        prop_assert_eq!(first.added.to_bits(), second.added.to_bits());
        prop_assert_eq!(first.spent.to_bits(), second.spent.to_bits());
    }
}

#[test]
fn tax_before_earning_differs_from_tax_after() {
    let range = IndexSegment::new(2, 6);

    let mut taxed_first = MoneyTree::new(8);
    taxed_first.apply_bulk_operation(range, LinearUpdate::tax(50.0)).unwrap();
    taxed_first.apply_bulk_operation(range, LinearUpdate::earn(25.0)).unwrap();

    let mut earned_first = MoneyTree::new(8);
    earned_first.apply_bulk_operation(range, LinearUpdate::earn(25.0)).unwrap();
    earned_first.apply_bulk_operation(range, LinearUpdate::tax(50.0)).unwrap();

    assert_eq!(taxed_first.compute_sum(range).unwrap().net(), 100.0);
    assert_eq!(earned_first.compute_sum(range).unwrap().net(), 50.0);
}
