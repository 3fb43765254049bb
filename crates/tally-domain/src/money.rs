//! Earned/spent totals and the linear tax-then-add transform that drives the
//! income ledger.

use std::{
    iter::Sum,
    ops::{Add, AddAssign},
};

use serde::{Deserialize, Serialize};

use crate::{
    algebra::{Aggregate, BulkOperation},
    segment::IndexSegment,
};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
/// Money accumulated over a range of days.
pub struct MoneyTotals {
    pub added: f64,
    pub spent: f64,
}

impl MoneyTotals {
    pub fn new(added: f64, spent: f64) -> Self {
        Self { added, spent }
    }

    /// Net income: what was added minus what was spent.
    pub fn net(&self) -> f64 {
        self.added - self.spent
    }
}

impl Add for MoneyTotals {
    type Output = MoneyTotals;

    fn add(self, rhs: Self) -> Self::Output {
        MoneyTotals {
            added: self.added + rhs.added,
            spent: self.spent + rhs.spent,
        }
    }
}

impl AddAssign for MoneyTotals {
    fn add_assign(&mut self, rhs: Self) {
        self.added += rhs.added;
        self.spent += rhs.spent;
    }
}

impl Sum for MoneyTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(MoneyTotals::default(), Add::add)
    }
}

impl Aggregate for MoneyTotals {
    fn neutral() -> Self {
        MoneyTotals::default()
    }

    fn combine(&self, other: &Self) -> Self {
        *self + *other
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
/// Per-day transform: tax the existing `added` total, then add
/// `add_delta_per_unit` to it and `spend_delta_per_unit` to `spent`.
pub struct LinearUpdate {
    pub tax_percentage: f64,
    pub add_delta_per_unit: f64,
    pub spend_delta_per_unit: f64,
}

impl LinearUpdate {
    pub fn earn(per_unit: f64) -> Self {
        Self {
            add_delta_per_unit: per_unit,
            ..Self::default()
        }
    }

    pub fn spend(per_unit: f64) -> Self {
        Self {
            spend_delta_per_unit: per_unit,
            ..Self::default()
        }
    }

    pub fn tax(percentage: f64) -> Self {
        Self {
            tax_percentage: percentage,
            ..Self::default()
        }
    }

    /// Multiplier applied to previously added money, `1 - tax% / 100`.
    pub fn tax_factor(&self) -> f64 {
        1.0 - self.tax_percentage / 100.0
    }
}

impl BulkOperation<MoneyTotals> for LinearUpdate {
    fn neutral() -> Self {
        LinearUpdate::default()
    }

    fn is_neutral(&self) -> bool {
        self.tax_percentage == 0.0
            && self.add_delta_per_unit == 0.0
            && self.spend_delta_per_unit == 0.0
    }

    fn collapse(&self, aggregate: &MoneyTotals, segment: IndexSegment) -> MoneyTotals {
        let units = segment.len() as f64;
        MoneyTotals {
            added: aggregate.added * self.tax_factor() + self.add_delta_per_unit * units,
            spent: aggregate.spent + self.spend_delta_per_unit * units,
        }
    }

    fn combine_with(&self, later: &Self) -> Self {
        let later_factor = later.tax_factor();
        LinearUpdate {
            tax_percentage: 100.0 * (1.0 - self.tax_factor() * later_factor),
            // Money added by `self` is still exposed to the later tax.
            add_delta_per_unit: self.add_delta_per_unit * later_factor + later.add_delta_per_unit,
            spend_delta_per_unit: self.spend_delta_per_unit + later.spend_delta_per_unit,
        }
    }
}
