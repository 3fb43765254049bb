//! Date-indexed income ledger on top of [`SegmentTree`].

use chrono::NaiveDate;
use tally_domain::{LinearUpdate, MoneyTotals};
use tracing::debug;

use crate::{date_domain::DateDomain, error::CoreError, tree::SegmentTree};

/// Largest magnitude accepted for a single earn or spend.
pub const MAX_AMOUNT: f64 = 1e15;

/// Tax percentages are accepted in `[0, MAX_TAX_PERCENTAGE]`, which keeps every
/// composed tax factor within `[0, 1]`.
pub const MAX_TAX_PERCENTAGE: f64 = 100.0;

/// Tracks money earned, spent and taxed per day over a fixed [`DateDomain`].
///
/// Amounts given for a date range are spread evenly over its days; taxes only
/// reduce money earned before they are paid.
pub struct BudgetManager {
    domain: DateDomain,
    tree: SegmentTree<MoneyTotals, LinearUpdate>,
}

impl BudgetManager {
    pub fn new(domain: DateDomain) -> Self {
        Self {
            domain,
            tree: SegmentTree::new(domain.len()),
        }
    }

    pub fn with_default_domain() -> Self {
        Self::new(DateDomain::default())
    }

    pub fn domain(&self) -> &DateDomain {
        &self.domain
    }

    /// Records `amount` earned over `[from, to]`.
    pub fn earn(&mut self, from: NaiveDate, to: NaiveDate, amount: f64) -> Result<(), CoreError> {
        self.distribute(from, to, amount, LinearUpdate::earn)
    }

    /// Records `amount` spent over `[from, to]`.
    pub fn spend(&mut self, from: NaiveDate, to: NaiveDate, amount: f64) -> Result<(), CoreError> {
        self.distribute(from, to, amount, LinearUpdate::spend)
    }

    /// Taxes `percentage` of everything earned so far on each day of `[from, to]`.
    ///
    /// `percentage` must lie in `[0, 100]`.
    pub fn pay_tax(
        &mut self,
        from: NaiveDate,
        to: NaiveDate,
        percentage: f64,
    ) -> Result<(), CoreError> {
        ensure_finite("tax percentage", percentage)?;
        if !(0.0..=MAX_TAX_PERCENTAGE).contains(&percentage) {
            return Err(CoreError::InvalidAmount(format!(
                "tax percentage must lie in [0, {MAX_TAX_PERCENTAGE}], got {percentage}"
            )));
        }
        let segment = self.domain.inclusive_segment(from, to)?;
        debug!(%from, %to, percentage, "paying tax");
        self.tree
            .apply_bulk_operation(segment, LinearUpdate::tax(percentage))
    }

    /// Net income (earned minus spent) over `[from, to]`.
    pub fn compute_income(&mut self, from: NaiveDate, to: NaiveDate) -> Result<f64, CoreError> {
        Ok(self.totals(from, to)?.net())
    }

    /// Earned and spent totals over `[from, to]`.
    pub fn totals(&mut self, from: NaiveDate, to: NaiveDate) -> Result<MoneyTotals, CoreError> {
        let segment = self.domain.inclusive_segment(from, to)?;
        let totals = self.tree.compute_sum(segment)?;
        debug!(%from, %to, added = totals.added, spent = totals.spent, "computed totals");
        Ok(totals)
    }

    fn distribute(
        &mut self,
        from: NaiveDate,
        to: NaiveDate,
        amount: f64,
        update: fn(f64) -> LinearUpdate,
    ) -> Result<(), CoreError> {
        ensure_finite("amount", amount)?;
        if amount.abs() > MAX_AMOUNT {
            return Err(CoreError::InvalidAmount(format!(
                "amount magnitude must not exceed {MAX_AMOUNT:e}, got {amount}"
            )));
        }
        let segment = self.domain.inclusive_segment(from, to)?;
        let per_day = amount / segment.len() as f64;
        debug!(%from, %to, amount, per_day, "distributing amount");
        self.tree.apply_bulk_operation(segment, update(per_day))
    }
}

impl Default for BudgetManager {
    fn default() -> Self {
        Self::with_default_domain()
    }
}

fn ensure_finite(label: &str, value: f64) -> Result<(), CoreError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CoreError::InvalidAmount(format!("{label} must be finite, got {value}")))
    }
}
