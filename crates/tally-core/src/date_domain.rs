//! Calendar window addressed by the ledger and its mapping to tree indices.

use chrono::{Duration, NaiveDate};
use tally_domain::IndexSegment;

use crate::error::CoreError;

/// Longest accepted domain: one 400-year Gregorian cycle.
pub const MAX_DOMAIN_DAYS: usize = 146_097;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Fixed span of days `[start, end)` mapped onto indices `[0, len)`.
pub struct DateDomain {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateDomain {
    /// Validates `start < end` and a span of at most [`MAX_DOMAIN_DAYS`].
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        if end <= start {
            return Err(CoreError::InvalidDomain { start, end });
        }
        let days = (end - start).num_days();
        if days > MAX_DOMAIN_DAYS as i64 {
            return Err(CoreError::DomainTooLarge {
                days,
                max: MAX_DOMAIN_DAYS,
            });
        }
        Ok(Self { start, end })
    }

    /// First addressable day.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// First day past the domain.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the domain.
    pub fn len(&self) -> usize {
        (self.end - self.start).num_days() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    pub fn index_of(&self, date: NaiveDate) -> Result<usize, CoreError> {
        if !self.contains(date) {
            return Err(CoreError::DateOutOfDomain(date));
        }
        Ok((date - self.start).num_days() as usize)
    }

    pub fn date_at(&self, index: usize) -> Option<NaiveDate> {
        if index >= self.len() {
            return None;
        }
        Some(self.start + Duration::days(index as i64))
    }

    /// Converts the inclusive day range `[from, to]` into the half-open index
    /// range `[index(from), index(to) + 1)`.
    pub fn inclusive_segment(&self, from: NaiveDate, to: NaiveDate) -> Result<IndexSegment, CoreError> {
        if from > to {
            return Err(CoreError::InvalidRange { from, to });
        }
        let left = self.index_of(from)?;
        let right = self.index_of(to)? + 1;
        Ok(IndexSegment::new(left, right))
    }
}

impl Default for DateDomain {
    /// The twenty-first century: 2000-01-01 up to, not including, 2100-01-01.
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2000, 1, 1).expect("valid calendar date"),
            end: NaiveDate::from_ymd_opt(2100, 1, 1).expect("valid calendar date"),
        }
    }
}
