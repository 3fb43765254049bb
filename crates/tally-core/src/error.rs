use chrono::NaiveDate;
use tally_domain::IndexSegment;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("Segment {segment} lies outside the domain [0, {domain_size})")]
    DomainViolation {
        segment: IndexSegment,
        domain_size: usize,
    },
    #[error("Date {0} is outside the ledger domain")]
    DateOutOfDomain(NaiveDate),
    #[error("Invalid date range: {from} is after {to}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },
    #[error("Invalid date domain: {start} must be before {end}")]
    InvalidDomain { start: NaiveDate, end: NaiveDate },
    #[error("Invalid date domain: {days} days exceeds the maximum of {max}")]
    DomainTooLarge { days: i64, max: usize },
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}
