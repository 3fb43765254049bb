//! Typed ledger requests parsed from command arguments.

use std::fmt;

use chrono::NaiveDate;
use tally_core::{BudgetManager, CoreError};

use crate::cli::core::CommandError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The four ledger verbs understood by the request layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Earn,
    Spend,
    PayTax,
    ComputeIncome,
}

impl Verb {
    pub const ALL: [Verb; 4] = [Verb::Earn, Verb::Spend, Verb::PayTax, Verb::ComputeIncome];

    /// Canonical spelling used in help and usage strings.
    pub fn name(self) -> &'static str {
        match self {
            Verb::Earn => "Earn",
            Verb::Spend => "Spend",
            Verb::PayTax => "PayTax",
            Verb::ComputeIncome => "ComputeIncome",
        }
    }

    pub fn usage(self) -> &'static str {
        match self {
            Verb::Earn => "Earn <from> <to> <amount>",
            Verb::Spend => "Spend <from> <to> <amount>",
            Verb::PayTax => "PayTax <from> <to> <percentage>",
            Verb::ComputeIncome => "ComputeIncome <from> <to>",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Verb::Earn => "Record money earned, spread evenly over the days",
            Verb::Spend => "Record money spent, spread evenly over the days",
            Verb::PayTax => "Tax a percentage of everything earned so far on each day",
            Verb::ComputeIncome => "Print earned minus spent over the days",
        }
    }

    fn arity(self) -> usize {
        match self {
            Verb::ComputeIncome => 2,
            _ => 3,
        }
    }

    /// Case-insensitive lookup, so `earn`, `Earn` and `EARN` all match.
    pub fn from_name(name: &str) -> Option<Verb> {
        Verb::ALL
            .into_iter()
            .find(|verb| verb.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Request {
    Earn {
        from: NaiveDate,
        to: NaiveDate,
        amount: f64,
    },
    Spend {
        from: NaiveDate,
        to: NaiveDate,
        amount: f64,
    },
    PayTax {
        from: NaiveDate,
        to: NaiveDate,
        percentage: f64,
    },
    ComputeIncome {
        from: NaiveDate,
        to: NaiveDate,
    },
}

impl Request {
    /// Builds a request from the arguments that followed `verb` on the line.
    pub fn parse(verb: Verb, args: &[&str]) -> Result<Self, CommandError> {
        if args.len() != verb.arity() {
            return Err(CommandError::InvalidArguments(format!(
                "`{}` expects {} arguments, got {}. Usage: {}",
                verb,
                verb.arity(),
                args.len(),
                verb.usage()
            )));
        }

        let from = parse_date(args[0])?;
        let to = parse_date(args[1])?;
        if from > to {
            return Err(CommandError::InvalidArguments(format!(
                "start date {} is after end date {}",
                from, to
            )));
        }

        let request = match verb {
            Verb::Earn => Request::Earn {
                from,
                to,
                amount: parse_number("amount", args[2])?,
            },
            Verb::Spend => Request::Spend {
                from,
                to,
                amount: parse_number("amount", args[2])?,
            },
            Verb::PayTax => Request::PayTax {
                from,
                to,
                percentage: parse_number("percentage", args[2])?,
            },
            Verb::ComputeIncome => Request::ComputeIncome { from, to },
        };
        Ok(request)
    }

    pub fn verb(&self) -> Verb {
        match self {
            Request::Earn { .. } => Verb::Earn,
            Request::Spend { .. } => Verb::Spend,
            Request::PayTax { .. } => Verb::PayTax,
            Request::ComputeIncome { .. } => Verb::ComputeIncome,
        }
    }

    /// Runs the request against `ledger`. Only `ComputeIncome` yields a value.
    pub fn apply(&self, ledger: &mut BudgetManager) -> Result<Option<f64>, CoreError> {
        match *self {
            Request::Earn { from, to, amount } => ledger.earn(from, to, amount).map(|_| None),
            Request::Spend { from, to, amount } => ledger.spend(from, to, amount).map(|_| None),
            Request::PayTax {
                from,
                to,
                percentage,
            } => ledger.pay_tax(from, to, percentage).map(|_| None),
            Request::ComputeIncome { from, to } => ledger.compute_income(from, to).map(Some),
        }
    }
}

pub(crate) fn parse_date(input: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| {
        CommandError::InvalidArguments(format!("invalid date `{}` (use YYYY-MM-DD)", input))
    })
}

pub(crate) fn parse_number(label: &str, input: &str) -> Result<f64, CommandError> {
    match input.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CommandError::InvalidArguments(format!(
            "invalid {} `{}`",
            label, input
        ))),
    }
}
