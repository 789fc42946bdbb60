use crate::error::{LoanError, Result};
use chrono::{Datelike, Days, Months, NaiveDate};
use log::{info, trace, warn};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt;
use std::iter::FusedIterator;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The fixed inputs a payoff projection is computed from.
///
/// `principal` is the balance outstanding at `start_date`, not the original
/// face value of the mortgage. Payments are assumed to land once per calendar
/// month starting with the month of `start_date`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct LoanState {
    pub principal: Decimal,
    pub payment: Decimal,
    pub start_date: NaiveDate,
}

impl LoanState {
    pub fn new(principal: Decimal, payment: Decimal, start_date: NaiveDate) -> Result<Self> {
        let loan = Self {
            principal,
            payment,
            start_date,
        };
        loan.validate()?;
        Ok(loan)
    }

    /// Rejects a payment that is not strictly positive or a negative principal.
    pub fn validate(&self) -> Result<()> {
        if self.payment <= Decimal::ZERO {
            return Err(LoanError::InvalidInput(format!(
                "payment must be positive, got {}",
                self.payment
            )));
        }
        if self.principal < Decimal::ZERO {
            return Err(LoanError::InvalidInput(format!(
                "principal must not be negative, got {}",
                self.principal
            )));
        }
        Ok(())
    }
}

/// One row of the payoff schedule.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Period {
    pub index: u32,
    pub period_date: NaiveDate,
    pub payment_amount: Decimal,
    pub remaining_balance: Decimal,
}

impl Period {
    pub fn new(
        index: u32,
        period_date: NaiveDate,
        payment_amount: Decimal,
        remaining_balance: Decimal,
    ) -> Self {
        Self {
            index,
            period_date,
            payment_amount,
            remaining_balance,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "period {}, date {}, payment {:.2}, remaining balance {:.2}",
            self.index, self.period_date, self.payment_amount, self.remaining_balance
        )
    }
}

pub type Schedule = Vec<Period>;

/// Headline figures for a loan as of a given date.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Summary {
    pub elapsed_periods: u32,
    pub remaining_periods: u32,
    pub current_balance: Decimal,
    pub payoff_date: NaiveDate,
    pub paid_amount: Decimal,
    pub completion_pct: f64,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LoanPhase {
    /// Balance outstanding, schedule grows by one period per month.
    Repaying,
    /// Balance is zero; the schedule is a single terminal record.
    PaidOff,
}

/// Whole calendar months between the start date and `as_of`.
///
/// Day-of-month is ignored on both sides. An `as_of` before the start date
/// yields 0.
pub fn elapsed_periods(loan: &LoanState, as_of: NaiveDate) -> u32 {
    let start = loan.start_date;
    let months = (as_of.year() - start.year()) * 12 + as_of.month() as i32 - start.month() as i32;

    if months < 0 {
        warn!(
            "as-of date {} precedes start date {}, treating as no elapsed periods",
            as_of, start
        );
        0
    } else {
        months as u32
    }
}

/// Balance left after the payments elapsed by `as_of`, never below zero.
pub fn current_balance(loan: &LoanState, as_of: NaiveDate) -> Decimal {
    let elapsed = Decimal::from(elapsed_periods(loan, as_of));

    // an overflowing product can only mean the balance is long gone
    match elapsed.checked_mul(loan.payment) {
        Some(paid) => (loan.principal - paid).max(Decimal::ZERO),
        None => Decimal::ZERO,
    }
}

/// Number of full payments that fit in the principal.
pub fn total_periods(loan: &LoanState) -> Result<u32> {
    loan.validate()?;

    loan.principal
        .checked_div(loan.payment)
        .and_then(|periods| periods.floor().to_u32())
        .ok_or_else(|| {
            LoanError::InvalidInput(format!(
                "principal {} is out of range for payment {}",
                loan.principal, loan.payment
            ))
        })
}

pub fn phase(loan: &LoanState, as_of: NaiveDate) -> LoanPhase {
    if current_balance(loan, as_of).is_zero() {
        LoanPhase::PaidOff
    } else {
        LoanPhase::Repaying
    }
}

/// Date of the final period of a schedule generated as of the start month.
pub fn nominal_payoff_date(loan: &LoanState) -> Result<NaiveDate> {
    let total = total_periods(loan)?;

    first_of_month(loan.start_date)
        .checked_add_months(Months::new(total.max(1) - 1))
        .ok_or(LoanError::DateOutOfRange(loan.start_date))
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

/// Steps one calendar month forward with the day pinned to the 1st, so
/// month length never causes drift (Jan 31 steps to Feb 1).
pub fn next_period_date(date: NaiveDate) -> Result<NaiveDate> {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .ok_or(LoanError::DateOutOfRange(date))
}

/// Lazily yields the payoff schedule from the as-of month onward.
///
/// The iterator is bounded: it emits at most `limit` periods (the number of
/// full payments in the principal) and stops right after the balance reaches
/// zero. Only a schedule that runs into the limit with a remainder still
/// outstanding has its last period clear that remainder, so the last balance
/// is always exactly zero.
#[derive(Clone, Debug)]
pub struct ScheduleIter {
    payment: Decimal,
    balance: Decimal,
    period_date: NaiveDate,
    index: u32,
    limit: u32,
    done: bool,
}

impl Iterator for ScheduleIter {
    type Item = Period;

    fn next(&mut self) -> Option<Period> {
        if self.done || self.index >= self.limit {
            return None;
        }
        self.index += 1;

        let applied = if self.index == self.limit {
            self.balance
        } else {
            self.payment.min(self.balance)
        };
        self.balance -= applied;

        let period = Period::new(self.index, self.period_date, applied, self.balance);
        trace!("{}", period);

        if self.balance.is_zero() {
            self.done = true;
        } else {
            // the last reachable date was checked when the iterator was built
            self.period_date = self.period_date + Months::new(1);
        }
        Some(period)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            let left = (self.limit - self.index) as usize;
            (left.min(1), Some(left))
        }
    }
}

impl FusedIterator for ScheduleIter {}

/// Builds the payoff schedule for `loan` as seen from `as_of`.
///
/// Fails with `InvalidInput` before any work is done when the payment is not
/// positive or the principal is negative.
pub fn generate_schedule(loan: &LoanState, as_of: NaiveDate) -> Result<ScheduleIter> {
    let total = total_periods(loan)?;
    let balance = current_balance(loan, as_of);

    let (period_date, limit) = if balance.is_zero() {
        (nominal_payoff_date(loan)?, 1)
    } else {
        (first_of_month(as_of), total.max(1))
    };

    period_date
        .checked_add_months(Months::new(limit - 1))
        .ok_or(LoanError::DateOutOfRange(period_date))?;

    trace!(
        "schedule from {} with balance {}, at most {} periods",
        period_date,
        balance,
        limit
    );

    Ok(ScheduleIter {
        payment: loan.payment,
        balance,
        period_date,
        index: 0,
        limit,
        done: false,
    })
}

/// Derives the headline figures from the loan and an already built schedule.
pub fn summarize(loan: &LoanState, schedule: &[Period], as_of: NaiveDate) -> Result<Summary> {
    loan.validate()?;

    let balance = current_balance(loan, as_of);
    let paid_amount = loan.principal - balance;

    let completion_pct = if loan.principal.is_zero() {
        100.
    } else {
        (paid_amount * Decimal::ONE_HUNDRED / loan.principal)
            .to_f64()
            .unwrap_or(0.)
            .clamp(0., 100.)
    };

    let payoff_date = match schedule.last() {
        Some(last) => last.period_date,
        None => nominal_payoff_date(loan)?,
    };

    let remaining_periods = schedule
        .iter()
        .filter(|period| period.payment_amount > Decimal::ZERO)
        .count() as u32;

    let summary = Summary {
        elapsed_periods: elapsed_periods(loan, as_of),
        remaining_periods,
        current_balance: balance,
        payoff_date,
        paid_amount,
        completion_pct,
    };
    info!(
        "as of {}: {} periods elapsed, balance {}, payoff {} ({:.1}% complete)",
        as_of, summary.elapsed_periods, balance, payoff_date, completion_pct
    );
    Ok(summary)
}

/// Materializes the schedule and its summary in one pass.
pub fn amortize(loan: &LoanState, as_of: NaiveDate) -> Result<(Schedule, Summary)> {
    let schedule: Schedule = generate_schedule(loan, as_of)?.collect();
    let summary = summarize(loan, &schedule, as_of)?;
    Ok((schedule, summary))
}
