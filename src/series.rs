//! Chart-ready series derived from a payoff schedule.
//!
//! Every function here is a plain projection over an already generated
//! schedule or summary. Rendering and labelling belong to the caller.

use crate::loan::{Period, Summary};
use chrono::NaiveDate;
use rust_decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub type Series = Vec<(NaiveDate, Decimal)>;

/// Remaining balance after each period.
pub fn balance_series(schedule: &[Period]) -> Series {
    schedule
        .iter()
        .map(|period| (period.period_date, period.remaining_balance))
        .collect()
}

pub fn payment_series(schedule: &[Period]) -> Series {
    schedule
        .iter()
        .map(|period| (period.period_date, period.payment_amount))
        .collect()
}

/// Running total of the payments made through each period.
pub fn cumulative_payments(schedule: &[Period]) -> Series {
    schedule
        .iter()
        .scan(Decimal::ZERO, |total, period| {
            *total += period.payment_amount;
            Some((period.period_date, *total))
        })
        .collect()
}

/// Thins a monthly series to one point per year of the schedule plus the
/// final point, for timeline views.
pub fn milestones(series: &[(NaiveDate, Decimal)]) -> Series {
    let last = series.len().saturating_sub(1);
    series
        .iter()
        .enumerate()
        .filter(|(i, _)| i % 12 == 0 || *i == last)
        .map(|(_, point)| *point)
        .collect()
}

/// Split of the principal into the part already repaid and the part left.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PaidVsRemaining {
    pub paid: Decimal,
    pub remaining: Decimal,
}

impl From<&Summary> for PaidVsRemaining {
    fn from(summary: &Summary) -> Self {
        Self {
            paid: summary.paid_amount,
            remaining: summary.current_balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::{amortize, LoanState};
    use rust_decimal_macros::dec;
    use test_log::test;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_series_follow_schedule() {
        let loan = LoanState::new(dec!(5000), dec!(2000), date(2025, 1, 1)).unwrap();
        let (schedule, _) = amortize(&loan, date(2025, 1, 1)).unwrap();

        assert_eq!(
            balance_series(&schedule),
            vec![
                (date(2025, 1, 1), dec!(3000)),
                (date(2025, 2, 1), Decimal::ZERO),
            ]
        );
        assert_eq!(
            payment_series(&schedule),
            vec![(date(2025, 1, 1), dec!(2000)), (date(2025, 2, 1), dec!(3000))]
        );
        assert_eq!(
            cumulative_payments(&schedule),
            vec![(date(2025, 1, 1), dec!(2000)), (date(2025, 2, 1), dec!(5000))]
        );
    }

    #[test]
    fn test_cumulative_payments_cover_principal() {
        let loan = LoanState::new(dec!(168000), dec!(1667), date(2025, 1, 1)).unwrap();
        let (schedule, _) = amortize(&loan, date(2025, 1, 1)).unwrap();

        let cumulative = cumulative_payments(&schedule);
        assert_eq!(cumulative.len(), schedule.len());
        assert_eq!(cumulative.last().unwrap().1, dec!(168000));
        for pair in cumulative.windows(2) {
            assert!(pair[1].1 >= pair[0].1);
        }
    }

    #[test]
    fn test_payment_series_is_constant() {
        let loan = LoanState::new(dec!(168000), dec!(1667), date(2025, 1, 1)).unwrap();

        let (schedule, _) = amortize(&loan, date(2026, 1, 15)).unwrap();
        let payments = payment_series(&schedule);
        assert!(payments.iter().all(|(_, amount)| *amount <= loan.payment));
        let (_, regular) = payments.split_last().unwrap();
        assert!(regular.iter().all(|(_, amount)| *amount == loan.payment));

        // from the first month the last row settles what the cap leaves over
        let (schedule, _) = amortize(&loan, date(2025, 1, 1)).unwrap();
        let payments = payment_series(&schedule);
        let (settling, regular) = payments.split_last().unwrap();
        assert!(regular.iter().all(|(_, amount)| *amount == loan.payment));
        assert_eq!(settling.1, dec!(2967));
    }

    #[test]
    fn test_milestones() {
        let loan = LoanState::new(dec!(168000), dec!(1667), date(2025, 1, 1)).unwrap();
        let (schedule, _) = amortize(&loan, date(2026, 1, 15)).unwrap();

        let points = milestones(&balance_series(&schedule));
        assert_eq!(points.len(), 9);
        assert_eq!(points[0], (date(2026, 1, 1), dec!(146329)));
        assert_eq!(points[1], (date(2027, 1, 1), dec!(126325)));
        assert_eq!(points[8], (date(2033, 5, 1), Decimal::ZERO));

        assert!(milestones(&[]).is_empty());
        let single = [(date(2025, 1, 1), Decimal::ZERO)];
        assert_eq!(milestones(&single), single.to_vec());
    }

    #[test]
    fn test_paid_vs_remaining() {
        let loan = LoanState::new(dec!(168000), dec!(1667), date(2025, 1, 1)).unwrap();
        let (_, summary) = amortize(&loan, date(2026, 1, 1)).unwrap();

        let split = PaidVsRemaining::from(&summary);
        assert_eq!(split.paid, dec!(20004));
        assert_eq!(split.remaining, dec!(147996));
        assert_eq!(split.paid + split.remaining, loan.principal);
    }
}
