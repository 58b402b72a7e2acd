//! Billing period types and date arithmetic.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Day of the reference month on which an invoice closes.
pub const CLOSING_DAY: u32 = 25;

/// Day of the month after the reference month on which payment is due.
pub const DUE_DAY: u32 = 10;

/// A card's billing bucket: one calendar month of one year.
///
/// Invoices are unique per (card, period); the period alone is a plain
/// value with no identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BillingPeriod {
    /// Reference month (1-12).
    pub month: u32,
    /// Reference year.
    pub year: i32,
}

impl BillingPeriod {
    /// Returns the billing period a date falls into.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            year: date.year(),
        }
    }

    /// Invoice closing date: day 25 of the reference month.
    #[must_use]
    pub fn closing_date(self) -> NaiveDate {
        // month is 1-12 and day 25 exists in every month
        NaiveDate::from_ymd_opt(self.year, self.month, CLOSING_DAY)
            .expect("billing period holds a calendar month")
    }

    /// Invoice due date: day 10 of the following month. December rolls
    /// over to January of the next year.
    #[must_use]
    pub fn due_date(self) -> NaiveDate {
        let (due_year, due_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };

        NaiveDate::from_ymd_opt(due_year, due_month, DUE_DAY)
            .expect("billing period holds a calendar month")
    }
}

impl std::fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

/// Advances a date by whole calendar months, preserving the day-of-month
/// and clamping to the last valid day of the target month (Jan 31 + 1
/// month = Feb 28, or Feb 29 in a leap year).
#[must_use]
pub fn advance_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .expect("installment schedules stay far within the supported date range")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_period_from_date() {
        let period = BillingPeriod::from_date(date(2026, 8, 7));
        assert_eq!(period, BillingPeriod { month: 8, year: 2026 });
    }

    #[test]
    fn test_closing_date_is_day_25() {
        let period = BillingPeriod { month: 2, year: 2026 };
        assert_eq!(period.closing_date(), date(2026, 2, 25));
    }

    #[test]
    fn test_due_date_is_day_10_of_next_month() {
        let period = BillingPeriod { month: 8, year: 2026 };
        assert_eq!(period.due_date(), date(2026, 9, 10));
    }

    #[test]
    fn test_december_due_date_rolls_into_next_year() {
        let period = BillingPeriod { month: 12, year: 2026 };
        assert_eq!(period.due_date(), date(2027, 1, 10));
    }

    #[rstest]
    #[case(date(2026, 1, 15), 1, date(2026, 2, 15))] // plain shift
    #[case(date(2026, 1, 31), 1, date(2026, 2, 28))] // clamp to short month
    #[case(date(2028, 1, 31), 1, date(2028, 2, 29))] // leap year keeps the 29th
    #[case(date(2026, 3, 31), 1, date(2026, 4, 30))] // 31st into a 30-day month
    #[case(date(2026, 11, 30), 3, date(2027, 2, 28))] // multi-month + year rollover
    #[case(date(2026, 8, 7), 0, date(2026, 8, 7))] // zero months is identity
    fn test_advance_months_clamps_day(
        #[case] start: NaiveDate,
        #[case] months: u32,
        #[case] expected: NaiveDate,
    ) {
        assert_eq!(advance_months(start, months), expected);
    }

    #[test]
    fn test_display_pads_month() {
        assert_eq!(BillingPeriod { month: 3, year: 2026 }.to_string(), "03/2026");
    }
}
