//! Installment allocation.
//!
//! This is the numeric heart of the billing engine. A purchase total is
//! divided into N centavo-rounded installments; whatever rounding drift
//! remains is added to the last installment, so the posted entries always
//! reconstruct the total exactly.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use atlasbank_shared::types::money::round_money;

use super::error::PurchaseError;
use super::period::{BillingPeriod, advance_months};

/// One scheduled portion of a purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installment {
    /// Zero-based installment index.
    pub index: u32,
    /// The date the installment bills on: the purchase date advanced by
    /// `index` months, day clamped to the target month.
    pub billing_date: NaiveDate,
    /// The billing period the installment's invoice belongs to.
    pub period: BillingPeriod,
    /// Centavo-rounded amount. The last installment also carries the
    /// rounding adjustment.
    pub amount: Decimal,
}

/// A fully allocated purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallmentPlan {
    /// The purchase total, rounded to centavos.
    pub total: Decimal,
    /// Effective installment count (requested count coerced to >= 1).
    pub count: u32,
    /// The per-installment amount before adjustment.
    pub per_installment: Decimal,
    /// Rounding drift added to the last installment. May be negative.
    pub adjustment: Decimal,
    /// The scheduled installments, in billing order.
    pub installments: Vec<Installment>,
}

/// Validates a purchase against the card's available limit.
///
/// Checks run in a fixed order:
/// 1. the total must be positive
/// 2. the total must not exceed the available limit
///
/// # Errors
///
/// Returns the first violated rule as a [`PurchaseError`].
pub fn validate_purchase(total: Decimal, available_limit: Decimal) -> Result<(), PurchaseError> {
    if total <= Decimal::ZERO {
        return Err(PurchaseError::InvalidAmount);
    }

    if total > available_limit {
        return Err(PurchaseError::InsufficientLimit {
            available: available_limit,
            requested: total,
        });
    }

    Ok(())
}

/// Splits a validated purchase total into dated installments.
///
/// - A requested count of zero or less is coerced to 1 (defined fallback,
///   not an error).
/// - `per_installment = round2(total / count)`; the difference between the
///   total and `round2(per_installment * count)` goes entirely onto the
///   last installment.
/// - Installment `i` bills on `purchase_date + i months` with the
///   day-of-month clamped to the target month.
///
/// Guarantee: the installment amounts sum to the (centavo-rounded) total
/// exactly, for any count.
#[must_use]
pub fn plan_installments(
    total: Decimal,
    requested_count: i32,
    purchase_date: NaiveDate,
) -> InstallmentPlan {
    let count = u32::try_from(requested_count).map_or(1, |n| n.max(1));
    let total = round_money(total);

    let count_dec = Decimal::from(count);
    let per_installment = round_money(total / count_dec);
    let reconstructed = round_money(per_installment * count_dec);
    let adjustment = round_money(total - reconstructed);

    let installments = (0..count)
        .map(|index| {
            let billing_date = advance_months(purchase_date, index);
            let amount = if index == count - 1 {
                per_installment + adjustment
            } else {
                per_installment
            };

            Installment {
                index,
                billing_date,
                period: BillingPeriod::from_date(billing_date),
                amount,
            }
        })
        .collect();

    InstallmentPlan {
        total,
        count,
        per_installment,
        adjustment,
        installments,
    }
}

/// Statement description for one installment entry.
///
/// Multi-installment purchases are numbered "(i/n)"; a single-installment
/// purchase gets no suffix.
#[must_use]
pub fn entry_description(item: &str, index: u32, count: u32) -> String {
    if count > 1 {
        format!("Compra {item} ({}/{count})", index + 1)
    } else {
        format!("Compra {item}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn total_of(plan: &InstallmentPlan) -> Decimal {
        plan.installments.iter().map(|i| i.amount).sum()
    }

    #[test]
    fn test_validate_rejects_zero_total() {
        assert_eq!(
            validate_purchase(Decimal::ZERO, dec!(1000)),
            Err(PurchaseError::InvalidAmount)
        );
    }

    #[test]
    fn test_validate_rejects_negative_total_before_limit() {
        // Rule order: InvalidAmount wins even when the limit is also zero.
        assert_eq!(
            validate_purchase(dec!(-10), Decimal::ZERO),
            Err(PurchaseError::InvalidAmount)
        );
    }

    #[test]
    fn test_validate_rejects_total_above_limit() {
        assert_eq!(
            validate_purchase(dec!(500.01), dec!(500.00)),
            Err(PurchaseError::InsufficientLimit {
                available: dec!(500.00),
                requested: dec!(500.01),
            })
        );
    }

    #[test]
    fn test_validate_allows_total_equal_to_limit() {
        assert!(validate_purchase(dec!(500.00), dec!(500.00)).is_ok());
    }

    #[test]
    fn test_hundred_over_three_installments() {
        let plan = plan_installments(dec!(100.00), 3, date(2026, 8, 7));

        let amounts: Vec<Decimal> = plan.installments.iter().map(|i| i.amount).collect();
        assert_eq!(amounts, vec![dec!(33.33), dec!(33.33), dec!(33.34)]);
        assert_eq!(total_of(&plan), dec!(100.00));
        assert_eq!(plan.per_installment, dec!(33.33));
        assert_eq!(plan.adjustment, dec!(0.01));
    }

    #[test]
    fn test_zero_count_coerced_to_single_installment() {
        let plan = plan_installments(dec!(100.00), 0, date(2026, 8, 7));

        assert_eq!(plan.count, 1);
        assert_eq!(plan.installments.len(), 1);
        assert_eq!(plan.installments[0].amount, dec!(100.00));
    }

    #[test]
    fn test_negative_count_coerced_to_single_installment() {
        let plan = plan_installments(dec!(50.00), -4, date(2026, 8, 7));
        assert_eq!(plan.count, 1);
        assert_eq!(total_of(&plan), dec!(50.00));
    }

    #[test]
    fn test_adjustment_can_be_negative() {
        // 100 / 6 = 16.666... -> 16.67 each, 6 * 16.67 = 100.02,
        // so the last installment gives two centavos back.
        let plan = plan_installments(dec!(100.00), 6, date(2026, 8, 7));

        assert_eq!(plan.per_installment, dec!(16.67));
        assert_eq!(plan.adjustment, dec!(-0.02));
        assert_eq!(plan.installments[5].amount, dec!(16.65));
        assert_eq!(total_of(&plan), dec!(100.00));
    }

    #[test]
    fn test_installments_advance_month_by_month() {
        let plan = plan_installments(dec!(300.00), 3, date(2026, 11, 15));

        let periods: Vec<(u32, i32)> = plan
            .installments
            .iter()
            .map(|i| (i.period.month, i.period.year))
            .collect();
        assert_eq!(periods, vec![(11, 2026), (12, 2026), (1, 2027)]);
    }

    #[test]
    fn test_end_of_month_purchase_clamps_each_billing_date() {
        let plan = plan_installments(dec!(90.00), 3, date(2026, 1, 31));

        let dates: Vec<NaiveDate> = plan.installments.iter().map(|i| i.billing_date).collect();
        assert_eq!(
            dates,
            vec![date(2026, 1, 31), date(2026, 2, 28), date(2026, 3, 31)]
        );
    }

    #[test]
    fn test_entry_description_numbering() {
        assert_eq!(entry_description("Notebook", 0, 3), "Compra Notebook (1/3)");
        assert_eq!(entry_description("Notebook", 2, 3), "Compra Notebook (3/3)");
        assert_eq!(entry_description("Notebook", 0, 1), "Compra Notebook");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// The posted amounts reconstruct the total exactly, to the
        /// centavo, for any total and installment count.
        #[test]
        fn prop_installments_sum_to_total(
            cents in 1i64..100_000_000,
            count in 1i32..=48,
        ) {
            let total = Decimal::new(cents, 2);
            let plan = plan_installments(total, count, date(2026, 8, 7));

            prop_assert_eq!(total_of(&plan), total);
        }

        /// Every installment except the last carries the plain
        /// per-installment amount.
        #[test]
        fn prop_adjustment_lands_on_last_installment_only(
            cents in 1i64..100_000_000,
            count in 2i32..=48,
        ) {
            let total = Decimal::new(cents, 2);
            let plan = plan_installments(total, count, date(2026, 8, 7));

            for installment in &plan.installments[..plan.installments.len() - 1] {
                prop_assert_eq!(installment.amount, plan.per_installment);
            }
            let last = plan.installments.last().unwrap();
            prop_assert_eq!(last.amount, plan.per_installment + plan.adjustment);
        }

        /// A non-positive requested count always degrades to one
        /// installment of the full total.
        #[test]
        fn prop_non_positive_count_means_single_entry(
            cents in 1i64..100_000_000,
            count in -48i32..=0,
        ) {
            let total = Decimal::new(cents, 2);
            let plan = plan_installments(total, count, date(2026, 8, 7));

            prop_assert_eq!(plan.installments.len(), 1);
            prop_assert_eq!(plan.installments[0].amount, total);
        }
    }
}
