//! Money rounding and display helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal`, rounded to centavos with
//! midpoint-to-even (the rounding the billing engine's numeric contract
//! is specified against).

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places for monetary amounts (centavos).
pub const MONEY_DP: u32 = 2;

/// Rounds a monetary amount to 2 decimal places.
///
/// Uses `RoundingStrategy::MidpointNearestEven`, so a half-centavo midpoint
/// rounds to the nearest even centavo:
/// - 0.125 → 0.12
/// - 0.135 → 0.14
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointNearestEven)
}

/// Formats an amount in Brazilian convention: thousands separated by `.`,
/// centavos separated by `,` (e.g. `7.998,00`).
///
/// Display-only; callers keep computing on the `Decimal` value.
#[must_use]
pub fn format_brl(amount: Decimal) -> String {
    let rounded = round_money(amount);
    let plain = format!("{rounded:.2}");

    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (integer, centavos) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    format!("{sign}{grouped},{centavos}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_money_to_centavos() {
        assert_eq!(round_money(dec!(33.333333)), dec!(33.33));
        assert_eq!(round_money(dec!(33.335)), dec!(33.34));
        assert_eq!(round_money(dec!(100)), dec!(100.00));
    }

    #[test]
    fn test_round_money_midpoint_to_even() {
        // Half a centavo rounds to the nearest even centavo.
        assert_eq!(round_money(dec!(0.125)), dec!(0.12));
        assert_eq!(round_money(dec!(0.135)), dec!(0.14));
        assert_eq!(round_money(dec!(-0.125)), dec!(-0.12));
    }

    #[rstest]
    #[case(dec!(0), "0,00")]
    #[case(dec!(120), "120,00")]
    #[case(dec!(649.99), "649,99")]
    #[case(dec!(7998), "7.998,00")]
    #[case(dec!(1234567.89), "1.234.567,89")]
    #[case(dec!(-30.5), "-30,50")]
    fn test_format_brl(#[case] amount: Decimal, #[case] expected: &str) {
        assert_eq!(format_brl(amount), expected);
    }
}
