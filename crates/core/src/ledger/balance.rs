//! Balance calculator.

use rust_decimal::Decimal;

/// Derives an account's current balance from its transfer log.
///
/// `balance = initial_balance + Σ(incoming) − Σ(outgoing)`
///
/// The caller supplies the two aggregate sums over the full committed
/// transfer log; an account with no transfers passes zero for both. Unknown
/// accounts are a caller precondition, not an error of this function.
#[must_use]
pub fn account_balance(
    initial_balance: Decimal,
    total_received: Decimal,
    total_sent: Decimal,
) -> Decimal {
    initial_balance + total_received - total_sent
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_balance_with_no_transfers_is_initial() {
        assert_eq!(
            account_balance(dec!(250.00), Decimal::ZERO, Decimal::ZERO),
            dec!(250.00)
        );
    }

    #[test]
    fn test_balance_sums_credits_and_debits() {
        // 100.00 initial, 50.00 received, 30.00 sent -> 120.00
        assert_eq!(
            account_balance(dec!(100.00), dec!(50.00), dec!(30.00)),
            dec!(120.00)
        );
    }

    #[test]
    fn test_balance_can_go_negative_from_initial() {
        // The log itself never overdraws, but a negative initial balance
        // still derives correctly.
        assert_eq!(
            account_balance(dec!(-10.00), dec!(5.00), Decimal::ZERO),
            dec!(-5.00)
        );
    }

    #[test]
    fn test_balance_is_order_independent() {
        // Aggregates are sums, so any interleaving of the same transfers
        // derives the same balance.
        let a = account_balance(dec!(0), dec!(10) + dec!(20), dec!(5));
        let b = account_balance(dec!(0), dec!(20) + dec!(10), dec!(5));
        assert_eq!(a, b);
    }
}
