//! Pix transfer validation.

use rust_decimal::Decimal;

use atlasbank_shared::types::AccountId;

use super::error::TransferError;

/// Validates a Pix transfer after the destination key has been resolved.
///
/// Checks run in a fixed order, each producing a distinct error:
/// 1. destination must differ from the source account
/// 2. amount must be positive
/// 3. amount must not exceed the sender's current balance
///
/// `balance` is the sender's balance derived from the committed transfer
/// log at validation time (inside the same store transaction that will
/// append the transfer, so no newer transfer can slip in between).
///
/// # Errors
///
/// Returns the first violated rule as a [`TransferError`].
pub fn validate_transfer(
    source_account: AccountId,
    destination_account: AccountId,
    amount: Decimal,
    balance: Decimal,
) -> Result<(), TransferError> {
    if destination_account == source_account {
        return Err(TransferError::SelfTransferNotAllowed);
    }

    if amount <= Decimal::ZERO {
        return Err(TransferError::InvalidAmount);
    }

    if amount > balance {
        return Err(TransferError::InsufficientFunds {
            balance,
            requested: amount,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ids() -> (AccountId, AccountId) {
        (AccountId::new(), AccountId::new())
    }

    #[test]
    fn test_valid_transfer_passes() {
        let (src, dst) = ids();
        assert!(validate_transfer(src, dst, dec!(30.00), dec!(100.00)).is_ok());
    }

    #[test]
    fn test_exact_balance_is_spendable() {
        let (src, dst) = ids();
        assert!(validate_transfer(src, dst, dec!(100.00), dec!(100.00)).is_ok());
    }

    #[test]
    fn test_self_transfer_rejected() {
        let (src, _) = ids();
        assert_eq!(
            validate_transfer(src, src, dec!(10.00), dec!(100.00)),
            Err(TransferError::SelfTransferNotAllowed)
        );
    }

    #[test]
    fn test_self_transfer_reported_before_bad_amount() {
        // Rule order: self-transfer wins even when the amount is also bad.
        let (src, _) = ids();
        assert_eq!(
            validate_transfer(src, src, dec!(-1), dec!(100.00)),
            Err(TransferError::SelfTransferNotAllowed)
        );
    }

    #[test]
    fn test_zero_amount_rejected() {
        let (src, dst) = ids();
        assert_eq!(
            validate_transfer(src, dst, Decimal::ZERO, dec!(100.00)),
            Err(TransferError::InvalidAmount)
        );
    }

    #[test]
    fn test_negative_amount_rejected() {
        let (src, dst) = ids();
        assert_eq!(
            validate_transfer(src, dst, dec!(-5.00), dec!(100.00)),
            Err(TransferError::InvalidAmount)
        );
    }

    #[test]
    fn test_overdraw_rejected_with_context() {
        let (src, dst) = ids();
        assert_eq!(
            validate_transfer(src, dst, dec!(150.00), dec!(100.00)),
            Err(TransferError::InsufficientFunds {
                balance: dec!(100.00),
                requested: dec!(150.00),
            })
        );
    }
}
