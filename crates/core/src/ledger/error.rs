//! Error types for transfer validation.

use rust_decimal::Decimal;
use thiserror::Error;

/// Validation outcomes for a Pix transfer.
///
/// All variants are recoverable, user-facing rejections: the transfer is
/// simply not recorded and the caller gets a specific reason to redisplay.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// Destination resolves to the sender's own account.
    #[error("cannot send a Pix to your own account")]
    SelfTransferNotAllowed,

    /// Amount is zero or negative.
    #[error("transfer amount must be positive")]
    InvalidAmount,

    /// Amount exceeds the sender's current balance.
    #[error("insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// The sender's derived balance at validation time.
        balance: Decimal,
        /// The requested transfer amount.
        requested: Decimal,
    },
}
