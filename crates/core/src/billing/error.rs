//! Error types for purchase validation.

use rust_decimal::Decimal;
use thiserror::Error;

/// Validation outcomes for an installment purchase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    /// Purchase total is zero or negative.
    #[error("purchase total must be positive")]
    InvalidAmount,

    /// Purchase total exceeds the card's available limit.
    #[error("insufficient limit: available {available}, requested {requested}")]
    InsufficientLimit {
        /// The card's available limit at validation time.
        available: Decimal,
        /// The requested purchase total.
        requested: Decimal,
    },
}
