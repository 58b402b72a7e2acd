//! Ledger logic: derived balances and Pix transfer validation.
//!
//! The account balance is never stored. It is always recomputed from the
//! immutable transfer log, so a committed transfer is visible on the very
//! next balance read with no cache to invalidate.

pub mod balance;
pub mod error;
pub mod statement;
pub mod transfer;

pub use balance::account_balance;
pub use error::TransferError;
pub use statement::{MovementKind, TransferDirection};
pub use transfer::validate_transfer;
