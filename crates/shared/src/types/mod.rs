//! Shared type definitions.

pub mod id;
pub mod money;

pub use id::{AccountId, CardId, InvoiceId, PurchaseEntryId, TransferId, UserId};
pub use money::{format_brl, round_money, MONEY_DP};
