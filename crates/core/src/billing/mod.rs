//! Invoice periods and installment allocation.
//!
//! A purchase is split into N monthly entries, each posted to the invoice
//! of its billing period. The allocation contract: entry amounts are
//! rounded to centavos and the rounding remainder lands on the last
//! installment, so the entries always sum to the purchase total exactly.

pub mod error;
pub mod installment;
pub mod period;

pub use error::PurchaseError;
pub use installment::{
    Installment, InstallmentPlan, entry_description, plan_installments, validate_purchase,
};
pub use period::{BillingPeriod, advance_months};
