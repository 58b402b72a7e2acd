//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Each user-facing operation (transfer, purchase, issuance)
//! runs inside one database transaction: either all of its rows commit,
//! or none do.

pub mod account;
pub mod card;
pub mod invoice;
pub mod purchase;
pub mod transfer;
pub mod user;

pub use account::{AccountError, AccountRepository};
pub use card::{CardRepository, IssueError};
pub use invoice::{EntryWithPeriod, InvoiceRepository};
pub use purchase::{ChargeError, ChargeInput, ChargeOutcome, PurchaseRepository};
pub use transfer::{ReceiptError, SendError, TransferReceipt, TransferRepository};
pub use user::UserRepository;
