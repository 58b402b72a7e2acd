//! Transfer repository: the Pix engine.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QuerySelect, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use atlasbank_core::ledger::{TransferError, validate_transfer};
use atlasbank_shared::types::AccountId;

use super::account::derive_balance;
use crate::entities::{accounts, transfers, users};

/// Error types for sending a transfer.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    /// No user owns the given Pix key.
    #[error("Pix key not found: {0}")]
    RecipientNotFound(String),

    /// The transfer violated a validation rule.
    #[error(transparent)]
    Rejected(#[from] TransferError),

    /// Source account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Error types for reading a transfer receipt.
#[derive(Debug, thiserror::Error)]
pub enum ReceiptError {
    /// Transfer not found, or the viewer is not a party of it.
    #[error("Transfer not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// A transfer joined with both parties, for receipt display.
#[derive(Debug, Clone)]
pub struct TransferReceipt {
    /// The transfer row.
    pub transfer: transfers::Model,
    /// Sender full name.
    pub source_name: String,
    /// Sender email.
    pub source_email: String,
    /// Recipient full name.
    pub destination_name: String,
    /// Recipient email.
    pub destination_email: String,
}

/// Transfer repository for the Pix send/receipt operations.
#[derive(Debug, Clone)]
pub struct TransferRepository {
    db: DatabaseConnection,
}

impl TransferRepository {
    /// Creates a new transfer repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Sends a Pix: resolves the destination key, validates, and appends
    /// exactly one transfer row.
    ///
    /// The whole operation runs in one database transaction with the
    /// source account row locked, so two concurrent sends from the same
    /// account serialize and each sees the balance left by the other.
    /// Validation failures roll back with zero mutation.
    ///
    /// # Errors
    ///
    /// Returns `RecipientNotFound` for an unknown key, `Rejected` for a
    /// validation failure, or a database error.
    pub async fn send(
        &self,
        source_account_id: Uuid,
        destination_key: &str,
        amount: Decimal,
    ) -> Result<transfers::Model, SendError> {
        let key = destination_key.trim().to_lowercase();

        let txn = self.db.begin().await?;

        let source = accounts::Entity::find_by_id(source_account_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(SendError::AccountNotFound(source_account_id))?;

        // resolve the Pix key to the recipient's account
        let recipient = users::Entity::find()
            .filter(users::Column::Email.eq(key.as_str()))
            .one(&txn)
            .await?
            .ok_or_else(|| SendError::RecipientNotFound(key.clone()))?;

        let destination = accounts::Entity::find()
            .filter(accounts::Column::UserId.eq(recipient.id))
            .one(&txn)
            .await?
            .ok_or(SendError::RecipientNotFound(key))?;

        // self-transfer, amount, and funds checks run against the balance
        // derived under the row lock
        let balance = derive_balance(&txn, &source).await?;
        validate_transfer(
            AccountId::from_uuid(source.id),
            AccountId::from_uuid(destination.id),
            amount,
            balance,
        )?;

        // the single mutation; balances update implicitly on next read
        let transfer = transfers::ActiveModel {
            id: Set(Uuid::new_v4()),
            source_account_id: Set(source.id),
            destination_account_id: Set(destination.id),
            amount: Set(amount),
            transferred_at: Set(Utc::now().into()),
        };
        let transfer = transfer.insert(&txn).await?;

        txn.commit().await?;

        debug!(
            transfer_id = %transfer.id,
            source = %source.id,
            destination = %destination.id,
            "Pix recorded"
        );

        Ok(transfer)
    }

    /// Loads a transfer receipt with both parties' names and emails.
    ///
    /// Only a party of the transfer may view it; anyone else gets
    /// `NotFound`, indistinguishable from a missing row.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub async fn receipt(
        &self,
        transfer_id: Uuid,
        viewer_account_id: Uuid,
    ) -> Result<TransferReceipt, ReceiptError> {
        let transfer = transfers::Entity::find_by_id(transfer_id)
            .one(&self.db)
            .await?
            .ok_or(ReceiptError::NotFound(transfer_id))?;

        if transfer.source_account_id != viewer_account_id
            && transfer.destination_account_id != viewer_account_id
        {
            return Err(ReceiptError::NotFound(transfer_id));
        }

        let (source_name, source_email) = self
            .party(transfer.source_account_id)
            .await?
            .ok_or(ReceiptError::NotFound(transfer_id))?;
        let (destination_name, destination_email) = self
            .party(transfer.destination_account_id)
            .await?
            .ok_or(ReceiptError::NotFound(transfer_id))?;

        Ok(TransferReceipt {
            transfer,
            source_name,
            source_email,
            destination_name,
            destination_email,
        })
    }

    /// Resolves an account to its owner's (name, email).
    async fn party(&self, account_id: Uuid) -> Result<Option<(String, String)>, DbErr> {
        let Some(account) = accounts::Entity::find_by_id(account_id).one(&self.db).await? else {
            return Ok(None);
        };

        let user = users::Entity::find_by_id(account.user_id).one(&self.db).await?;
        Ok(user.map(|u| (u.full_name, u.email)))
    }
}
