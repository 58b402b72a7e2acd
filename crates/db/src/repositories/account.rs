//! Account repository: derived balances and the transfer log.
//!
//! The current balance is never stored. Every read recomputes
//! `initial_balance + Σ(incoming) − Σ(outgoing)` against the committed
//! transfer log, so it is always consistent with the latest transfer.

use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use uuid::Uuid;

use atlasbank_core::ledger::account_balance;

use crate::entities::{accounts, transfers};

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account not found.
    #[error("Account not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Account repository for balance and statement reads.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds an account by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<accounts::Model>, DbErr> {
        accounts::Entity::find_by_id(id).one(&self.db).await
    }

    /// Finds a user's account.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Option<accounts::Model>, DbErr> {
        accounts::Entity::find()
            .filter(accounts::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    /// Derives the account's current balance from the transfer log.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::NotFound` for an unknown account, or a
    /// database error.
    pub async fn balance(&self, account_id: Uuid) -> Result<Decimal, AccountError> {
        let account = self
            .find_by_id(account_id)
            .await?
            .ok_or(AccountError::NotFound(account_id))?;

        Ok(derive_balance(&self.db, &account).await?)
    }

    /// Lists the account's most recent transfers (sent or received),
    /// newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_transfers(
        &self,
        account_id: Uuid,
        limit: u64,
    ) -> Result<Vec<transfers::Model>, DbErr> {
        transfers::Entity::find()
            .filter(
                Condition::any()
                    .add(transfers::Column::SourceAccountId.eq(account_id))
                    .add(transfers::Column::DestinationAccountId.eq(account_id)),
            )
            .order_by_desc(transfers::Column::TransferredAt)
            .limit(limit)
            .all(&self.db)
            .await
    }
}

/// Derives an account's balance on any connection, including inside an
/// open transaction (the transfer engine re-derives under its row lock).
pub(crate) async fn derive_balance<C: ConnectionTrait>(
    conn: &C,
    account: &accounts::Model,
) -> Result<Decimal, DbErr> {
    let received =
        sum_transfers(conn, transfers::Column::DestinationAccountId, account.id).await?;
    let sent = sum_transfers(conn, transfers::Column::SourceAccountId, account.id).await?;

    Ok(account_balance(account.initial_balance, received, sent))
}

/// Sums one side of the transfer log for an account. No rows sums to zero.
async fn sum_transfers<C: ConnectionTrait>(
    conn: &C,
    side: transfers::Column,
    account_id: Uuid,
) -> Result<Decimal, DbErr> {
    let total = transfers::Entity::find()
        .select_only()
        .column_as(transfers::Column::Amount.sum(), "total")
        .filter(side.eq(account_id))
        .into_tuple::<Option<Decimal>>()
        .one(conn)
        .await?;

    Ok(total.flatten().unwrap_or(Decimal::ZERO))
}
