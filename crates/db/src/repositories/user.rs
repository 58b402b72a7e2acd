//! User repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set, TransactionTrait,
};
use uuid::Uuid;

use rust_decimal::Decimal;

use crate::entities::{accounts, sea_orm_active_enums::AccountKind, users};

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by email (the Pix key).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(&self.db).await
    }

    /// Checks if an email is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Registers a new user: inserts the user and their checking account
    /// (initial balance zero) in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if either insert fails; nothing is committed in
    /// that case.
    pub async fn register(
        &self,
        email: &str,
        password_hash: &str,
        full_name: &str,
    ) -> Result<(users::Model, accounts::Model), DbErr> {
        let txn = self.db.begin().await?;
        let now = chrono::Utc::now().into();

        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash.to_string()),
            full_name: Set(full_name.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let user = user.insert(&txn).await?;

        let account = accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user.id),
            kind: Set(AccountKind::Checking),
            initial_balance: Set(Decimal::ZERO),
            created_at: Set(now),
        };
        let account = account.insert(&txn).await?;

        txn.commit().await?;
        Ok((user, account))
    }
}
