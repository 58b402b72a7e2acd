//! Card repository: issuance and listings.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use atlasbank_core::cards::{CardError, CardSpec, check_issuance_cap};

use crate::entities::cards;

/// Error types for card issuance.
#[derive(Debug, thiserror::Error)]
pub enum IssueError {
    /// Issuance violated the card cap.
    #[error(transparent)]
    Rejected(#[from] CardError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Card repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct CardRepository {
    db: DatabaseConnection,
}

impl CardRepository {
    /// Creates a new card repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Issues a new card with the given generated attributes.
    ///
    /// The 3-card cap is checked and the row inserted in one transaction;
    /// a capped user gets `CardLimitReached` and no row.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` when the cap is reached, or a database error.
    pub async fn issue(&self, user_id: Uuid, spec: CardSpec) -> Result<cards::Model, IssueError> {
        let txn = self.db.begin().await?;

        let existing = cards::Entity::find()
            .filter(cards::Column::UserId.eq(user_id))
            .count(&txn)
            .await?;
        check_issuance_cap(existing)?;

        let now = Utc::now().into();
        #[allow(clippy::cast_possible_wrap)]
        let card = cards::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            name: Set(spec.name),
            available_limit: Set(spec.limit),
            brand: Set(spec.brand.into()),
            card_number: Set(spec.number),
            security_code: Set(spec.security_code),
            expiry_month: Set(spec.expiry_month as i32),
            expiry_year: Set(spec.expiry_year),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let card = card.insert(&txn).await?;

        txn.commit().await?;
        Ok(card)
    }

    /// Lists a user's cards, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<cards::Model>, DbErr> {
        cards::Entity::find()
            .filter(cards::Column::UserId.eq(user_id))
            .order_by_desc(cards::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Finds a card only if it belongs to the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_for_user(
        &self,
        card_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<cards::Model>, DbErr> {
        cards::Entity::find_by_id(card_id)
            .filter(cards::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }
}
