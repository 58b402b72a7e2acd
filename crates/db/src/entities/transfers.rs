//! `SeaORM` Entity for the transfers table.
//!
//! Transfers are append-only: rows are never updated or deleted, and
//! account balances are always derived from them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "transfers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub source_account_id: Uuid,
    pub destination_account_id: Uuid,
    /// Always positive; enforced by a CHECK constraint as well.
    pub amount: Decimal,
    pub transferred_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::SourceAccountId",
        to = "super::accounts::Column::Id"
    )]
    SourceAccount,
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::DestinationAccountId",
        to = "super::accounts::Column::Id"
    )]
    DestinationAccount,
}

impl ActiveModelBehavior for ActiveModel {}
