//! `SeaORM` Entity for the invoices table.
//!
//! One invoice per (card, month, year), created lazily the first time a
//! purchase installment lands in that period. Uniqueness is enforced by
//! the storage layer.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::InvoiceStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub card_id: Uuid,
    /// Reference month (1-12).
    pub reference_month: i32,
    pub reference_year: i32,
    /// Day 25 of the reference month.
    pub closing_date: Date,
    /// Day 10 of the following month.
    pub due_date: Date,
    /// Running total, incremented as entries post.
    pub total_amount: Decimal,
    pub status: InvoiceStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cards::Entity",
        from = "Column::CardId",
        to = "super::cards::Column::Id"
    )]
    Cards,
    #[sea_orm(has_many = "super::purchase_entries::Entity")]
    PurchaseEntries,
}

impl Related<super::cards::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cards.def()
    }
}

impl Related<super::purchase_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
