//! Invoice repository: period resolution and listings.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use atlasbank_core::billing::BillingPeriod;

use crate::entities::{invoices, purchase_entries, sea_orm_active_enums::InvoiceStatus};

/// A purchase entry joined with its invoice's billing period.
#[derive(Debug, Clone)]
pub struct EntryWithPeriod {
    /// The purchase entry.
    pub entry: purchase_entries::Model,
    /// Reference month of the entry's invoice.
    pub reference_month: i32,
    /// Reference year of the entry's invoice.
    pub reference_year: i32,
}

/// Invoice repository for period resolution and card statements.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    db: DatabaseConnection,
}

impl InvoiceRepository {
    /// Creates a new invoice repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the invoice for (card, period), creating it if missing.
    /// Idempotent: repeated calls return the same row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn find_or_create(
        &self,
        card_id: Uuid,
        period: BillingPeriod,
    ) -> Result<invoices::Model, DbErr> {
        resolve_period(&self.db, card_id, period).await
    }

    /// Lists a card's invoices, newest period first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_card(&self, card_id: Uuid) -> Result<Vec<invoices::Model>, DbErr> {
        invoices::Entity::find()
            .filter(invoices::Column::CardId.eq(card_id))
            .order_by_desc(invoices::Column::ReferenceYear)
            .order_by_desc(invoices::Column::ReferenceMonth)
            .all(&self.db)
            .await
    }

    /// Lists a card's purchase entries joined with their billing period,
    /// newest period first, newest posting first within a period.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_entries_for_card(
        &self,
        card_id: Uuid,
    ) -> Result<Vec<EntryWithPeriod>, DbErr> {
        let rows = purchase_entries::Entity::find()
            .find_also_related(invoices::Entity)
            .filter(invoices::Column::CardId.eq(card_id))
            .order_by_desc(invoices::Column::ReferenceYear)
            .order_by_desc(invoices::Column::ReferenceMonth)
            .order_by_desc(purchase_entries::Column::PostedAt)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(entry, invoice)| {
                invoice.map(|i| EntryWithPeriod {
                    entry,
                    reference_month: i.reference_month,
                    reference_year: i.reference_year,
                })
            })
            .collect())
    }
}

/// Find-or-create for an invoice period, usable inside an open
/// transaction (the installment allocator resolves periods mid-purchase).
///
/// The UNIQUE (card, month, year) constraint is authoritative: the insert
/// is ON CONFLICT DO NOTHING, and a lost creation race resolves to the
/// winner's row on re-read instead of surfacing an error.
pub(crate) async fn resolve_period<C: ConnectionTrait>(
    conn: &C,
    card_id: Uuid,
    period: BillingPeriod,
) -> Result<invoices::Model, DbErr> {
    if let Some(existing) = find_period(conn, card_id, period).await? {
        return Ok(existing);
    }

    let now = Utc::now().into();
    #[allow(clippy::cast_possible_wrap)]
    let invoice = invoices::ActiveModel {
        id: Set(Uuid::new_v4()),
        card_id: Set(card_id),
        reference_month: Set(period.month as i32),
        reference_year: Set(period.year),
        closing_date: Set(period.closing_date()),
        due_date: Set(period.due_date()),
        total_amount: Set(Decimal::ZERO),
        status: Set(InvoiceStatus::Open),
        created_at: Set(now),
        updated_at: Set(now),
    };

    invoices::Entity::insert(invoice)
        .on_conflict(
            OnConflict::columns([
                invoices::Column::CardId,
                invoices::Column::ReferenceMonth,
                invoices::Column::ReferenceYear,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    find_period(conn, card_id, period)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("invoice {period} for card {card_id}")))
}

#[allow(clippy::cast_possible_wrap)]
async fn find_period<C: ConnectionTrait>(
    conn: &C,
    card_id: Uuid,
    period: BillingPeriod,
) -> Result<Option<invoices::Model>, DbErr> {
    invoices::Entity::find()
        .filter(invoices::Column::CardId.eq(card_id))
        .filter(invoices::Column::ReferenceMonth.eq(period.month as i32))
        .filter(invoices::Column::ReferenceYear.eq(period.year))
        .one(conn)
        .await
}
