//! Purchase repository: the installment allocator's storage side.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QuerySelect, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use atlasbank_core::billing::{
    InstallmentPlan, PurchaseError, entry_description, plan_installments, validate_purchase,
};

use super::invoice::resolve_period;
use crate::entities::{cards, invoices, purchase_entries, sea_orm_active_enums::EntryKind};

/// Error types for charging a purchase.
#[derive(Debug, thiserror::Error)]
pub enum ChargeError {
    /// The card does not exist or belongs to another user.
    #[error("Invalid card: {0}")]
    InvalidCard(Uuid),

    /// The purchase violated a validation rule.
    #[error(transparent)]
    Rejected(#[from] PurchaseError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for charging an installment purchase.
#[derive(Debug, Clone)]
pub struct ChargeInput {
    /// Buying user.
    pub user_id: Uuid,
    /// The user's account (recorded on each entry).
    pub account_id: Uuid,
    /// Card to charge.
    pub card_id: Uuid,
    /// Purchase total.
    pub total: Decimal,
    /// Requested installment count; zero or less falls back to 1.
    pub installments: i32,
    /// Item description, e.g. "Notebook".
    pub description: String,
    /// Purchase date; installment i bills i months later.
    pub purchase_date: NaiveDate,
}

/// A committed purchase: the plan, the posted entries, and the card with
/// its decremented limit.
#[derive(Debug, Clone)]
pub struct ChargeOutcome {
    /// The allocation that was posted.
    pub plan: InstallmentPlan,
    /// The posted entries, in billing order.
    pub entries: Vec<purchase_entries::Model>,
    /// The card after the limit decrement.
    pub card: cards::Model,
}

/// Purchase repository for installment charges.
#[derive(Debug, Clone)]
pub struct PurchaseRepository {
    db: DatabaseConnection,
}

impl PurchaseRepository {
    /// Creates a new purchase repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Charges a purchase to a card in installments.
    ///
    /// One database transaction covers the whole purchase, with the card
    /// row locked so concurrent purchases on the same card serialize
    /// against the limit. Per installment: resolve the billing period's
    /// invoice (find-or-create), post one debit entry, and bump the
    /// invoice total. The card limit is decremented once, by the purchase
    /// total. Any failure rolls back every row.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCard` for an unknown or foreign card, `Rejected`
    /// for a validation failure, or a database error.
    pub async fn charge(&self, input: ChargeInput) -> Result<ChargeOutcome, ChargeError> {
        let txn = self.db.begin().await?;

        let card = cards::Entity::find_by_id(input.card_id)
            .filter(cards::Column::UserId.eq(input.user_id))
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(ChargeError::InvalidCard(input.card_id))?;

        validate_purchase(input.total, card.available_limit)?;
        let plan = plan_installments(input.total, input.installments, input.purchase_date);

        let posted_at = Utc::now().into();
        let mut entries = Vec::with_capacity(plan.installments.len());

        for installment in &plan.installments {
            let invoice = resolve_period(&txn, card.id, installment.period).await?;

            let entry = purchase_entries::ActiveModel {
                id: Set(Uuid::new_v4()),
                account_id: Set(input.account_id),
                user_id: Set(input.user_id),
                invoice_id: Set(invoice.id),
                amount: Set(installment.amount),
                kind: Set(EntryKind::Debit),
                description: Set(entry_description(
                    &input.description,
                    installment.index,
                    plan.count,
                )),
                posted_at: Set(posted_at),
            };
            entries.push(entry.insert(&txn).await?);

            invoices::Entity::update_many()
                .col_expr(
                    invoices::Column::TotalAmount,
                    Expr::col(invoices::Column::TotalAmount).add(installment.amount),
                )
                .filter(invoices::Column::Id.eq(invoice.id))
                .exec(&txn)
                .await?;
        }

        // one decrement for the whole purchase, not per installment
        cards::Entity::update_many()
            .col_expr(
                cards::Column::AvailableLimit,
                Expr::col(cards::Column::AvailableLimit).sub(plan.total),
            )
            .filter(cards::Column::Id.eq(card.id))
            .exec(&txn)
            .await?;

        let card = cards::Entity::find_by_id(card.id)
            .one(&txn)
            .await?
            .ok_or(ChargeError::InvalidCard(input.card_id))?;

        txn.commit().await?;

        debug!(
            card_id = %card.id,
            total = %plan.total,
            installments = plan.count,
            "purchase charged"
        );

        Ok(ChargeOutcome {
            plan,
            entries,
            card,
        })
    }
}
