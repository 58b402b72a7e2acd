//! Installment purchase routes.

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use std::str::FromStr;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use atlasbank_core::billing::PurchaseError;
use atlasbank_db::PurchaseRepository;
use atlasbank_db::repositories::purchase::{ChargeError, ChargeInput};
use atlasbank_shared::types::money::format_brl;

/// Creates the purchase routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/purchases", post(create_purchase))
}

/// Request body for an installment purchase.
#[derive(Debug, Deserialize)]
pub struct CreatePurchaseRequest {
    /// Card to charge.
    pub card_id: Uuid,
    /// Purchase total, as a decimal string.
    pub total: String,
    /// Requested installment count; zero or less falls back to 1.
    #[serde(default)]
    pub installments: i32,
    /// Item description.
    pub description: Option<String>,
}

/// POST /purchases - Charge an installment purchase to a card.
async fn create_purchase(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreatePurchaseRequest>,
) -> impl IntoResponse {
    let Ok(total) = Decimal::from_str(&payload.total) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_amount",
                "message": "Invalid amount format"
            })),
        )
            .into_response();
    };

    let repo = PurchaseRepository::new((*state.db).clone());

    let input = ChargeInput {
        user_id: auth.user_id(),
        account_id: auth.account_id(),
        card_id: payload.card_id,
        total,
        installments: payload.installments,
        description: payload.description.unwrap_or_else(|| "Item".to_string()),
        purchase_date: Utc::now().date_naive(),
    };

    match repo.charge(input).await {
        Ok(outcome) => {
            info!(
                user_id = %auth.user_id(),
                card_id = %outcome.card.id,
                total = %outcome.plan.total,
                installments = outcome.plan.count,
                "Purchase approved"
            );

            let entries: Vec<serde_json::Value> = outcome
                .entries
                .iter()
                .zip(&outcome.plan.installments)
                .map(|(entry, installment)| {
                    json!({
                        "id": entry.id,
                        "description": entry.description,
                        "amount": entry.amount.to_string(),
                        "amount_brl": format_brl(entry.amount),
                        "reference_month": installment.period.month,
                        "reference_year": installment.period.year
                    })
                })
                .collect();

            (
                StatusCode::CREATED,
                Json(json!({
                    "total": outcome.plan.total.to_string(),
                    "total_brl": format_brl(outcome.plan.total),
                    "installments": outcome.plan.count,
                    "per_installment": outcome.plan.per_installment.to_string(),
                    "adjustment": outcome.plan.adjustment.to_string(),
                    "entries": entries,
                    "card": {
                        "id": outcome.card.id,
                        "available_limit": outcome.card.available_limit.to_string(),
                        "available_limit_brl": format_brl(outcome.card.available_limit)
                    }
                })),
            )
                .into_response()
        }
        Err(e) => match e {
            ChargeError::InvalidCard(_) => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "invalid_card",
                    "message": "Invalid card"
                })),
            )
                .into_response(),
            ChargeError::Rejected(PurchaseError::InvalidAmount) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_amount",
                    "message": "Purchase total must be positive"
                })),
            )
                .into_response(),
            ChargeError::Rejected(PurchaseError::InsufficientLimit { available, .. }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "error": "insufficient_limit",
                    "message": format!(
                        "Insufficient limit: available limit is {}",
                        format_brl(available)
                    )
                })),
            )
                .into_response(),
            ChargeError::Database(_) => {
                error!(error = %e, "Failed to charge purchase");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "internal_error",
                        "message": "An error occurred"
                    })),
                )
                    .into_response()
            }
        },
    }
}
