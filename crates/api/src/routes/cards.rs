//! Card routes: issuance, listings, invoices, and entries.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use atlasbank_core::cards::{CardError, generate_card};
use atlasbank_db::entities::{cards, sea_orm_active_enums::CardBrand};
use atlasbank_db::repositories::card::IssueError;
use atlasbank_db::{CardRepository, InvoiceRepository};
use atlasbank_shared::types::money::format_brl;

/// Creates the card routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cards", get(list_cards))
        .route("/cards", post(issue_card))
        .route("/cards/{card_id}/invoices", get(list_invoices))
        .route("/cards/{card_id}/entries", get(list_entries))
}

/// Full card detail, as shown on the cards screen.
#[derive(Debug, Serialize)]
pub struct CardResponse {
    /// Card ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Remaining spendable capacity.
    pub available_limit: String,
    /// Limit formatted for display.
    pub available_limit_brl: String,
    /// Network brand.
    pub brand: String,
    /// 16-digit card number.
    pub card_number: String,
    /// 3-digit security code.
    pub security_code: String,
    /// Expiry month (1-12).
    pub expiry_month: i32,
    /// Expiry year.
    pub expiry_year: i32,
}

impl From<cards::Model> for CardResponse {
    fn from(card: cards::Model) -> Self {
        Self {
            id: card.id,
            name: card.name,
            available_limit: card.available_limit.to_string(),
            available_limit_brl: format_brl(card.available_limit),
            brand: brand_label(&card.brand),
            card_number: card.card_number,
            security_code: card.security_code,
            expiry_month: card.expiry_month,
            expiry_year: card.expiry_year,
        }
    }
}

pub(crate) fn brand_label(brand: &CardBrand) -> String {
    match brand {
        CardBrand::Visa => "VISA".to_string(),
        CardBrand::Mastercard => "MASTERCARD".to_string(),
    }
}

/// GET /cards - List the user's cards, newest first.
async fn list_cards(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = CardRepository::new((*state.db).clone());

    match repo.list(auth.user_id()).await {
        Ok(cards) => {
            let cards: Vec<CardResponse> = cards.into_iter().map(CardResponse::from).collect();
            (StatusCode::OK, Json(json!({ "cards": cards }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list cards");
            internal_error()
        }
    }
}

/// POST /cards - Request a new card. Attributes are generated at approval
/// time; at most 3 cards per user.
async fn issue_card(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let spec = generate_card(&mut rand::rng(), Utc::now().date_naive());
    let repo = CardRepository::new((*state.db).clone());

    match repo.issue(auth.user_id(), spec).await {
        Ok(card) => {
            info!(user_id = %auth.user_id(), card_id = %card.id, "Card issued");
            (StatusCode::CREATED, Json(CardResponse::from(card))).into_response()
        }
        Err(IssueError::Rejected(CardError::CardLimitReached)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": "card_limit_reached",
                "message": "Maximum number of cards reached"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to issue card");
            internal_error()
        }
    }
}

/// GET /cards/{card_id}/invoices - A card's invoices, newest period first.
async fn list_invoices(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(card_id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = require_card(&state, card_id, auth.user_id()).await {
        return response;
    }

    let repo = InvoiceRepository::new((*state.db).clone());

    match repo.list_for_card(card_id).await {
        Ok(invoices) => {
            let invoices: Vec<serde_json::Value> = invoices
                .into_iter()
                .map(|i| {
                    json!({
                        "id": i.id,
                        "reference_month": i.reference_month,
                        "reference_year": i.reference_year,
                        "closing_date": i.closing_date.to_string(),
                        "due_date": i.due_date.to_string(),
                        "total_amount": i.total_amount.to_string(),
                        "total_amount_brl": format_brl(i.total_amount),
                        "status": i.status
                    })
                })
                .collect();

            (StatusCode::OK, Json(json!({ "invoices": invoices }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list invoices");
            internal_error()
        }
    }
}

/// GET /cards/{card_id}/entries - A card's purchase entries joined with
/// their billing period, newest first.
async fn list_entries(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(card_id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = require_card(&state, card_id, auth.user_id()).await {
        return response;
    }

    let repo = InvoiceRepository::new((*state.db).clone());

    match repo.list_entries_for_card(card_id).await {
        Ok(entries) => {
            let entries: Vec<serde_json::Value> = entries
                .into_iter()
                .map(|e| {
                    json!({
                        "description": e.entry.description,
                        "amount": e.entry.amount.to_string(),
                        "amount_brl": format_brl(e.entry.amount),
                        "posted_at": e.entry.posted_at.to_rfc3339(),
                        "reference_month": e.reference_month,
                        "reference_year": e.reference_year
                    })
                })
                .collect();

            (StatusCode::OK, Json(json!({ "entries": entries }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list entries");
            internal_error()
        }
    }
}

/// Confirms the card exists and belongs to the caller. A missing or
/// foreign card is indistinguishable: both are `invalid_card`.
async fn require_card(
    state: &AppState,
    card_id: Uuid,
    user_id: Uuid,
) -> Result<(), axum::response::Response> {
    let repo = CardRepository::new((*state.db).clone());

    match repo.find_for_user(card_id, user_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "invalid_card",
                "message": "Invalid card"
            })),
        )
            .into_response()),
        Err(e) => {
            error!(error = %e, "Failed to look up card");
            Err(internal_error())
        }
    }
}

fn internal_error() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": "An error occurred"
        })),
    )
        .into_response()
}
