//! Pix transfer routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use std::str::FromStr;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use atlasbank_core::ledger::TransferError;
use atlasbank_db::TransferRepository;
use atlasbank_db::repositories::transfer::{ReceiptError, SendError};
use atlasbank_shared::types::money::format_brl;

/// Creates the transfer routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transfers", post(send_transfer))
        .route("/transfers/{transfer_id}", get(get_receipt))
}

/// Request body for sending a Pix.
#[derive(Debug, Deserialize)]
pub struct SendTransferRequest {
    /// Recipient's Pix key (their email).
    pub destination_key: String,
    /// Amount to send, as a decimal string.
    pub amount: String,
}

/// POST /transfers - Send a Pix to another account.
async fn send_transfer(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<SendTransferRequest>,
) -> impl IntoResponse {
    let Ok(amount) = Decimal::from_str(&payload.amount) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_amount",
                "message": "Invalid amount format"
            })),
        )
            .into_response();
    };

    let repo = TransferRepository::new((*state.db).clone());

    match repo
        .send(auth.account_id(), &payload.destination_key, amount)
        .await
    {
        Ok(transfer) => {
            info!(
                transfer_id = %transfer.id,
                account_id = %auth.account_id(),
                "Pix sent"
            );

            (
                StatusCode::CREATED,
                Json(json!({
                    "id": transfer.id,
                    "amount": transfer.amount.to_string(),
                    "amount_brl": format_brl(transfer.amount),
                    "transferred_at": transfer.transferred_at.to_rfc3339()
                })),
            )
                .into_response()
        }
        Err(e) => match e {
            SendError::RecipientNotFound(key) => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "recipient_not_found",
                    "message": format!("Pix key not found: {key}")
                })),
            )
                .into_response(),
            SendError::Rejected(TransferError::SelfTransferNotAllowed) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "error": "self_transfer_not_allowed",
                    "message": "Cannot send a Pix to your own account"
                })),
            )
                .into_response(),
            SendError::Rejected(TransferError::InvalidAmount) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_amount",
                    "message": "Transfer amount must be positive"
                })),
            )
                .into_response(),
            SendError::Rejected(TransferError::InsufficientFunds { balance, .. }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "error": "insufficient_funds",
                    "message": format!("Insufficient funds: balance is {}", format_brl(balance))
                })),
            )
                .into_response(),
            SendError::AccountNotFound(_) | SendError::Database(_) => {
                error!(error = %e, "Failed to send transfer");
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

/// GET /transfers/{transfer_id} - Transfer receipt with both parties.
/// Only visible to a party of the transfer.
async fn get_receipt(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(transfer_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TransferRepository::new((*state.db).clone());

    match repo.receipt(transfer_id, auth.account_id()).await {
        Ok(receipt) => (
            StatusCode::OK,
            Json(json!({
                "id": receipt.transfer.id,
                "method": "Pix",
                "amount": receipt.transfer.amount.to_string(),
                "amount_brl": format_brl(receipt.transfer.amount),
                "transferred_at": receipt.transfer.transferred_at.to_rfc3339(),
                "source": {
                    "name": receipt.source_name,
                    "email": receipt.source_email
                },
                "destination": {
                    "name": receipt.destination_name,
                    "email": receipt.destination_email
                }
            })),
        )
            .into_response(),
        Err(ReceiptError::NotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Transfer not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to load receipt");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred"
                })),
            )
                .into_response()
        }
    }
}
