//! Account routes: dashboard balance and statement.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use atlasbank_core::ledger::{MovementKind, TransferDirection};
use atlasbank_db::AccountRepository;
use atlasbank_db::entities::transfers;
use atlasbank_shared::types::AccountId;
use atlasbank_shared::types::money::format_brl;

/// Transfers shown on the dashboard.
const DASHBOARD_STATEMENT_LIMIT: u64 = 5;

/// Default and maximum rows for the full statement.
const STATEMENT_DEFAULT_LIMIT: u64 = 20;
const STATEMENT_MAX_LIMIT: u64 = 100;

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts/me", get(dashboard))
        .route("/accounts/me/statement", get(statement))
}

/// Query parameters for the statement listing.
#[derive(Debug, Deserialize)]
pub struct StatementQuery {
    /// Maximum rows to return (default 20, max 100).
    pub limit: Option<u64>,
}

/// One transfer as seen from the authenticated account.
#[derive(Debug, Serialize)]
pub struct StatementLine {
    /// Transfer ID.
    pub id: Uuid,
    /// "Pix enviado" or "Pix recebido".
    pub description: &'static str,
    /// DEBIT or CREDIT relative to the viewer.
    pub kind: MovementKind,
    /// Transfer amount.
    pub amount: String,
    /// Amount formatted for display.
    pub amount_brl: String,
    /// When the transfer happened.
    pub transferred_at: String,
}

fn statement_lines(viewer_account: Uuid, rows: Vec<transfers::Model>) -> Vec<StatementLine> {
    let viewer = AccountId::from_uuid(viewer_account);
    rows.into_iter()
        .map(|t| {
            let direction =
                TransferDirection::relative_to(viewer, AccountId::from_uuid(t.source_account_id));
            StatementLine {
                id: t.id,
                description: direction.description(),
                kind: direction.kind(),
                amount: t.amount.to_string(),
                amount_brl: format_brl(t.amount),
                transferred_at: t.transferred_at.to_rfc3339(),
            }
        })
        .collect()
}

/// GET /accounts/me - Account overview: derived balance plus the most
/// recent transfers.
async fn dashboard(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());
    let account_id = auth.account_id();

    let account = match repo.find_by_id(account_id).await {
        Ok(Some(a)) => a,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "account_not_found",
                    "message": "Account not found"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Failed to load account");
            return internal_error();
        }
    };

    let balance = match repo.balance(account_id).await {
        Ok(b) => b,
        Err(e) => {
            error!(error = %e, "Failed to derive balance");
            return internal_error();
        }
    };

    let recent = match repo.list_transfers(account_id, DASHBOARD_STATEMENT_LIMIT).await {
        Ok(rows) => statement_lines(account_id, rows),
        Err(e) => {
            error!(error = %e, "Failed to list recent transfers");
            return internal_error();
        }
    };

    (
        StatusCode::OK,
        Json(json!({
            "account": {
                "id": account.id,
                "kind": account.kind,
                "initial_balance": account.initial_balance.to_string(),
                "created_at": account.created_at.to_rfc3339(),
            },
            "balance": balance.to_string(),
            "balance_brl": format_brl(balance),
            "statement": recent
        })),
    )
        .into_response()
}

/// GET /accounts/me/statement - Full transfer statement, newest first.
async fn statement(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<StatementQuery>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());
    let account_id = auth.account_id();

    let limit = query
        .limit
        .unwrap_or(STATEMENT_DEFAULT_LIMIT)
        .min(STATEMENT_MAX_LIMIT);

    match repo.list_transfers(account_id, limit).await {
        Ok(rows) => {
            let lines = statement_lines(account_id, rows);
            (StatusCode::OK, Json(json!({ "statement": lines }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list transfers");
            internal_error()
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
