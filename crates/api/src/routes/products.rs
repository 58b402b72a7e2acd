//! Demo shopping catalog.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::{AppState, middleware::AuthUser};
use crate::routes::cards::brand_label;
use atlasbank_core::cards::last_four;
use atlasbank_db::CardRepository;
use atlasbank_shared::types::money::format_brl;

/// Creates the product catalog routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/products", get(list_products))
}

/// A demo catalog item.
#[derive(Debug, Serialize)]
pub struct Product {
    /// Catalog ID.
    pub id: u32,
    /// Product name.
    pub name: String,
    /// Price.
    pub price: String,
    /// Price formatted for display.
    pub price_brl: String,
    /// Image path.
    pub image: &'static str,
}

fn catalog() -> Vec<Product> {
    let items: [(u32, &str, Decimal, &str); 3] = [
        (1, "Fone Bluetooth", Decimal::new(29900, 2), "/static/img/fone.png"),
        (2, "Smartwatch", Decimal::new(64999, 2), "/static/img/smartwatch.png"),
        (3, "Notebook", Decimal::new(799_800, 2), "/static/img/notebook.png"),
    ];

    items
        .into_iter()
        .map(|(id, name, price, image)| Product {
            id,
            name: name.to_string(),
            price: price.to_string(),
            price_brl: format_brl(price),
            image,
        })
        .collect()
}

/// GET /products - The static demo catalog plus the caller's cards for
/// the purchase form.
async fn list_products(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = CardRepository::new((*state.db).clone());

    let cards = match repo.list(auth.user_id()).await {
        Ok(cards) => cards,
        Err(e) => {
            error!(error = %e, "Failed to list cards");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred"
                })),
            )
                .into_response();
        }
    };

    let cards: Vec<serde_json::Value> = cards
        .iter()
        .map(|c| {
            json!({
                "id": c.id,
                "brand": brand_label(&c.brand),
                "last_four": last_four(&c.card_number)
            })
        })
        .collect();

    (
        StatusCode::OK,
        Json(json!({ "products": catalog(), "cards": cards })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_prices() {
        let products = catalog();
        assert_eq!(products.len(), 3);
        assert_eq!(products[0].price, "299.00");
        assert_eq!(products[1].price_brl, "649,99");
        assert_eq!(products[2].price_brl, "7.998,00");
    }
}
