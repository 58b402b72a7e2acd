//! Integration tests for the card, invoice, and purchase repositories.
//!
//! These run against a migrated database; set DATABASE_URL to enable them
//! (they skip themselves otherwise).

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use sea_orm::{Database, DatabaseConnection};
use std::env;
use uuid::Uuid;

use atlasbank_db::repositories::purchase::{ChargeError, ChargeInput};
use atlasbank_db::{CardRepository, InvoiceRepository, PurchaseRepository};

async fn connect() -> Option<DatabaseConnection> {
    let Ok(url) = env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping integration test");
        return None;
    };

    Some(
        Database::connect(&url)
            .await
            .expect("Failed to connect to database"),
    )
}

#[tokio::test]
async fn test_charge_on_unknown_card_is_invalid_card() {
    let Some(db) = connect().await else { return };
    let repo = PurchaseRepository::new(db);

    let card_id = Uuid::new_v4();
    let result = repo
        .charge(ChargeInput {
            user_id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            card_id,
            total: dec!(100.00),
            installments: 3,
            description: "Notebook".to_string(),
            purchase_date: NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
        })
        .await;

    match result {
        Err(ChargeError::InvalidCard(id)) => assert_eq!(id, card_id),
        other => panic!("Expected InvalidCard, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_card_has_no_invoices_or_entries() {
    let Some(db) = connect().await else { return };
    let repo = InvoiceRepository::new(db);

    let card_id = Uuid::new_v4();
    assert!(repo.list_for_card(card_id).await.unwrap().is_empty());
    assert!(repo.list_entries_for_card(card_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_user_has_no_cards() {
    let Some(db) = connect().await else { return };
    let repo = CardRepository::new(db);

    let cards = repo.list(Uuid::new_v4()).await.unwrap();
    assert!(cards.is_empty());
}
