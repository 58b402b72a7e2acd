//! Integration tests for the transfer and account repositories.
//!
//! These run against a migrated database; set DATABASE_URL to enable them
//! (they skip themselves otherwise).

use sea_orm::{Database, DatabaseConnection};
use std::env;
use uuid::Uuid;

use atlasbank_db::repositories::account::AccountError;
use atlasbank_db::repositories::transfer::{ReceiptError, SendError};
use atlasbank_db::{AccountRepository, TransferRepository};

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
async fn test_balance_of_unknown_account_is_not_found() {
    let Some(db) = connect().await else { return };
    let repo = AccountRepository::new(db);

    let account_id = Uuid::new_v4();
    let result = repo.balance(account_id).await;

    match result {
        Err(AccountError::NotFound(id)) => assert_eq!(id, account_id),
        other => panic!("Expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_statement_of_unknown_account_is_empty() {
    let Some(db) = connect().await else { return };
    let repo = AccountRepository::new(db);

    let transfers = repo
        .list_transfers(Uuid::new_v4(), 20)
        .await
        .expect("List should succeed even with no results");

    assert!(transfers.is_empty());
}

#[tokio::test]
async fn test_send_from_unknown_account_fails() {
    let Some(db) = connect().await else { return };
    let repo = TransferRepository::new(db);

    let source = Uuid::new_v4();
    let result = repo
        .send(source, "nobody@atlasbank.dev", rust_decimal::Decimal::ONE)
        .await;

    match result {
        Err(SendError::AccountNotFound(id)) => assert_eq!(id, source),
        other => panic!("Expected AccountNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_receipt_of_unknown_transfer_is_not_found() {
    let Some(db) = connect().await else { return };
    let repo = TransferRepository::new(db);

    let transfer_id = Uuid::new_v4();
    let result = repo.receipt(transfer_id, Uuid::new_v4()).await;

    match result {
        Err(ReceiptError::NotFound(id)) => assert_eq!(id, transfer_id),
        other => panic!("Expected NotFound, got {other:?}"),
    }
}
