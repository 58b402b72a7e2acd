//! Database seeder for Atlas Bank development and testing.
//!
//! Seeds two demo users with accounts, one transfer between them, and a
//! credit card, so the dashboard has something to show after login.
//!
//! Usage: cargo run --bin seeder
//!
//! Demo credentials: alice@atlasbank.dev / senha123 (and bob@...).

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use atlasbank_core::auth::hash_password;
use atlasbank_db::entities::{
    accounts, cards, transfers, users,
    sea_orm_active_enums::{AccountKind, CardBrand},
};

/// Demo user Alice (consistent for all seeds)
const ALICE_USER_ID: &str = "00000000-0000-0000-0000-000000000001";
const ALICE_ACCOUNT_ID: &str = "00000000-0000-0000-0000-000000000011";
/// Demo user Bob (consistent for all seeds)
const BOB_USER_ID: &str = "00000000-0000-0000-0000-000000000002";
const BOB_ACCOUNT_ID: &str = "00000000-0000-0000-0000-000000000012";
/// Demo card for Alice
const ALICE_CARD_ID: &str = "00000000-0000-0000-0000-000000000021";

/// Demo password for both users.
const DEMO_PASSWORD: &str = "senha123";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = atlasbank_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding demo users...");
    seed_user(&db, ALICE_USER_ID, ALICE_ACCOUNT_ID, "alice@atlasbank.dev", "Alice Andrade", 1000).await;
    seed_user(&db, BOB_USER_ID, BOB_ACCOUNT_ID, "bob@atlasbank.dev", "Bob Barbosa", 250).await;

    println!("Seeding demo transfer...");
    seed_transfer(&db).await;

    println!("Seeding demo card...");
    seed_card(&db).await;

    println!("Seeding complete!");
}

fn parse_id(raw: &str) -> Uuid {
    Uuid::parse_str(raw).unwrap()
}

/// Seeds one user with their checking account.
async fn seed_user(
    db: &DatabaseConnection,
    user_id: &str,
    account_id: &str,
    email: &str,
    full_name: &str,
    initial_balance: i64,
) {
    let user_id = parse_id(user_id);

    // Check if user already exists
    if users::Entity::find_by_id(user_id)
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  User {email} already exists, skipping...");
        return;
    }

    let now = Utc::now().into();
    let password_hash = hash_password(DEMO_PASSWORD).expect("Failed to hash demo password");

    let user = users::ActiveModel {
        id: Set(user_id),
        email: Set(email.to_string()),
        password_hash: Set(password_hash),
        full_name: Set(full_name.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };

    if let Err(e) = user.insert(db).await {
        eprintln!("Failed to insert user {email}: {e}");
        return;
    }

    let account = accounts::ActiveModel {
        id: Set(parse_id(account_id)),
        user_id: Set(user_id),
        kind: Set(AccountKind::Checking),
        initial_balance: Set(Decimal::from(initial_balance)),
        created_at: Set(now),
    };

    if let Err(e) = account.insert(db).await {
        eprintln!("Failed to insert account for {email}: {e}");
    } else {
        println!("  Created user: {email}");
    }
}

/// Seeds one transfer from Alice to Bob.
async fn seed_transfer(db: &DatabaseConnection) {
    let existing = transfers::Entity::find().one(db).await.ok().flatten();
    if existing.is_some() {
        println!("  Transfers already exist, skipping...");
        return;
    }

    let transfer = transfers::ActiveModel {
        id: Set(Uuid::new_v4()),
        source_account_id: Set(parse_id(ALICE_ACCOUNT_ID)),
        destination_account_id: Set(parse_id(BOB_ACCOUNT_ID)),
        amount: Set(Decimal::new(5000, 2)), // 50.00
        transferred_at: Set(Utc::now().into()),
    };

    if let Err(e) = transfer.insert(db).await {
        eprintln!("Failed to insert demo transfer: {e}");
    } else {
        println!("  Created transfer: Alice -> Bob, 50.00");
    }
}

/// Seeds a card for Alice.
async fn seed_card(db: &DatabaseConnection) {
    let card_id = parse_id(ALICE_CARD_ID);

    if cards::Entity::find_by_id(card_id)
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Demo card already exists, skipping...");
        return;
    }

    let now = Utc::now().into();
    let card = cards::ActiveModel {
        id: Set(card_id),
        user_id: Set(parse_id(ALICE_USER_ID)),
        name: Set("Atlas Bank VISA".to_string()),
        available_limit: Set(Decimal::from(5000)),
        brand: Set(CardBrand::Visa),
        card_number: Set("4000123456789010".to_string()),
        security_code: Set("123".to_string()),
        expiry_month: Set(12),
        expiry_year: Set(2030),
        created_at: Set(now),
        updated_at: Set(now),
    };

    if let Err(e) = card.insert(db).await {
        eprintln!("Failed to insert demo card: {e}");
    } else {
        println!("  Created card for Alice: VISA ending 9010");
    }
}
