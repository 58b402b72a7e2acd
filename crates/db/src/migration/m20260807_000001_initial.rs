//! Initial database migration.
//!
//! Creates the enums, tables, constraints, and triggers for the Atlas Bank
//! schema: users, accounts, the append-only transfer log, cards, invoices,
//! and purchase entries.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: USERS & ACCOUNTS
        // ============================================================
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(ACCOUNTS_SQL).await?;

        // ============================================================
        // PART 3: TRANSFER LOG
        // ============================================================
        db.execute_unprepared(TRANSFERS_SQL).await?;

        // ============================================================
        // PART 4: CARDS & BILLING
        // ============================================================
        db.execute_unprepared(CARDS_SQL).await?;
        db.execute_unprepared(INVOICES_SQL).await?;
        db.execute_unprepared(PURCHASE_ENTRIES_SQL).await?;

        // ============================================================
        // PART 5: TRIGGERS & FUNCTIONS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Account kinds
CREATE TYPE account_kind AS ENUM ('checking', 'savings');

-- Card network brands
CREATE TYPE card_brand AS ENUM ('visa', 'mastercard');

-- Purchase entry kinds
CREATE TYPE entry_kind AS ENUM ('debit', 'credit');

-- Invoice payment status
CREATE TYPE invoice_status AS ENUM ('open', 'closed', 'paid');
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY,
    email VARCHAR(255) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    full_name VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    kind account_kind NOT NULL DEFAULT 'checking',
    -- immutable; the current balance is always derived from the
    -- transfer log, never stored
    initial_balance NUMERIC(14, 2) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    -- one account per user in this design
    CONSTRAINT uq_accounts_user UNIQUE (user_id)
);
";

const TRANSFERS_SQL: &str = r"
CREATE TABLE transfers (
    id UUID PRIMARY KEY,
    source_account_id UUID NOT NULL REFERENCES accounts(id),
    destination_account_id UUID NOT NULL REFERENCES accounts(id),
    amount NUMERIC(14, 2) NOT NULL,
    transferred_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT ck_transfers_positive_amount CHECK (amount > 0),
    CONSTRAINT ck_transfers_distinct_accounts
        CHECK (source_account_id <> destination_account_id)
);

-- balance derivation scans one side of the log per account
CREATE INDEX idx_transfers_source
    ON transfers (source_account_id, transferred_at DESC);
CREATE INDEX idx_transfers_destination
    ON transfers (destination_account_id, transferred_at DESC);
";

const CARDS_SQL: &str = r"
CREATE TABLE cards (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name VARCHAR(100) NOT NULL,
    available_limit NUMERIC(14, 2) NOT NULL,
    brand card_brand NOT NULL,
    card_number VARCHAR(16) NOT NULL,
    security_code VARCHAR(3) NOT NULL,
    expiry_month INTEGER NOT NULL CHECK (expiry_month BETWEEN 1 AND 12),
    expiry_year INTEGER NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_cards_user ON cards (user_id);
";

const INVOICES_SQL: &str = r"
CREATE TABLE invoices (
    id UUID PRIMARY KEY,
    card_id UUID NOT NULL REFERENCES cards(id) ON DELETE CASCADE,
    reference_month INTEGER NOT NULL CHECK (reference_month BETWEEN 1 AND 12),
    reference_year INTEGER NOT NULL,
    closing_date DATE NOT NULL,
    due_date DATE NOT NULL,
    total_amount NUMERIC(14, 2) NOT NULL DEFAULT 0,
    status invoice_status NOT NULL DEFAULT 'open',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    -- authoritative for find-or-create: at most one invoice per period
    CONSTRAINT uq_invoices_card_period
        UNIQUE (card_id, reference_month, reference_year)
);
";

const PURCHASE_ENTRIES_SQL: &str = r"
CREATE TABLE purchase_entries (
    id UUID PRIMARY KEY,
    account_id UUID NOT NULL REFERENCES accounts(id),
    user_id UUID NOT NULL REFERENCES users(id),
    invoice_id UUID NOT NULL REFERENCES invoices(id) ON DELETE CASCADE,
    amount NUMERIC(14, 2) NOT NULL,
    kind entry_kind NOT NULL,
    description VARCHAR(255) NOT NULL,
    posted_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_purchase_entries_invoice ON purchase_entries (invoice_id);
CREATE INDEX idx_purchase_entries_user ON purchase_entries (user_id, posted_at DESC);
";

const TRIGGERS_SQL: &str = r"
CREATE OR REPLACE FUNCTION set_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = NOW();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_users_updated_at
    BEFORE UPDATE ON users
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_cards_updated_at
    BEFORE UPDATE ON cards
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_invoices_updated_at
    BEFORE UPDATE ON invoices
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS purchase_entries CASCADE;
DROP TABLE IF EXISTS invoices CASCADE;
DROP TABLE IF EXISTS cards CASCADE;
DROP TABLE IF EXISTS transfers CASCADE;
DROP TABLE IF EXISTS accounts CASCADE;
DROP TABLE IF EXISTS users CASCADE;

DROP FUNCTION IF EXISTS set_updated_at CASCADE;

DROP TYPE IF EXISTS invoice_status;
DROP TYPE IF EXISTS entry_kind;
DROP TYPE IF EXISTS card_brand;
DROP TYPE IF EXISTS account_kind;
";
