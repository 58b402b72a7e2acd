//! `SeaORM` active enums mapped to the PostgreSQL enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Bank account kind.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_kind")]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// Checking account (the kind signup creates).
    #[sea_orm(string_value = "checking")]
    Checking,
    /// Savings account.
    #[sea_orm(string_value = "savings")]
    Savings,
}

/// Card network brand.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "card_brand")]
#[serde(rename_all = "lowercase")]
pub enum CardBrand {
    /// Visa.
    #[sea_orm(string_value = "visa")]
    Visa,
    /// Mastercard.
    #[sea_orm(string_value = "mastercard")]
    Mastercard,
}

impl From<atlasbank_core::cards::CardBrand> for CardBrand {
    fn from(brand: atlasbank_core::cards::CardBrand) -> Self {
        match brand {
            atlasbank_core::cards::CardBrand::Visa => Self::Visa,
            atlasbank_core::cards::CardBrand::Mastercard => Self::Mastercard,
        }
    }
}

/// Purchase entry kind.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "entry_kind")]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryKind {
    /// Money owed on the invoice.
    #[sea_orm(string_value = "debit")]
    Debit,
    /// Money returned to the invoice (refunds, corrections).
    #[sea_orm(string_value = "credit")]
    Credit,
}

/// Invoice payment status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "invoice_status")]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Accumulating entries until the closing date.
    #[sea_orm(string_value = "open")]
    Open,
    /// Past the closing date, awaiting payment.
    #[sea_orm(string_value = "closed")]
    Closed,
    /// Settled.
    #[sea_orm(string_value = "paid")]
    Paid,
}
