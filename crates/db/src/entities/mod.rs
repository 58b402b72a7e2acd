//! `SeaORM` entity definitions for the Atlas Bank schema.

pub mod accounts;
pub mod cards;
pub mod invoices;
pub mod purchase_entries;
pub mod sea_orm_active_enums;
pub mod transfers;
pub mod users;
