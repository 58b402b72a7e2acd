//! Credit-card issuance rules.
//!
//! Issuance is capped at three cards per user. Card attributes (number,
//! security code, expiry, starting limit, brand) are generated at approval
//! time; the available limit is then only ever decremented by purchases.

use chrono::{Datelike, NaiveDate};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of cards a user may hold.
pub const MAX_CARDS_PER_USER: u64 = 3;

/// Errors that can occur during card issuance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    /// The user already holds the maximum number of cards.
    #[error("card limit reached: at most {MAX_CARDS_PER_USER} cards per user")]
    CardLimitReached,
}

/// Card network brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CardBrand {
    /// Visa.
    Visa,
    /// Mastercard.
    Mastercard,
}

impl std::fmt::Display for CardBrand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Visa => write!(f, "VISA"),
            Self::Mastercard => write!(f, "MASTERCARD"),
        }
    }
}

impl std::str::FromStr for CardBrand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "VISA" => Ok(Self::Visa),
            "MASTERCARD" => Ok(Self::Mastercard),
            _ => Err(format!("Unknown card brand: {s}")),
        }
    }
}

/// Generated attributes for a newly approved card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSpec {
    /// Display name ("Atlas Bank {BRAND}").
    pub name: String,
    /// 16-digit card number.
    pub number: String,
    /// 3-digit security code.
    pub security_code: String,
    /// Network brand.
    pub brand: CardBrand,
    /// Expiry month (1-12).
    pub expiry_month: u32,
    /// Expiry year.
    pub expiry_year: i32,
    /// Starting available limit, a multiple of 100 in 2000..=10000.
    pub limit: Decimal,
}

/// Checks the issuance cap against the user's current card count.
///
/// # Errors
///
/// Returns [`CardError::CardLimitReached`] when the user already holds
/// [`MAX_CARDS_PER_USER`] cards.
pub fn check_issuance_cap(existing_cards: u64) -> Result<(), CardError> {
    if existing_cards >= MAX_CARDS_PER_USER {
        return Err(CardError::CardLimitReached);
    }
    Ok(())
}

/// Generates the attributes for a new card.
///
/// Expiry is 2 to 10 years after `today`; the starting limit is a random
/// multiple of 100 between 2000 and 10000.
pub fn generate_card<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate) -> CardSpec {
    let number: String = (0..16).map(|_| char::from(b'0' + rng.random_range(0..10u8))).collect();
    let security_code = rng.random_range(100..=999u16).to_string();

    let expiry_month = rng.random_range(1..=12u32);
    let expiry_year = today.year() + rng.random_range(2..=10i32);

    let limit = Decimal::from(rng.random_range(20..=100i64) * 100);
    let brand = if rng.random_bool(0.5) {
        CardBrand::Visa
    } else {
        CardBrand::Mastercard
    };

    CardSpec {
        name: format!("Atlas Bank {brand}"),
        number,
        security_code,
        brand,
        expiry_month,
        expiry_year,
        limit,
    }
}

/// Returns the last four digits of a card number, for masked display.
#[must_use]
pub fn last_four(number: &str) -> &str {
    let cut = number.len().saturating_sub(4);
    &number[cut..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    #[test]
    fn test_cap_allows_up_to_three_cards() {
        assert!(check_issuance_cap(0).is_ok());
        assert!(check_issuance_cap(2).is_ok());
    }

    #[test]
    fn test_cap_rejects_fourth_card() {
        assert_eq!(check_issuance_cap(3), Err(CardError::CardLimitReached));
        assert_eq!(check_issuance_cap(7), Err(CardError::CardLimitReached));
    }

    #[test]
    fn test_generated_card_shape() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let card = generate_card(&mut rng, today());

            assert_eq!(card.number.len(), 16);
            assert!(card.number.chars().all(|c| c.is_ascii_digit()));
            assert_eq!(card.security_code.len(), 3);
            assert!((1..=12).contains(&card.expiry_month));
            assert!((2028..=2036).contains(&card.expiry_year));
            assert!(card.limit >= dec!(2000) && card.limit <= dec!(10000));
            assert_eq!(card.limit % dec!(100), Decimal::ZERO);
            assert_eq!(card.name, format!("Atlas Bank {}", card.brand));
        }
    }

    #[test]
    fn test_brand_roundtrip() {
        assert_eq!(CardBrand::from_str("visa").unwrap(), CardBrand::Visa);
        assert_eq!(
            CardBrand::from_str("MASTERCARD").unwrap(),
            CardBrand::Mastercard
        );
        assert!(CardBrand::from_str("AMEX").is_err());
        assert_eq!(CardBrand::Visa.to_string(), "VISA");
    }

    #[test]
    fn test_last_four() {
        assert_eq!(last_four("1234567890123456"), "3456");
        assert_eq!(last_four("123"), "123");
    }
}
