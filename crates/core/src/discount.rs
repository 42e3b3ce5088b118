//! Promo codes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{DiscountId, Price};

/// Smallest accepted percentage.
pub const MIN_PERCENT: u8 = 1;
/// Largest accepted percentage.
pub const MAX_PERCENT: u8 = 90;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiscountError {
    #[error("promo code must not be empty")]
    EmptyCode,
    #[error("promo code may only contain letters, digits, '-' and '_'")]
    InvalidCode,
    #[error("discount must be between 1 and 90 percent, got {0}")]
    PercentOutOfRange(u8),
    #[error("promo code {0} already exists")]
    DuplicateCode(String),
    #[error("promo code {0} is unknown")]
    UnknownCode(String),
    #[error("promo code {0} is inactive or expired")]
    NotUsable(String),
}

/// A percentage promo code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    pub id: DiscountId,
    /// Stored upper-case; matched case-insensitively.
    pub code: String,
    pub percent: u8,
    pub active: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Discount {
    /// Build a discount, normalizing the code.
    ///
    /// # Errors
    ///
    /// Rejects empty codes, codes with characters other than ASCII letters,
    /// digits, `-` and `_`, and percentages outside 1..=90.
    pub fn new(
        id: DiscountId,
        code: &str,
        percent: u8,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Self, DiscountError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(DiscountError::EmptyCode);
        }
        if !code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(DiscountError::InvalidCode);
        }
        if !(MIN_PERCENT..=MAX_PERCENT).contains(&percent) {
            return Err(DiscountError::PercentOutOfRange(percent));
        }
        Ok(Self {
            id,
            code: code.to_ascii_uppercase(),
            percent,
            active: true,
            expires_at,
        })
    }

    /// Case-insensitive code comparison.
    #[must_use]
    pub fn matches(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code.trim())
    }

    /// Active and not past its expiry.
    #[must_use]
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        self.active && self.expires_at.is_none_or(|expiry| now < expiry)
    }

    /// Amount taken off `subtotal`, rounded to whole currency units.
    #[must_use]
    pub fn amount_off(&self, subtotal: Price) -> Price {
        (subtotal * (Decimal::from(self.percent) / Decimal::ONE_HUNDRED)).round_whole()
    }

    /// `subtotal` with the discount taken off.
    ///
    /// ```
    /// use facade_shop_core::discount::Discount;
    /// use facade_shop_core::{DiscountId, Price};
    /// use rust_decimal::Decimal;
    ///
    /// let discount = Discount::new(DiscountId::new(1), "spring10", 10, None).unwrap();
    /// let total = discount.apply(Price::rub(Decimal::new(2405, 0)));
    /// assert_eq!(total.amount, Decimal::new(2164, 0));
    /// ```
    #[must_use]
    pub fn apply(&self, subtotal: Price) -> Price {
        let off = self.amount_off(subtotal);
        Price::new(subtotal.amount - off.amount, subtotal.currency_code)
    }
}

/// Find the usable discount for `code`.
///
/// # Errors
///
/// `UnknownCode` when nothing matches, `NotUsable` when the match is inactive
/// or expired.
pub fn find_usable<'a>(
    discounts: &'a [Discount],
    code: &str,
    now: DateTime<Utc>,
) -> Result<&'a Discount, DiscountError> {
    let discount = discounts
        .iter()
        .find(|discount| discount.matches(code))
        .ok_or_else(|| DiscountError::UnknownCode(code.trim().to_owned()))?;
    if discount.is_usable(now) {
        Ok(discount)
    } else {
        Err(DiscountError::NotUsable(discount.code.clone()))
    }
}

/// Promo codes available at startup.
#[must_use]
pub fn seed_discounts() -> Vec<Discount> {
    let rows: [(&str, u8, bool); 3] = [("WELCOME5", 5, true), ("KITCHEN15", 15, true), ("BLACKFRIDAY", 30, false)];
    rows.iter()
        .zip(1..)
        .map(|(&(code, percent, active), id)| Discount {
            id: DiscountId::new(id),
            code: code.to_owned(),
            percent,
            active,
            expires_at: None,
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn discount(percent: u8) -> Discount {
        Discount::new(DiscountId::new(1), "promo", percent, None).unwrap()
    }

    #[test]
    fn test_code_is_normalized_and_case_insensitive() {
        let discount = discount(10);
        assert_eq!(discount.code, "PROMO");
        assert!(discount.matches("promo"));
        assert!(discount.matches("  Promo "));
        assert!(!discount.matches("promo2"));
    }

    #[test]
    fn test_percent_range() {
        assert_eq!(
            Discount::new(DiscountId::new(1), "X", 0, None),
            Err(DiscountError::PercentOutOfRange(0))
        );
        assert_eq!(
            Discount::new(DiscountId::new(1), "X", 91, None),
            Err(DiscountError::PercentOutOfRange(91))
        );
        assert!(Discount::new(DiscountId::new(1), "X", 90, None).is_ok());
    }

    #[test]
    fn test_code_validation() {
        assert_eq!(
            Discount::new(DiscountId::new(1), "  ", 10, None),
            Err(DiscountError::EmptyCode)
        );
        assert_eq!(
            Discount::new(DiscountId::new(1), "two words", 10, None),
            Err(DiscountError::InvalidCode)
        );
    }

    #[test]
    fn test_apply_rounds_midpoint_away_from_zero() {
        // 15% of 2410 = 361.5 -> 362 off
        let total = discount(15).apply(Price::rub(Decimal::new(2410, 0)));
        assert_eq!(total.amount, Decimal::new(2048, 0));
    }

    #[test]
    fn test_usability() {
        let now = Utc::now();
        let mut discount = discount(10);
        assert!(discount.is_usable(now));

        discount.expires_at = Some(now - Duration::days(1));
        assert!(!discount.is_usable(now));

        discount.expires_at = Some(now + Duration::days(1));
        discount.active = false;
        assert!(!discount.is_usable(now));
    }

    #[test]
    fn test_find_usable() {
        let discounts = seed_discounts();
        let now = Utc::now();
        assert_eq!(find_usable(&discounts, "welcome5", now).unwrap().percent, 5);
        assert_eq!(
            find_usable(&discounts, "blackfriday", now),
            Err(DiscountError::NotUsable("BLACKFRIDAY".to_owned()))
        );
        assert!(matches!(
            find_usable(&discounts, "nope", now),
            Err(DiscountError::UnknownCode(_))
        ));
    }
}
