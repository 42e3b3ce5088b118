//! Type-safe price representation using decimal arithmetic.
//!
//! All catalog prices are stored in roubles; the currency code is kept on the
//! value so that display and serialization never have to guess.

use std::iter::Sum;
use std::ops::{Add, Mul};

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// ```
/// use facade_shop_core::Price;
/// use rust_decimal::Decimal;
///
/// let price = Price::rub(Decimal::new(2400, 0));
/// assert_eq!(price.display(), "2 400 ₽");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (roubles, not kopecks).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in roubles.
    #[must_use]
    pub const fn rub(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::RUB)
    }

    /// Zero roubles.
    #[must_use]
    pub const fn zero() -> Self {
        Self::rub(Decimal::ZERO)
    }

    /// Whether the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Round to whole currency units, midpoint away from zero.
    #[must_use]
    pub fn round_whole(&self) -> Self {
        Self::new(
            self.amount
                .round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero),
            self.currency_code,
        )
    }

    /// Format for display, e.g. `12 500 ₽` or `99,50 ₽`.
    ///
    /// Thousands are separated by a space; the fractional part is shown with
    /// a decimal comma only when it is non-zero.
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self.amount.round_dp(2);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let abs = rounded.abs();
        let whole = abs.trunc();
        let kopecks = ((abs - whole) * Decimal::ONE_HUNDRED)
            .trunc()
            .to_u32()
            .unwrap_or(0);

        let grouped = group_thousands(&whole.normalize().to_string());
        let number = if kopecks == 0 {
            grouped
        } else {
            format!("{grouped},{kopecks:02}")
        };

        match self.currency_code {
            CurrencyCode::USD => format!("{sign}{}{number}", self.currency_code.symbol()),
            CurrencyCode::RUB | CurrencyCode::EUR => {
                format!("{sign}{number} {}", self.currency_code.symbol())
            }
        }
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::zero()
    }
}

impl Add for Price {
    type Output = Self;

    /// Adds amounts, keeping the left-hand currency. The shop only ever sums
    /// prices of a single currency.
    fn add(self, rhs: Self) -> Self {
        Self::new(self.amount + rhs.amount, self.currency_code)
    }
}

impl Mul<Decimal> for Price {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self {
        Self::new(self.amount * rhs, self.currency_code)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

/// Insert a space between every group of three digits, counting from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    RUB,
    USD,
    EUR,
}

impl CurrencyCode {
    /// Currency symbol used in display strings.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::RUB => "₽",
            Self::USD => "$",
            Self::EUR => "€",
        }
    }
}
