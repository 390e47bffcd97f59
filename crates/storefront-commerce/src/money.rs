//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation so that displayed totals are
//! always exact to two decimal places.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency symbol used for display.
pub const CURRENCY_SYMBOL: &str = "$";

/// A monetary value in cents.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
}

impl Money {
    /// Create a new Money value from cents.
    pub const fn new(amount_cents: i64) -> Self {
        Self { amount_cents }
    }

    /// Create a Money value from a decimal amount, rounding half away from
    /// zero to the nearest cent.
    ///
    /// ```
    /// use storefront_commerce::money::Money;
    /// let price = Money::from_decimal(49.99);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        Self::new((amount * 100.0).round() as i64)
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        let amount = self.display_amount();
        match amount.strip_prefix('-') {
            Some(abs) => format!("-{}{}", CURRENCY_SYMBOL, abs),
            None => format!("{}{}", CURRENCY_SYMBOL, amount),
        }
    }

    /// Format with exactly two decimals and no symbol (e.g., "12.00").
    pub fn display_amount(&self) -> String {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        format!("{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
