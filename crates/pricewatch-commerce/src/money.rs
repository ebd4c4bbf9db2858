//! Money type for vendor offer amounts.
//!
//! Uses minor-unit integer representation to avoid floating-point
//! precision issues. Offer amounts are non-negative; construction
//! clamps at zero rather than representing debt.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// Korean won (no minor unit).
    #[default]
    KRW,
    USD,
    EUR,
    JPY,
}

impl Currency {
    /// Get the currency code (e.g. "KRW").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::KRW => "KRW",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::JPY => "JPY",
        }
    }

    /// Get the currency symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::KRW => "\u{20a9}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::JPY => "\u{00a5}",
        }
    }

    /// Number of minor-unit decimal places.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::KRW | Currency::JPY => 0,
            Currency::USD | Currency::EUR => 2,
        }
    }
}

/// A monetary amount in minor units of a currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    /// Amount in minor units (e.g. cents for USD, won for KRW).
    pub amount_minor: u64,
    /// Currency of the amount.
    pub currency: Currency,
}

impl Money {
    /// Create a new amount in minor units.
    pub fn new(amount_minor: u64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a won amount (the catalog's default currency).
    pub fn won(amount: u64) -> Self {
        Self::new(amount, Currency::KRW)
    }

    /// Check for a zero amount.
    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    /// Format for display, e.g. "₩12900" or "$129.00".
    pub fn display(&self) -> String {
        let places = self.currency.decimal_places();
        if places == 0 {
            format!("{}{}", self.currency.symbol(), self.amount_minor)
        } else {
            let divisor = 10u64.pow(places);
            format!(
                "{}{}.{:0width$}",
                self.currency.symbol(),
                self.amount_minor / divisor,
                self.amount_minor % divisor,
                width = places as usize
            )
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_won_display() {
        let m = Money::won(12900);
        assert_eq!(m.display(), "\u{20a9}12900");
    }

    #[test]
    fn test_usd_display() {
        let m = Money::new(12900, Currency::USD);
        assert_eq!(m.display(), "$129.00");
    }

    #[test]
    fn test_zero() {
        assert!(Money::won(0).is_zero());
        assert!(!Money::won(1).is_zero());
    }
}
