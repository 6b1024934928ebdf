//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// Amounts are stored in the currency's standard unit (e.g., rupees, not
/// paise) as an exact decimal. Conversions to the smallest currency unit
/// (for payment gateways) round half-up to the nearest whole minor unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit.
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

    /// A zero price in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency_code,
        }
    }

    /// Create a price from an amount in the smallest currency unit
    /// (e.g., paise for INR, cents for USD).
    #[must_use]
    pub fn from_minor_units(minor: i64, currency_code: CurrencyCode) -> Self {
        Self {
            amount: Decimal::new(minor, 2),
            currency_code,
        }
    }

    /// Convert to the smallest currency unit, rounding to the nearest
    /// whole unit. Returns `None` if the amount does not fit in an `i64`.
    #[must_use]
    pub fn to_minor_units(&self) -> Option<i64> {
        (self.amount * Decimal::ONE_HUNDRED).round().to_i64()
    }

    /// Multiply this price by a unit count.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self {
            amount: self.amount * Decimal::from(quantity),
            currency_code: self.currency_code,
        }
    }

    /// Add another price in the same currency.
    ///
    /// Currency mismatches cannot occur within a single store; the amount
    /// is summed and this price's currency is kept.
    #[must_use]
    pub fn plus(&self, other: &Self) -> Self {
        Self {
            amount: self.amount + other.amount,
            currency_code: self.currency_code,
        }
    }

    /// Format for display (e.g., "₹1500.00").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency_code.symbol(), self.amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:.2}", self.currency_code.symbol(), self.amount)
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// The display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::INR => "₹",
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// The ISO 4217 code as a string.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::INR => "INR",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
        }
    }

    /// Parse a currency from its ISO 4217 code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "INR" => Some(Self::INR),
            "USD" => Some(Self::USD),
            "EUR" => Some(Self::EUR),
            "GBP" => Some(Self::GBP),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn rupees(n: i64) -> Price {
        Price::new(Decimal::from(n), CurrencyCode::INR)
    }

    #[test]
    fn test_minor_units_roundtrip() {
        let price = Price::from_minor_units(49_950, CurrencyCode::INR);
        assert_eq!(price.amount, Decimal::new(49_950, 2));
        assert_eq!(price.to_minor_units(), Some(49_950));
    }

    #[test]
    fn test_to_minor_units_rounds() {
        let price = Price::new(Decimal::new(4_995, 3), CurrencyCode::INR); // 4.995
        assert_eq!(price.to_minor_units(), Some(500));
    }

    #[test]
    fn test_times_and_plus() {
        let total = rupees(200).times(3).plus(&rupees(100).times(1));
        assert_eq!(total.amount, Decimal::from(700));
        assert_eq!(total.to_minor_units(), Some(70_000));
    }

    #[test]
    fn test_zero() {
        let zero = Price::zero(CurrencyCode::INR);
        assert_eq!(zero.to_minor_units(), Some(0));
        assert_eq!(zero.plus(&rupees(5)).amount, Decimal::from(5));
    }

    #[test]
    fn test_display() {
        assert_eq!(rupees(1500).display(), "₹1500.00");
        assert_eq!(
            Price::new(Decimal::new(999, 2), CurrencyCode::USD).to_string(),
            "$9.99"
        );
    }

    #[test]
    fn test_currency_codes() {
        assert_eq!(CurrencyCode::INR.code(), "INR");
        assert_eq!(CurrencyCode::default(), CurrencyCode::INR);
    }

    #[test]
    fn test_from_code() {
        assert_eq!(CurrencyCode::from_code("inr"), Some(CurrencyCode::INR));
        assert_eq!(CurrencyCode::from_code("USD"), Some(CurrencyCode::USD));
        assert_eq!(CurrencyCode::from_code("JPY"), None);
    }
}
