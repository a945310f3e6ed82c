//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices, cart totals and order amounts are all `rust_decimal`
//! values so that `price × quantity` sums never drift the way binary floats
//! do.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::order::Money;

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., rupees, not paise).
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

    /// Price of `quantity` units at this price.
    #[must_use]
    pub fn times(&self, quantity: i64) -> Self {
        Self::new(self.amount * Decimal::from(quantity), self.currency_code)
    }

    /// Amount rendered with exactly two decimal places (e.g. `"16499.00"`).
    #[must_use]
    pub fn to_fixed(&self) -> String {
        let mut amount = self.amount;
        amount.rescale(2);
        amount.to_string()
    }

    /// Convert into the currency-tagged shape payment providers expect.
    #[must_use]
    pub fn to_money(&self) -> Money {
        Money {
            currency_code: self.currency_code,
            value: self.to_fixed(),
        }
    }

    /// Format for display (e.g. `₹16499.00`).
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{}", self.currency_code.symbol(), self.to_fixed())
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
    /// Display symbol.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::INR => "₹",
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Three-letter code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::INR => "INR",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
        }
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INR" => Ok(Self::INR),
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            other => Err(format!("unsupported currency code: {other}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_to_fixed_pads_whole_amounts() {
        let price = Price::new(Decimal::from(16499), CurrencyCode::INR);
        assert_eq!(price.to_fixed(), "16499.00");
        assert_eq!(price.display(), "₹16499.00");
    }

    #[test]
    fn test_times_is_exact() {
        let price = Price::new(Decimal::new(1999, 2), CurrencyCode::USD);
        assert_eq!(price.times(3).amount, Decimal::new(5997, 2));
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!("inr".parse::<CurrencyCode>().unwrap(), CurrencyCode::INR);
        assert!("XYZ".parse::<CurrencyCode>().is_err());
    }

    #[test]
    fn test_to_money() {
        let money = Price::new(Decimal::from(10999), CurrencyCode::INR).to_money();
        let json = serde_json::to_value(&money).unwrap();
        assert_eq!(json["currency_code"], "INR");
        assert_eq!(json["value"], "10999.00");
    }
}
