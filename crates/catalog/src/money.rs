use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, ValueObject};

/// A price amount in a given currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMoney")]
pub struct Money {
    amount: Decimal,
    currency: String, // ISO 4217 code, e.g. "USD"
}

impl Money {
    pub fn new(amount: Decimal, currency: impl AsRef<str>) -> DomainResult<Self> {
        let currency = currency.as_ref().trim().to_ascii_uppercase();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::validation(format!(
                "currency must be a 3-letter ISO code, got `{currency}`"
            )));
        }
        Ok(Self { amount, currency })
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }
}

impl ValueObject for Money {}

#[derive(Deserialize)]
struct RawMoney {
    amount: Decimal,
    currency: String,
}

impl TryFrom<RawMoney> for Money {
    type Error = DomainError;

    fn try_from(raw: RawMoney) -> Result<Self, Self::Error> {
        Self::new(raw.amount, raw.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn normalizes_currency_code() {
        let m = Money::new(Decimal::from_str("19.99").unwrap(), " usd ").unwrap();
        assert_eq!(m.currency(), "USD");
        assert_eq!(m.amount().to_string(), "19.99");
    }

    #[test]
    fn deserialize_validates_currency() {
        let m: Money = serde_json::from_str(r#"{"amount":"5.00","currency":"eur"}"#).unwrap();
        assert_eq!(m.currency(), "EUR");
        assert!(serde_json::from_str::<Money>(r#"{"amount":"5.00","currency":"euro"}"#).is_err());
    }

    #[test]
    fn rejects_malformed_currency() {
        for bad in ["", "US", "DOLLARS", "U$D"] {
            match Money::new(Decimal::ONE, bad).unwrap_err() {
                DomainError::Validation(_) => {}
                _ => panic!("Expected Validation error for `{bad}`"),
            }
        }
    }
}
