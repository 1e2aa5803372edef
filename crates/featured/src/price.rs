//! Price display formatting.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;

use storefront_catalog::Money;

/// Formats an amount for display, currency symbol included.
pub trait CurrencyFormatter: Send + Sync {
    fn format(&self, amount: &Money) -> String;
}

impl<S> CurrencyFormatter for std::sync::Arc<S>
where
    S: CurrencyFormatter + ?Sized,
{
    fn format(&self, amount: &Money) -> String {
        (**self).format(amount)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    /// `$1,234.50`
    Prefix,
    /// `1.234,50 €`
    Suffix,
}

/// Locale-style formatter: fixed decimals, grouped thousands, per-currency symbols.
///
/// Currencies without a configured symbol are shown by ISO code, separated by a
/// space (`CHF 12.00`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LocaleCurrencyFormatter {
    symbols: BTreeMap<String, String>,
    position: SymbolPosition,
    decimals: u32,
    group_separator: String,
    decimal_separator: String,
}

impl Default for LocaleCurrencyFormatter {
    fn default() -> Self {
        let mut symbols = BTreeMap::new();
        symbols.insert("USD".to_string(), "$".to_string());
        symbols.insert("EUR".to_string(), "€".to_string());
        symbols.insert("GBP".to_string(), "£".to_string());
        Self {
            symbols,
            position: SymbolPosition::Prefix,
            decimals: 2,
            group_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
        }
    }
}

impl LocaleCurrencyFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_symbol(mut self, currency: impl Into<String>, symbol: impl Into<String>) -> Self {
        self.symbols
            .insert(currency.into().to_ascii_uppercase(), symbol.into());
        self
    }

    pub fn with_position(mut self, position: SymbolPosition) -> Self {
        self.position = position;
        self
    }

    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn with_separators(mut self, group: impl Into<String>, decimal: impl Into<String>) -> Self {
        self.group_separator = group.into();
        self.decimal_separator = decimal.into();
        self
    }

    fn rounded(&self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(self.decimals, RoundingStrategy::MidpointAwayFromZero)
    }

    fn number(&self, rounded: Decimal) -> String {
        let plain = format!("{:.*}", self.decimals as usize, rounded.abs());
        let (int_part, frac_part) = match plain.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (plain.as_str(), None),
        };

        let digits: Vec<char> = int_part.chars().collect();
        let mut grouped = String::with_capacity(plain.len() + digits.len() / 3);
        for (i, c) in digits.iter().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push_str(&self.group_separator);
            }
            grouped.push(*c);
        }
        if let Some(frac) = frac_part {
            grouped.push_str(&self.decimal_separator);
            grouped.push_str(frac);
        }
        grouped
    }
}

impl CurrencyFormatter for LocaleCurrencyFormatter {
    fn format(&self, amount: &Money) -> String {
        let rounded = self.rounded(amount.amount());
        let number = self.number(rounded);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
        match (self.symbols.get(amount.currency()), self.position) {
            (Some(symbol), SymbolPosition::Prefix) => format!("{sign}{symbol}{number}"),
            (Some(symbol), SymbolPosition::Suffix) => format!("{sign}{number} {symbol}"),
            (None, SymbolPosition::Prefix) => format!("{sign}{} {number}", amount.currency()),
            (None, SymbolPosition::Suffix) => format!("{sign}{number} {}", amount.currency()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    fn money(amount: &str, currency: &str) -> Money {
        Money::new(Decimal::from_str(amount).unwrap(), currency).unwrap()
    }

    #[test]
    fn formats_dollars_with_grouping() {
        let f = LocaleCurrencyFormatter::new();
        assert_eq!(f.format(&money("1234.5", "USD")), "$1,234.50");
        assert_eq!(f.format(&money("1234567.891", "USD")), "$1,234,567.89");
        assert_eq!(f.format(&money("0", "USD")), "$0.00");
        assert_eq!(f.format(&money("999", "USD")), "$999.00");
    }

    #[test]
    fn rounds_midpoint_away_from_zero() {
        let f = LocaleCurrencyFormatter::new();
        assert_eq!(f.format(&money("2.345", "USD")), "$2.35");
        assert_eq!(f.format(&money("-2.345", "USD")), "-$2.35");
    }

    #[test]
    fn negative_zero_after_rounding_has_no_sign() {
        let f = LocaleCurrencyFormatter::new();
        assert_eq!(f.format(&money("-0.001", "USD")), "$0.00");
    }

    #[test]
    fn suffix_symbol_with_european_separators() {
        let f = LocaleCurrencyFormatter::new()
            .with_position(SymbolPosition::Suffix)
            .with_separators(".", ",");
        assert_eq!(f.format(&money("1234.5", "EUR")), "1.234,50 €");
    }

    #[test]
    fn unknown_currency_falls_back_to_code() {
        let f = LocaleCurrencyFormatter::new();
        assert_eq!(f.format(&money("12", "CHF")), "CHF 12.00");
        let f = f.with_symbol("chf", "Fr.");
        assert_eq!(f.format(&money("12", "CHF")), "Fr.12.00");
    }

    #[test]
    fn zero_decimals_drop_fraction() {
        let f = LocaleCurrencyFormatter::new().with_symbol("JPY", "¥").with_decimals(0);
        assert_eq!(f.format(&money("1500.4", "JPY")), "¥1,500");
    }

    #[test]
    fn deserializes_partial_settings() {
        let f: LocaleCurrencyFormatter = toml::from_str("position = \"suffix\"\ndecimals = 1").unwrap();
        assert_eq!(f.format(&money("3.25", "GBP")), "3.3 £");
    }
}
