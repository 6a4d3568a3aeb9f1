//! Currency codes and display prices.
//!
//! The storefront API sends amounts as decimal numbers in major units
//! (`"price": 2500.5`) alongside an ISO 4217 code. Businesses choose their
//! own currency list, so codes are open-ended strings rather than an enum.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::CommerceError;

/// An upper-cased ISO 4217 currency code, e.g. `NGN`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parse and normalise a code. Must be three ASCII letters.
    pub fn parse(code: &str) -> Result<Self, CommerceError> {
        let trimmed = code.trim();
        if trimmed.len() == 3 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(trimmed.to_ascii_uppercase()))
        } else {
            Err(CommerceError::InvalidCurrencyCode(code.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display symbol (e.g. "₦"). Unknown codes have none.
    pub fn symbol(&self) -> Option<&'static str> {
        let symbol = match self.0.as_str() {
            "NGN" => "\u{20a6}",
            "USD" => "$",
            "EUR" => "\u{20ac}",
            "GBP" => "\u{00a3}",
            "GHS" => "\u{20b5}",
            "KES" => "KSh",
            "ZAR" => "R",
            "JPY" => "\u{00a5}",
            "CAD" => "CA$",
            _ => return None,
        };
        Some(symbol)
    }

    /// Number of decimal places shown for this currency.
    pub fn decimal_places(&self) -> usize {
        match self.0.as_str() {
            "JPY" => 0,
            _ => 2,
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = CommerceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for CurrencyCode {
    type Error = CommerceError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

/// An amount in major units with its currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub amount: f64,
    pub currency: CurrencyCode,
}

impl Price {
    pub fn new(amount: f64, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }

    /// Format as a display string (e.g. "₦2,500.50").
    pub fn display(&self) -> String {
        let amount = group_thousands(self.amount.abs(), self.currency.decimal_places());
        let sign = if self.amount < 0.0 { "-" } else { "" };
        match self.currency.symbol() {
            Some(symbol) => format!("{}{}{}", sign, symbol, amount),
            None => format!("{} {}{}", self.currency, sign, amount),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

fn group_thousands(value: f64, places: usize) -> String {
    let formatted = format!("{:.places$}", value);
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    match frac_part {
        Some(frac) => format!("{}.{}", grouped, frac),
        None => grouped,
    }
}
