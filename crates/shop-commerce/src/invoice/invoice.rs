//! Invoice types.

use crate::ids::InvoiceId;
use crate::money::{CurrencyCode, Price};
use serde::{Deserialize, Serialize};

use super::InvoiceTotals;

/// One billed line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    #[serde(default, alias = "name")]
    pub description: String,
    pub quantity: f64,
    /// Unit amount.
    #[serde(alias = "price")]
    pub amount: f64,
}

impl InvoiceItem {
    pub fn new(description: impl Into<String>, quantity: f64, amount: f64) -> Self {
        Self {
            description: description.into(),
            quantity,
            amount,
        }
    }

    pub fn line_total(&self) -> f64 {
        self.quantity * self.amount
    }
}

/// An invoice being viewed or composed.
///
/// Only the inputs are stored; [`Invoice::totals`] recomputes the figures on
/// every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    /// Human-facing invoice number (e.g. "INV-0042").
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
    #[serde(default)]
    pub is_vat_applied: bool,
    /// Percentage, e.g. `7.5`.
    #[serde(default)]
    pub vat_rate: f64,
    #[serde(default)]
    pub coupon_discount: f64,
    #[serde(default)]
    pub currency: Option<CurrencyCode>,
}

impl Invoice {
    /// An empty draft.
    pub fn draft(id: InvoiceId) -> Self {
        Self {
            id,
            number: None,
            items: Vec::new(),
            is_vat_applied: false,
            vat_rate: 0.0,
            coupon_discount: 0.0,
            currency: None,
        }
    }

    pub fn totals(&self) -> InvoiceTotals {
        InvoiceTotals::compute(
            &self.items,
            self.is_vat_applied,
            self.vat_rate,
            self.coupon_discount,
        )
    }

    /// Total as a displayable price, when the invoice carries a currency.
    pub fn total_price(&self) -> Option<Price> {
        self.currency
            .clone()
            .map(|currency| Price::new(self.totals().total, currency))
    }
}
