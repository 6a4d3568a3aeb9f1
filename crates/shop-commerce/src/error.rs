//! Commerce error types.

use thiserror::Error;

/// Errors raised by local operations on storefront entities.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in quantity calculation")]
    Overflow,

    /// Currency code is not a 3-letter code.
    #[error("Invalid currency code: {0:?}")]
    InvalidCurrencyCode(String),

    /// Currency is not offered by the business.
    #[error("Currency {code} is not available (available: {available})")]
    UnknownCurrency { code: String, available: String },
}
