//! Cart and line item types.

use crate::error::CommerceError;
use crate::ids::{CartId, ProductId};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// The shopper's cart as last returned by the API.
///
/// The item count is always derived from the line items; a count sent by the
/// server is ignored so the two can never disagree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub id: Option<CartId>,
    #[serde(default)]
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` of a product locally, merging with an existing line.
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        name: impl Into<String>,
        quantity: i64,
        unit_price: f64,
    ) -> Result<(), CommerceError> {
        let quantity = check_quantity(quantity)?;

        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(line) => {
                let merged = line
                    .quantity
                    .checked_add(quantity)
                    .ok_or(CommerceError::Overflow)?;
                line.quantity = check_quantity(merged)?;
            }
            None => self.items.push(CartItem {
                product_id,
                name: name.into(),
                quantity,
                unit_price,
            }),
        }
        Ok(())
    }

    pub fn remove_item(&mut self, product_id: &ProductId) -> Result<CartItem, CommerceError> {
        match self.items.iter().position(|i| &i.product_id == product_id) {
            Some(index) => Ok(self.items.remove(index)),
            None => Err(CommerceError::ItemNotInCart(product_id.to_string())),
        }
    }

    /// Total units across all lines.
    pub fn count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }
}

/// Reject non-positive quantities and ones above [`MAX_QUANTITY_PER_ITEM`].
pub fn check_quantity(quantity: i64) -> Result<i64, CommerceError> {
    if quantity <= 0 {
        return Err(CommerceError::InvalidQuantity(quantity));
    }
    if quantity > MAX_QUANTITY_PER_ITEM {
        return Err(CommerceError::QuantityExceedsLimit(
            quantity,
            MAX_QUANTITY_PER_ITEM,
        ));
    }
    Ok(quantity)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    #[serde(default)]
    pub name: String,
    pub quantity: i64,
    #[serde(alias = "price")]
    pub unit_price: f64,
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}
