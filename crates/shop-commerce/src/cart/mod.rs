//! Shopping cart module.

mod cart;

pub use cart::{check_quantity, Cart, CartItem, MAX_QUANTITY_PER_ITEM};
