//! Business profile and product catalog types.

mod business;
mod product;

pub use business::*;
pub use product::*;
