//! Product detail view.

use shop_commerce::catalog::ProductDetail;
use shop_commerce::ProductId;

use super::DerivedQuery;
use crate::actions::Actions;
use crate::error::SyncError;

/// Loads a product's detail whenever the viewed product id changes.
#[derive(Debug, Default)]
pub struct ProductDetailQuery {
    query: DerivedQuery<ProductId>,
}

impl ProductDetailQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch when `product_id` differs from the one last fetched.
    ///
    /// Returns `None` when nothing was fetched.
    pub async fn sync(
        &mut self,
        actions: &Actions,
        product_id: &ProductId,
    ) -> Option<Result<ProductDetail, SyncError>> {
        if !self.query.should_fetch(product_id) {
            return None;
        }
        Some(actions.fetch_product_detail(product_id).await)
    }

    pub fn current(&self) -> Option<&ProductId> {
        self.query.last()
    }
}
