//! Product listing and detail types.

use crate::ids::ProductId;
use crate::money::{CurrencyCode, Price};
use crate::pagination::Pagination;
use serde::{Deserialize, Serialize};

/// A product as it appears in a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub currency: CurrencyCode,
    /// Free-form type used for listing filters (e.g. "physical", "service").
    #[serde(default)]
    pub product_type: Option<String>,
    /// Thumbnail URL.
    #[serde(default)]
    pub image: Option<String>,
}

impl ProductSummary {
    pub fn price(&self) -> Price {
        Price::new(self.price, self.currency.clone())
    }
}

/// One page of a product listing.
///
/// Replaced wholesale on every page or filter change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    #[serde(alias = "products")]
    pub items: Vec<ProductSummary>,
    /// 1-indexed page this listing is for.
    #[serde(alias = "current_page")]
    pub page: i64,
    #[serde(default)]
    pub per_page: i64,
    #[serde(alias = "total_count", default)]
    pub total: i64,
}

impl ProductPage {
    /// Pagination derived from this page. Always consistent with `page` and
    /// `total` as received.
    pub fn pagination(&self) -> Pagination {
        let per_page = if self.per_page > 0 {
            self.per_page
        } else {
            (self.items.len() as i64).max(1)
        };
        Pagination::new(self.page.max(1), per_page, self.total.max(0))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Physical measurement attached to a product (weight, length, volume...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub unit: String,
    pub value: f64,
}

/// Everything the product page shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetail {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub currency: CurrencyCode,
    #[serde(default)]
    pub measurement: Option<Measurement>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl ProductDetail {
    pub fn price(&self) -> Price {
        Price::new(self.price, self.currency.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_accepts_aliases() {
        let page: ProductPage = serde_json::from_str(
            r#"{
                "products": [{"id": "p1", "name": "Jollof", "price": 2500, "currency": "NGN"}],
                "current_page": 2,
                "per_page": 1,
                "total_count": 3
            }"#,
        )
        .unwrap();

        assert_eq!(page.items.len(), 1);
        let pagination = page.pagination();
        assert_eq!(pagination.page, 2);
        assert_eq!(pagination.total_pages, 3);
        assert!(pagination.has_next);
        assert!(pagination.has_prev);
    }

    #[test]
    fn test_page_without_per_page_uses_item_count() {
        let page = ProductPage {
            items: vec![],
            page: 1,
            per_page: 0,
            total: 0,
        };
        let pagination = page.pagination();
        assert_eq!(pagination.per_page, 1);
        assert_eq!(pagination.total_pages, 1);
        assert!(page.is_empty());
    }

    #[test]
    fn test_page_with_absurd_total() {
        let page: ProductPage = serde_json::from_str(
            r#"{"items": [], "page": 1, "per_page": 12, "total": 9223372036854775807}"#,
        )
        .unwrap();
        let pagination = page.pagination();
        assert_eq!(pagination.total_pages, i64::MAX / 12 + 1);
        assert_eq!(pagination.end_item(), 12);
    }

    #[test]
    fn test_detail_measurement() {
        let detail: ProductDetail = serde_json::from_str(
            r#"{
                "id": "p1",
                "name": "Rice",
                "price": 45000,
                "currency": "ngn",
                "measurement": {"unit": "kg", "value": 50}
            }"#,
        )
        .unwrap();
        assert_eq!(detail.measurement.as_ref().unwrap().unit, "kg");
        assert_eq!(detail.price().currency.as_str(), "NGN");
        assert!(detail.images.is_empty());
    }
}
