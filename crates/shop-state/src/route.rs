//! Storefront route parameters.
//!
//! Hooks take their inputs (business slug, product id, page, filters) from
//! the current location. Recognised paths:
//!
//! | Path | Route |
//! |------|-------|
//! | `/store/{slug}` | [`Route::Storefront`] |
//! | `/store/{slug}/products/{product_id}` | [`Route::Product`] |
//! | `/invoice/{invoice_id}` | [`Route::Invoice`] |
//! | `/cart` | [`Route::Cart`] |

use std::collections::HashMap;

use shop_commerce::{CurrencyCode, InvoiceId, ProductId};

/// Query string parameters, decoded.
pub type QueryParams = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Storefront { slug: String },
    Product { slug: String, product_id: ProductId },
    Invoice { invoice_id: InvoiceId },
    Cart,
    Unknown(String),
}

/// A parsed location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteState {
    pub route: Route,
    pub query: QueryParams,
}

impl RouteState {
    /// Parse an absolute URL or a path with an optional query string.
    pub fn parse(location: &str) -> Self {
        let without_origin = match location.find("://") {
            Some(scheme_end) => {
                let rest = &location[scheme_end + 3..];
                rest.find('/').map(|i| &rest[i..]).unwrap_or("/")
            }
            None => location,
        };
        let without_fragment = without_origin.split('#').next().unwrap_or("");
        let (path, query) = match without_fragment.split_once('?') {
            Some((path, query)) => (path, query),
            None => (without_fragment, ""),
        };

        Self {
            route: parse_path(path),
            query: parse_query(query),
        }
    }

    pub fn business_slug(&self) -> Option<&str> {
        match &self.route {
            Route::Storefront { slug } | Route::Product { slug, .. } => Some(slug),
            _ => None,
        }
    }

    pub fn product_id(&self) -> Option<&ProductId> {
        match &self.route {
            Route::Product { product_id, .. } => Some(product_id),
            _ => None,
        }
    }

    pub fn invoice_id(&self) -> Option<&InvoiceId> {
        match &self.route {
            Route::Invoice { invoice_id } => Some(invoice_id),
            _ => None,
        }
    }

    /// `?page=`, defaulting to 1 when absent or unparseable.
    pub fn page(&self) -> i64 {
        self.query
            .get("page")
            .and_then(|p| p.parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1)
    }

    /// `?currency=`, ignored when not a valid code.
    pub fn currency(&self) -> Option<CurrencyCode> {
        self.query
            .get("currency")
            .and_then(|c| CurrencyCode::parse(c).ok())
    }

    /// `?type=` product filter.
    pub fn product_type(&self) -> Option<&str> {
        self.query
            .get("type")
            .map(String::as_str)
            .filter(|t| !t.is_empty())
    }
}

fn parse_path(path: &str) -> Route {
    let segments: Vec<String> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(decode_component)
        .collect();
    let parts: Vec<&str> = segments.iter().map(String::as_str).collect();

    match parts.as_slice() {
        [] => Route::Home,
        ["store", slug] => Route::Storefront {
            slug: slug.to_string(),
        },
        ["store", slug, "products", id] => Route::Product {
            slug: slug.to_string(),
            product_id: ProductId::new(*id),
        },
        ["invoice", id] | ["invoices", id] => Route::Invoice {
            invoice_id: InvoiceId::new(*id),
        },
        ["cart"] => Route::Cart,
        _ => Route::Unknown(path.to_string()),
    }
}

fn parse_query(query: &str) -> QueryParams {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (decode_component(k), decode_component(v)),
            None => (decode_component(pair), String::new()),
        })
        .collect()
}

/// Percent-decode, treating `+` as a space. Malformed escapes are kept as-is.
fn decode_component(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                match (hex(bytes[i + 1]), hex(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push((hi << 4) | lo);
                        i += 2;
                    }
                    _ => out.push(b'%'),
                }
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storefront_route() {
        let route = RouteState::parse("/store/acme-foods");
        assert_eq!(route.business_slug(), Some("acme-foods"));
        assert_eq!(route.page(), 1);
        assert_eq!(route.currency(), None);
    }

    #[test]
    fn test_product_route_from_url() {
        let route = RouteState::parse("https://shop.test/store/acme/products/p_42?currency=usd#reviews");
        assert_eq!(route.business_slug(), Some("acme"));
        assert_eq!(route.product_id().map(|p| p.as_str()), Some("p_42"));
        assert_eq!(route.currency().map(|c| c.to_string()), Some("USD".to_string()));
    }

    #[test]
    fn test_invoice_route() {
        let route = RouteState::parse("/invoice/inv_9");
        assert_eq!(route.invoice_id().map(|i| i.as_str()), Some("inv_9"));
        assert_eq!(route.business_slug(), None);
    }

    #[test]
    fn test_home_and_unknown() {
        assert_eq!(RouteState::parse("https://shop.test").route, Route::Home);
        assert_eq!(RouteState::parse("/").route, Route::Home);
        assert_eq!(RouteState::parse("/cart").route, Route::Cart);
        assert!(matches!(RouteState::parse("/admin/settings").route, Route::Unknown(_)));
    }

    #[test]
    fn test_query_decoding() {
        let route = RouteState::parse("/store/acme?type=hand%20made&page=2&q=a+b&flag");
        assert_eq!(route.product_type(), Some("hand made"));
        assert_eq!(route.page(), 2);
        assert_eq!(route.query.get("q").map(String::as_str), Some("a b"));
        assert_eq!(route.query.get("flag").map(String::as_str), Some(""));
    }

    #[test]
    fn test_bad_page_defaults_to_one() {
        assert_eq!(RouteState::parse("/store/a?page=abc").page(), 1);
        assert_eq!(RouteState::parse("/store/a?page=0").page(), 1);
        assert_eq!(RouteState::parse("/store/a?page=-3").page(), 1);
    }

    #[test]
    fn test_malformed_escape_kept() {
        assert_eq!(decode_component("100%"), "100%");
        assert_eq!(decode_component("%zz"), "%zz");
        assert_eq!(decode_component("caf%C3%A9"), "café");
    }
}
