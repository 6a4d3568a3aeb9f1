//! HTTP request builder.

use crate::FetchError;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// HTTP methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl Method {
    /// Convert to HTTP method string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully described outbound request, handed to a [`Transport`](crate::Transport).
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub(crate) method: Method,
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) body: Option<Vec<u8>>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Append query parameters. Pairs with a `None` value are skipped.
    pub fn query<K, V>(mut self, pairs: impl IntoIterator<Item = (K, Option<V>)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let encoded: Vec<String> = pairs
            .into_iter()
            .filter_map(|(k, v)| {
                v.map(|v| format!("{}={}", encode_component(k.as_ref()), encode_component(v.as_ref())))
            })
            .collect();
        if encoded.is_empty() {
            return self;
        }
        let sep = if self.url.contains('?') { '&' } else { '?' };
        self.url.push(sep);
        self.url.push_str(&encoded.join("&"));
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        let json = serde_json::to_vec(value)?;
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self.body = Some(json);
        Ok(self)
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(self, token: impl AsRef<str>) -> Self {
        self.header("Authorization", format!("Bearer {}", token.as_ref()))
    }

    /// Set the Accept header.
    pub fn accept(self, content_type: impl Into<String>) -> Self {
        self.header("Accept", content_type)
    }

    /// Set the Content-Type header.
    pub fn content_type(self, content_type: impl Into<String>) -> Self {
        self.header("Content-Type", content_type)
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

/// Percent-encode a query component (RFC 3986 unreserved set passes through).
fn encode_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for b in input.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_appends_pairs() {
        let req = RequestBuilder::new(Method::Get, "https://api.test/products")
            .query([("page", Some("2")), ("currency", Some("NGN"))]);
        assert_eq!(req.url(), "https://api.test/products?page=2&currency=NGN");
    }

    #[test]
    fn test_query_skips_none() {
        let req = RequestBuilder::new(Method::Get, "https://api.test/products")
            .query([("page", Some("1")), ("product_type", None)]);
        assert_eq!(req.url(), "https://api.test/products?page=1");
    }

    #[test]
    fn test_query_all_none_leaves_url() {
        let req = RequestBuilder::new(Method::Get, "https://api.test/products")
            .query::<&str, &str>([("product_type", None)]);
        assert_eq!(req.url(), "https://api.test/products");
    }

    #[test]
    fn test_query_extends_existing() {
        let req = RequestBuilder::new(Method::Get, "https://api.test/p?a=1")
            .query([("b", Some("x y"))]);
        assert_eq!(req.url(), "https://api.test/p?a=1&b=x%20y");
    }

    #[test]
    fn test_bearer_auth() {
        let req = RequestBuilder::new(Method::Get, "/cart").bearer_auth("tok");
        assert_eq!(
            req.headers().get("Authorization").map(String::as_str),
            Some("Bearer tok")
        );
    }

    #[test]
    fn test_json_body_sets_content_type() {
        let req = RequestBuilder::new(Method::Post, "/cart/items")
            .json(&serde_json::json!({"quantity": 2}))
            .unwrap();
        assert_eq!(
            req.headers().get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(req.body(), Some(br#"{"quantity":2}"#.as_slice()));
    }
}
