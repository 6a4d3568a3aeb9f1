//! Server-issued identifiers.
//!
//! The API is inconsistent about id types: some endpoints send `"biz_12"`,
//! others a bare `12`. Both decode to the same string-backed id.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// True for a blank id, e.g. from a missing route segment.
            pub fn is_empty(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                Ok(match RawId::deserialize(deserializer)? {
                    RawId::Text(text) => Self(text),
                    RawId::Number(n) => Self(n.to_string()),
                })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

define_id!(
    /// A business (storefront owner).
    BusinessId
);
define_id!(ProductId);
define_id!(CartId);
define_id!(InvoiceId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_input() {
        let id = ProductId::new("prod-123");
        assert_eq!(id.as_str(), "prod-123");
        assert_eq!(id.to_string(), "prod-123");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = BusinessId::new("biz_1");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""biz_1""#);
    }

    #[test]
    fn test_numeric_ids_decode_as_strings() {
        let id: InvoiceId = serde_json::from_str("42").unwrap();
        assert_eq!(id, InvoiceId::new("42"));
        let id: InvoiceId = serde_json::from_str(r#""inv_42""#).unwrap();
        assert_eq!(id.as_str(), "inv_42");
    }

    #[test]
    fn test_blank_id() {
        assert!(InvoiceId::new("  ").is_empty());
        assert!(!InvoiceId::new("inv_9").is_empty());
    }
}
