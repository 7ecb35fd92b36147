//! Newtype wrappers around Sanity document ids.
//!
//! Ids arrive from the Content Lake as opaque strings (the `_id` field of a
//! document). Wrapping them keeps a product id from being passed where a
//! category id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }
    };
}

define_id!(
    /// Identifier of a `product` document.
    ProductId
);

define_id!(
    /// Identifier of a `category` document.
    CategoryId
);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_plain_string() {
        let id = ProductId::new("prod-123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"prod-123\"");
    }

    #[test]
    fn deserializes_from_plain_string() {
        let id: ProductId = serde_json::from_str("\"prod-123\"").unwrap();
        assert_eq!(id.as_str(), "prod-123");
    }

    #[test]
    fn display_matches_inner_value() {
        let id = CategoryId::new("cat-7");
        assert_eq!(id.to_string(), "cat-7");
    }
}
