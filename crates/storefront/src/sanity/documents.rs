//! Wire types for query API responses.
//!
//! Every document field is optional because GROQ projections return null for
//! anything a document does not carry, and the listing query projects fewer
//! fields than the single-product query.

use serde::Deserialize;

/// Envelope around a successful query response.
#[derive(Debug, Deserialize)]
pub struct QueryResponse<T> {
    /// Query result; shape depends on the query
    pub result: T,
    /// Server-side execution time in milliseconds
    #[serde(default)]
    pub ms: Option<f64>,
}

/// Envelope around an error response.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

/// Structured error payload from the query API.
#[derive(Debug, Deserialize)]
pub struct ErrorDetails {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// A `product` document as the query API projects it.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(rename = "priceWithoutDiscount", default)]
    pub price_without_discount: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "discountPercentage", default)]
    pub discount_percentage: Option<f64>,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default)]
    pub inventory: Option<i64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_a_full_document() {
        let json = serde_json::json!({
            "_id": "prod-side-table",
            "title": "Walnut Side Table",
            "price": 129.0,
            "priceWithoutDiscount": 159.0,
            "description": "Solid walnut with a hand-rubbed oil finish.",
            "discountPercentage": 19.0,
            "badge": "Sales",
            "inventory": 12,
            "category": "cat-living-room",
            "imageUrl": "https://cdn.sanity.io/images/r79i5c8/production/table.jpg",
            "tags": ["walnut", "table"]
        });

        let doc: ProductDocument = serde_json::from_value(json).unwrap();
        assert_eq!(doc.id, "prod-side-table");
        assert_eq!(doc.title.as_deref(), Some("Walnut Side Table"));
        assert_eq!(doc.inventory, Some(12));
        assert_eq!(doc.tags.unwrap().len(), 2);
    }

    #[test]
    fn deserializes_a_sparse_listing_row() {
        // Listing projections omit inventory and category entirely, and
        // documents may carry explicit nulls for unset fields
        let json = serde_json::json!({
            "_id": "prod-stool",
            "title": "Oak Stool",
            "price": 59.0,
            "description": null,
            "discountPercentage": null,
            "imageUrl": null,
            "tags": null
        });

        let doc: ProductDocument = serde_json::from_value(json).unwrap();
        assert_eq!(doc.id, "prod-stool");
        assert!(doc.description.is_none());
        assert!(doc.tags.is_none());
        assert!(doc.inventory.is_none());
    }

    #[test]
    fn unwraps_the_result_envelope() {
        let json = serde_json::json!({ "result": 7, "ms": 2.5 });
        let response: QueryResponse<i64> = serde_json::from_value(json).unwrap();
        assert_eq!(response.result, 7);
    }

    #[test]
    fn parses_an_error_envelope() {
        let json = serde_json::json!({
            "error": {
                "description": "expected '}' following object body",
                "type": "queryParseError"
            }
        });
        let response: ErrorResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.error.kind.as_deref(), Some("queryParseError"));
    }
}
