//! Studio schema for the catalog, expressed as data.
//!
//! The studio that editors use is configured from a JSON description of each
//! document type. This module is the single source of truth for that
//! description on the Rust side: [`product_schema`] serializes to exactly the
//! shape the studio config expects, and the CLI prints it for syncing.

use serde::Serialize;

use crate::types::Badge;

/// A top-level document type editors can create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentType {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub title: &'static str,
    pub fields: Vec<Field>,
}

impl DocumentType {
    #[must_use]
    pub fn document(name: &'static str, title: &'static str, fields: Vec<Field>) -> Self {
        Self {
            name,
            kind: "document",
            title,
            fields,
        }
    }
}

/// One field of a document type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
    pub title: &'static str,
}

/// The value shape of a field, tagged the way the studio spells types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    String {
        #[serde(skip_serializing_if = "Option::is_none")]
        options: Option<StringOptions>,
    },
    Number,
    Text,
    Url,
    Reference {
        to: Vec<TypeRef>,
    },
    Array {
        of: Vec<TypeRef>,
    },
}

/// Options for string fields; a `list` turns the input into a dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringOptions {
    pub list: Vec<&'static str>,
}

/// Reference to another schema type by name, e.g. `{"type": "category"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeRef {
    #[serde(rename = "type")]
    pub name: &'static str,
}

impl Field {
    #[must_use]
    pub fn string(name: &'static str, title: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::String { options: None },
            title,
        }
    }

    /// A string field restricted to a fixed list of values.
    #[must_use]
    pub fn string_enum(name: &'static str, title: &'static str, list: Vec<&'static str>) -> Self {
        Self {
            name,
            kind: FieldKind::String {
                options: Some(StringOptions { list }),
            },
            title,
        }
    }

    #[must_use]
    pub fn number(name: &'static str, title: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Number,
            title,
        }
    }

    #[must_use]
    pub fn text(name: &'static str, title: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
            title,
        }
    }

    #[must_use]
    pub fn url(name: &'static str, title: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Url,
            title,
        }
    }

    #[must_use]
    pub fn reference(name: &'static str, title: &'static str, target: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Reference {
                to: vec![TypeRef { name: target }],
            },
            title,
        }
    }

    /// An array whose members are all of one type.
    #[must_use]
    pub fn array_of(name: &'static str, title: &'static str, member: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Array {
                of: vec![TypeRef { name: member }],
            },
            title,
        }
    }
}

/// The `product` document type as the studio defines it.
///
/// Field order matches the editing form top to bottom. The badge dropdown is
/// derived from [`Badge::ALL`] so the enum and the schema cannot drift apart.
#[must_use]
pub fn product_schema() -> DocumentType {
    DocumentType::document(
        "product",
        "Product",
        vec![
            Field::string("title", "Title"),
            Field::number("price", "Price"),
            Field::number("priceWithoutDiscount", "Price Without Discount"),
            Field::string_enum("badge", "Badge", Badge::ALL.map(Badge::as_str).to_vec()),
            Field::url("imageUrl", "Image URL"),
            Field::text("description", "Description"),
            Field::number("inventory", "Inventory"),
            Field::reference("category", "Category", "category"),
            Field::array_of("tags", "Tags", "string"),
        ],
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn product_schema_serializes_to_studio_shape() {
        let value = serde_json::to_value(product_schema()).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "product",
                "type": "document",
                "title": "Product",
                "fields": [
                    { "name": "title", "type": "string", "title": "Title" },
                    { "name": "price", "type": "number", "title": "Price" },
                    {
                        "name": "priceWithoutDiscount",
                        "type": "number",
                        "title": "Price Without Discount"
                    },
                    {
                        "name": "badge",
                        "type": "string",
                        "options": { "list": ["New", "Sales"] },
                        "title": "Badge"
                    },
                    { "name": "imageUrl", "type": "url", "title": "Image URL" },
                    { "name": "description", "type": "text", "title": "Description" },
                    { "name": "inventory", "type": "number", "title": "Inventory" },
                    {
                        "name": "category",
                        "type": "reference",
                        "to": [{ "type": "category" }],
                        "title": "Category"
                    },
                    {
                        "name": "tags",
                        "type": "array",
                        "of": [{ "type": "string" }],
                        "title": "Tags"
                    }
                ]
            })
        );
    }

    #[test]
    fn badge_dropdown_tracks_the_enum() {
        let schema = product_schema();
        let badge = schema
            .fields
            .iter()
            .find(|field| field.name == "badge")
            .unwrap();
        let FieldKind::String {
            options: Some(options),
        } = &badge.kind
        else {
            panic!("badge must be a string field with options");
        };
        assert_eq!(options.list.len(), Badge::ALL.len());
    }

    #[test]
    fn plain_string_fields_omit_options() {
        let value = serde_json::to_value(Field::string("title", "Title")).unwrap();
        assert_eq!(
            value,
            json!({ "name": "title", "type": "string", "title": "Title" })
        );
    }
}
