//! Product entity.

use serde::{Deserialize, Serialize};

/// A product as read from the system of record.
///
/// Products are immutable once read. The serialized field names
/// (`productid`, `productName`, `retailPrice`) are the public wire format,
/// shared by the HTTP response body and the cached payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Product {
    /// Store-assigned unique identifier.
    #[serde(rename = "productid")]
    pub product_id: i64,

    /// Display name.
    #[serde(rename = "productName")]
    pub product_name: String,

    /// Retail price.
    #[serde(rename = "retailPrice")]
    pub retail_price: f64,
}

impl Product {
    /// Creates a new product.
    #[must_use]
    pub fn new(product_id: i64, product_name: impl Into<String>, retail_price: f64) -> Self {
        Self {
            product_id,
            product_name: product_name.into(),
            retail_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_with_wire_field_names() {
        let product = Product::new(1, "Widget", 9.99);
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(
            value,
            json!({"productid": 1, "productName": "Widget", "retailPrice": 9.99})
        );
    }

    #[test]
    fn test_deserializes_from_wire_field_names() {
        let product: Product =
            serde_json::from_str(r#"{"productid":7,"productName":"Gadget","retailPrice":12.5}"#)
                .unwrap();
        assert_eq!(product, Product::new(7, "Gadget", 12.5));
    }

    #[test]
    fn test_rejects_missing_field() {
        let result = serde_json::from_str::<Product>(r#"{"productid":7,"productName":"Gadget"}"#);
        assert!(result.is_err());
    }
}
