//! Serialization codec for cached product collections.
//!
//! A collection is stored as a JSON array using the same field names as the
//! HTTP response body.

use catalog_core::{CatalogError, CatalogResult, Product};

/// Encodes a product collection for the cache.
///
/// Non-finite prices are rejected: JSON has no representation for them and
/// they would not survive a round trip.
pub fn encode(products: &[Product]) -> CatalogResult<String> {
    if let Some(product) = products.iter().find(|p| !p.retail_price.is_finite()) {
        return Err(CatalogError::format(format!(
            "product {} has a non-finite price",
            product.product_id
        )));
    }

    Ok(serde_json::to_string(products)?)
}

/// Decodes a cached product collection.
///
/// Any malformed element fails the whole payload.
pub fn decode(payload: &str) -> CatalogResult<Vec<Product>> {
    Ok(serde_json::from_str(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new(1, "Widget", 9.99),
            Product::new(2, "Gadget \"Pro\"", 1234.5),
            Product::new(3, "Ünïcödé sprocket", 0.1 + 0.2),
            Product::new(i64::MAX, "", 0.0),
        ]
    }

    #[test]
    fn test_round_trip() {
        let products = catalog();
        let decoded = decode(&encode(&products).unwrap()).unwrap();
        assert_eq!(decoded, products);
    }

    #[test]
    fn test_round_trip_empty() {
        let encoded = encode(&[]).unwrap();
        assert_eq!(encoded, "[]");
        assert!(decode(&encoded).unwrap().is_empty());
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let mut products = catalog();
        products.reverse();
        let decoded = decode(&encode(&products).unwrap()).unwrap();
        assert_eq!(decoded, products);
    }

    #[test]
    fn test_encode_wire_format() {
        let encoded = encode(&[Product::new(1, "Widget", 9.99)]).unwrap();
        assert_eq!(
            encoded,
            r#"[{"productid":1,"productName":"Widget","retailPrice":9.99}]"#
        );
    }

    #[test]
    fn test_encode_rejects_non_finite_price() {
        let result = encode(&[Product::new(1, "Widget", f64::NAN)]);
        assert!(matches!(result, Err(CatalogError::Format(_))));

        let result = encode(&[Product::new(2, "Gadget", f64::INFINITY)]);
        assert!(matches!(result, Err(CatalogError::Format(_))));
    }

    #[test]
    fn test_decode_malformed() {
        for payload in ["", "not json", "[{\"productid\":1", "{}", "null", "42"] {
            let result = decode(payload);
            assert!(
                matches!(result, Err(CatalogError::Format(_))),
                "payload {payload:?} should fail"
            );
        }
    }

    #[test]
    fn test_decode_does_not_drop_bad_elements() {
        let payload = r#"[
            {"productid":1,"productName":"Widget","retailPrice":9.99},
            {"productid":2,"productName":"Gadget"}
        ]"#;
        assert!(matches!(decode(payload), Err(CatalogError::Format(_))));
    }
}
