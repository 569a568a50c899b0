//! PostgreSQL product repository implementation.

use crate::{traits::ProductRepository, DatabasePoolInterface};
use async_trait::async_trait;
use catalog_core::{CatalogResult, Product};
use sqlx::FromRow;
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, warn};

/// Integer and numeric columns are cast so any integer id type and any
/// numeric price type decode the same way.
const FIND_ALL_PRODUCTS: &str = r#"
    SELECT product_id::int8 AS product_id,
           product_name,
           retail_price::float8 AS retail_price
    FROM products
"#;

/// PostgreSQL product repository implementation.
#[derive(Clone)]
pub struct PostgresProductRepository {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PostgresProductRepository {
    /// Creates a new PostgreSQL product repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a product.
#[derive(Debug, FromRow)]
pub(crate) struct ProductRow {
    product_id: i64,
    product_name: String,
    retail_price: f64,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            product_id: row.product_id,
            product_name: row.product_name,
            retail_price: row.retail_price,
        }
    }
}

/// Collects decoded rows into products, skipping rows that failed to decode.
pub(crate) fn collect_products<I, E>(rows: I) -> Vec<Product>
where
    I: IntoIterator<Item = Result<ProductRow, E>>,
    E: Display,
{
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, row)| match row {
            Ok(row) => Some(Product::from(row)),
            Err(e) => {
                warn!(row = index, error = %e, "Skipping product row that failed to decode");
                None
            }
        })
        .collect()
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn find_all(&self) -> CatalogResult<Vec<Product>> {
        debug!("Fetching all products");

        let rows = sqlx::query(FIND_ALL_PRODUCTS)
            .fetch_all(self.pool.inner())
            .await?;

        let products = collect_products(rows.iter().map(ProductRow::from_row));

        debug!(
            rows = rows.len(),
            products = products.len(),
            "Fetched products from database"
        );
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(product_id: i64, product_name: &str, retail_price: f64) -> ProductRow {
        ProductRow {
            product_id,
            product_name: product_name.to_string(),
            retail_price,
        }
    }

    #[test]
    fn test_collect_products_keeps_store_order() {
        let rows: Vec<Result<ProductRow, String>> =
            vec![Ok(row(2, "Gadget", 5.0)), Ok(row(1, "Widget", 9.99))];

        let products = collect_products(rows);

        assert_eq!(
            products,
            vec![Product::new(2, "Gadget", 5.0), Product::new(1, "Widget", 9.99)]
        );
    }

    #[test]
    fn test_collect_products_skips_undecodable_rows() {
        let rows: Vec<Result<ProductRow, String>> = vec![
            Ok(row(1, "Widget", 9.99)),
            Err("unexpected null; try decoding as an `Option`".to_string()),
            Ok(row(3, "Sprocket", 1.25)),
        ];

        let products = collect_products(rows);

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].product_id, 1);
        assert_eq!(products[1].product_id, 3);
    }

    #[test]
    fn test_collect_products_empty() {
        let rows: Vec<Result<ProductRow, String>> = Vec::new();
        assert!(collect_products(rows).is_empty());
    }

    #[test]
    fn test_collect_products_all_rows_bad() {
        let rows: Vec<Result<ProductRow, String>> =
            vec![Err("bad".to_string()), Err("worse".to_string())];
        assert!(collect_products(rows).is_empty());
    }
}
