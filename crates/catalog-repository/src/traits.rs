//! Repository trait definitions.

use async_trait::async_trait;
use catalog_core::{CatalogResult, Product};

/// Read-only access to the product catalog's system of record.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Fetches every product in the store's natural order.
    ///
    /// Returns an empty collection when the store holds no products. Rows
    /// that fail to decode are skipped; only a failed query is an error.
    async fn find_all(&self) -> CatalogResult<Vec<Product>>;
}
