//! Product listing DTOs.

use catalog_core::Product;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Which backing resource served a product listing.
///
/// Observability metadata only: a `Redis` answer may be stale relative to
/// the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum DataSource {
    /// Read from the durable store after a cache miss.
    Database,
    /// Served from the cache.
    Redis,
}

/// Product listing response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductListResponse {
    /// Products in the store's natural order. Never null.
    pub products: Vec<Product>,
    /// Which path served the request.
    pub source: DataSource,
}

impl ProductListResponse {
    /// Creates a new listing response.
    #[must_use]
    pub fn new(products: Vec<Product>, source: DataSource) -> Self {
        Self { products, source }
    }
}
