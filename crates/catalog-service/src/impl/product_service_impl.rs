//! Cache-aside product service implementation.

use crate::cache::cache_keys::{PRODUCTS_KEY, PRODUCTS_TTL};
use crate::cache::CacheInterface;
use crate::codec;
use crate::dto::{DataSource, ProductListResponse};
use crate::product_service::ProductService;
use async_trait::async_trait;
use catalog_core::CatalogResult;
use catalog_repository::ProductRepository;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Product service reading through the cache to the repository.
///
/// Each request runs one pass of: cache lookup, then on a miss a store read
/// followed by a cache write. Nothing is retried. Concurrent misses may both
/// repopulate the cache; the last write wins.
pub struct ProductServiceImpl {
    product_repository: Arc<dyn ProductRepository>,
    cache: Arc<dyn CacheInterface>,
}

impl ProductServiceImpl {
    /// Creates a new product service.
    pub fn new(
        product_repository: Arc<dyn ProductRepository>,
        cache: Arc<dyn CacheInterface>,
    ) -> Self {
        Self {
            product_repository,
            cache,
        }
    }

    async fn load_from_database(&self) -> CatalogResult<ProductListResponse> {
        let products = self.product_repository.find_all().await?;

        let payload = codec::encode(&products)?;
        self.cache
            .set_raw(PRODUCTS_KEY, &payload, PRODUCTS_TTL)
            .await?;

        info!(count = products.len(), "Products loaded from database and cached");
        Ok(ProductListResponse::new(products, DataSource::Database))
    }
}

#[async_trait]
impl ProductService for ProductServiceImpl {
    async fn list_products(&self) -> CatalogResult<ProductListResponse> {
        debug!("Listing products");

        match self.cache.get_raw(PRODUCTS_KEY).await {
            Ok(Some(payload)) => {
                // A corrupt payload fails the request; it does not fall back.
                let products = codec::decode(&payload).map_err(|e| {
                    warn!(error = %e, "Cached products could not be decoded");
                    e
                })?;

                debug!(count = products.len(), "Products served from cache");
                return Ok(ProductListResponse::new(products, DataSource::Redis));
            }
            Ok(None) => debug!("Products not cached"),
            Err(e) if e.is_cache_failure() => {
                warn!(error = %e, "Cache lookup failed, reading from database");
            }
            Err(e) => {
                warn!(error = %e, "Cached products could not be read");
                return Err(e);
            }
        }

        self.load_from_database().await
    }
}
