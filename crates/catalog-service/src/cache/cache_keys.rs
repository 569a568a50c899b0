//! Well-known cache keys and lifetimes.

use std::time::Duration;

/// Key holding the full serialized product collection.
pub const PRODUCTS_KEY: &str = "Products";

/// Lifetime of the cached product collection.
pub const PRODUCTS_TTL: Duration = Duration::from_secs(10);
