//! # Catalog Repository
//!
//! Durable store access for the product catalog:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn ProductRepository>     (store interface)
//! PostgresProductRepository           (SQLx queries, row decoding)
//!   ↓  Arc<dyn DatabasePoolInterface> (shared, process-wide pool)
//! PostgreSQL
//! ```

pub mod pool;
pub mod postgres;
pub mod traits;

pub use pool::*;
pub use postgres::*;
pub use traits::*;
