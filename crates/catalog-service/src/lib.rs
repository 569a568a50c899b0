//! # Catalog Service
//!
//! Business logic layer for the product catalog.
//! Implements the cache-aside read path on top of the repository and cache.

pub mod cache;
pub mod codec;
pub mod dto;
pub mod r#impl;
pub mod product_service;

pub use cache::*;
pub use dto::*;
pub use product_service::*;
pub use r#impl::ProductServiceImpl;
