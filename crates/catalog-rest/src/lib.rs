//! # Catalog REST
//!
//! REST API layer using Axum for the product catalog service.
//! Exposes `GET /products` plus health and OpenAPI endpoints.

pub mod controllers;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
